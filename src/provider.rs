//! Provider traits for dependency injection
//!
//! These traits define what values a binding can hold and how they behave.

use std::any::Any;
use std::sync::Arc;

/// A type-erased resolved value.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Marker trait for types that can be stored in a binding.
///
/// This is automatically implemented for all types that are `Send + Sync + 'static`.
/// You never need to implement this manually.
pub trait Injectable: Send + Sync + 'static {
    /// Returns the type name for debugging
    #[inline]
    fn type_name_of() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }
}

// Blanket implementation - everything that's Send + Sync + 'static is Injectable
impl<T: Send + Sync + 'static> Injectable for T {}

/// How a binding produces its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// The stored value, returned unchanged on every resolve
    Value,

    /// A new instance created on every resolve
    Type,

    /// Created on first resolve, then shared
    Singleton,
}

impl Strategy {
    /// Lowercase label used in log fields
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Value => "value",
            Strategy::Type => "type",
            Strategy::Singleton => "singleton",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
