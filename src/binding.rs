//! Bindings and their resolution strategies
//!
//! A binding is created unconfigured by `Injector::map` and receives its
//! strategy exactly once through `to_value`, `to_type` or `to_singleton`.
//!
//! Payloads are stored as an enum rather than `Box<dyn Trait>` so resolution
//! is a single match with no vtable hop.

use crate::{DiError, Identifier, Injectable, Instance, Result, Strategy};
use once_cell::sync::OnceCell;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Type-erased constructor
type ConstructFn = Box<dyn Fn() -> Instance + Send + Sync>;

/// Strategy payload attached to a binding
enum Payload {
    /// Stored value, shared by every resolve
    Value(Instance),
    /// Constructor invoked on every resolve
    Type {
        construct: ConstructFn,
        type_name: &'static str,
    },
    /// Constructor invoked once, result memoized
    Singleton {
        construct: ConstructFn,
        instance: OnceCell<Instance>,
        type_name: &'static str,
    },
}

impl Payload {
    #[inline]
    fn strategy(&self) -> Strategy {
        match self {
            Payload::Value(_) => Strategy::Value,
            Payload::Type { .. } => Strategy::Type,
            Payload::Singleton { .. } => Strategy::Singleton,
        }
    }
}

/// Erase a constructor returning `T` into one returning an [`Instance`]
#[inline]
fn erase<T: Injectable, F>(construct: F) -> ConstructFn
where
    F: Fn() -> T + Send + Sync + 'static,
{
    Box::new(move || Arc::new(construct()) as Instance)
}

/// Downcast a resolved instance to `Arc<T>`.
///
/// `identifier` only feeds the error message.
#[inline]
pub fn downcast<T: Injectable>(instance: Instance, identifier: &Identifier) -> Result<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| DiError::type_mismatch::<T>(identifier))
}

/// A rule describing how to produce the value for one identifier.
///
/// # Examples
///
/// ```rust
/// use named_injector::Injector;
///
/// #[derive(Default)]
/// struct Widget;
///
/// let injector = Injector::new();
/// injector.map("widget")?.to_singleton(Widget::default)?;
///
/// let a = injector.get::<Widget>("widget")?;
/// let b = injector.get::<Widget>("widget")?;
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// # Ok::<(), named_injector::DiError>(())
/// ```
pub struct Binding {
    identifier: Identifier,
    payload: OnceCell<Payload>,
}

impl Binding {
    /// Create an unconfigured binding
    #[inline]
    pub(crate) fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            payload: OnceCell::new(),
        }
    }

    /// Create a binding already holding `value`
    #[inline]
    pub(crate) fn with_value(identifier: Identifier, value: Instance) -> Self {
        Self {
            identifier,
            payload: OnceCell::with_value(Payload::Value(value)),
        }
    }

    /// The identifier this binding answers to
    #[inline]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// The attached strategy, or `None` while unconfigured
    #[inline]
    pub fn strategy(&self) -> Option<Strategy> {
        self.payload.get().map(Payload::strategy)
    }

    /// Whether a strategy has been attached
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.payload.get().is_some()
    }

    /// Resolve to `value` every time.
    pub fn to_value<T: Injectable>(&self, value: T) -> Result<()> {
        self.to_shared(Arc::new(value))
    }

    /// Resolve to an existing `Arc` every time.
    pub fn to_shared<T: Injectable>(&self, value: Arc<T>) -> Result<()> {
        self.attach(Payload::Value(value as Instance), T::type_name_of())
    }

    /// Build a fresh instance on every resolve.
    pub fn to_type<T: Injectable, F>(&self, construct: F) -> Result<()>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let type_name = T::type_name_of();
        self.attach(
            Payload::Type {
                construct: erase(construct),
                type_name,
            },
            type_name,
        )
    }

    /// Build the instance on first resolve and share it afterwards.
    pub fn to_singleton<T: Injectable, F>(&self, construct: F) -> Result<()>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let type_name = T::type_name_of();
        self.attach(
            Payload::Singleton {
                construct: erase(construct),
                instance: OnceCell::new(),
                type_name,
            },
            type_name,
        )
    }

    #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
    fn attach(&self, payload: Payload, type_name: &'static str) -> Result<()> {
        #[cfg(feature = "logging")]
        let strategy = payload.strategy();

        self.payload
            .set(payload)
            .map_err(|_| DiError::AlreadyConfigured {
                identifier: self.identifier.clone(),
            })?;

        #[cfg(feature = "logging")]
        debug!(
            target: "named_injector",
            identifier = %self.identifier,
            strategy = strategy.as_str(),
            service = type_name,
            "Configured mapping"
        );

        Ok(())
    }

    /// Produce a value according to the attached strategy.
    pub fn resolve(&self) -> Result<Instance> {
        let payload = self.payload.get().ok_or_else(|| DiError::Unconfigured {
            identifier: self.identifier.clone(),
        })?;

        match payload {
            Payload::Value(value) => Ok(Arc::clone(value)),
            Payload::Type {
                construct,
                type_name,
            } => {
                #[cfg(feature = "logging")]
                trace!(
                    target: "named_injector",
                    identifier = %self.identifier,
                    service = *type_name,
                    "Creating new instance"
                );
                #[cfg(not(feature = "logging"))]
                let _ = type_name;

                Ok(construct())
            }
            Payload::Singleton {
                construct,
                instance,
                type_name,
            } => {
                let value = instance.get_or_init(|| {
                    #[cfg(feature = "logging")]
                    debug!(
                        target: "named_injector",
                        identifier = %self.identifier,
                        service = *type_name,
                        "Singleton initializing on first access"
                    );
                    #[cfg(not(feature = "logging"))]
                    let _ = type_name;

                    construct()
                });
                Ok(Arc::clone(value))
            }
        }
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("identifier", &self.identifier)
            .field("strategy", &self.strategy())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct Widget {
        label: Mutex<String>,
    }

    fn binding() -> Binding {
        Binding::new(Identifier::new("widget"))
    }

    #[test]
    fn test_value_returns_same_reference() {
        let value = Arc::new(String::from("Hello World"));
        let binding = binding();
        binding.to_shared(Arc::clone(&value)).unwrap();

        let a = downcast::<String>(binding.resolve().unwrap(), binding.identifier()).unwrap();
        let b = downcast::<String>(binding.resolve().unwrap(), binding.identifier()).unwrap();

        assert!(Arc::ptr_eq(&a, &value));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_type_builds_independent_instances() {
        let binding = binding();
        binding.to_type(Widget::default).unwrap();

        let a = downcast::<Widget>(binding.resolve().unwrap(), binding.identifier()).unwrap();
        let b = downcast::<Widget>(binding.resolve().unwrap(), binding.identifier()).unwrap();

        *b.label.lock().unwrap() = "changed".into();

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a.label.lock().unwrap(), "");
    }

    #[test]
    fn test_singleton_constructs_once() {
        static CREATED: AtomicU32 = AtomicU32::new(0);

        let binding = binding();
        binding
            .to_singleton(|| {
                CREATED.fetch_add(1, Ordering::SeqCst);
                Widget::default()
            })
            .unwrap();

        assert_eq!(CREATED.load(Ordering::SeqCst), 0);

        let a = downcast::<Widget>(binding.resolve().unwrap(), binding.identifier()).unwrap();
        *a.label.lock().unwrap() = "shared".into();
        let b = downcast::<Widget>(binding.resolve().unwrap(), binding.identifier()).unwrap();

        assert_eq!(CREATED.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b.label.lock().unwrap(), "shared");
    }

    #[test]
    fn test_unconfigured_binding_fails_to_resolve() {
        let binding = binding();
        assert!(!binding.is_configured());
        assert!(matches!(binding.resolve(), Err(DiError::Unconfigured { .. })));
    }

    #[test]
    fn test_strategy_attaches_once() {
        let binding = binding();
        binding.to_value(1u32).unwrap();

        let err = binding.to_type(|| 2u32).unwrap_err();
        assert!(matches!(err, DiError::AlreadyConfigured { .. }));
        assert_eq!(binding.strategy(), Some(Strategy::Value));
    }

    #[test]
    fn test_downcast_mismatch() {
        let binding = binding();
        binding.to_value(7u32).unwrap();

        let err = downcast::<String>(binding.resolve().unwrap(), binding.identifier()).unwrap_err();
        match err {
            DiError::TypeMismatch { expected, .. } => {
                assert_eq!(expected, String::type_name_of());
                assert_eq!(expected, "alloc::string::String");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
