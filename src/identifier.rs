//! Binding identifiers
//!
//! An identifier is a type name plus an optional qualifying name. An absent
//! name and an empty name address the same binding.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier the injector registers itself under.
pub const INJECTOR: &str = "injector";

/// Key used to address a binding.
///
/// # Examples
///
/// ```rust
/// use named_injector::Identifier;
///
/// let plain = Identifier::from("greeting");
/// let named = Identifier::from(("greeting", "en"));
///
/// assert_ne!(plain, named);
/// assert_eq!(plain, Identifier::named("greeting", ""));
/// assert_eq!(named.to_string(), "greeting by name en");
/// ```
#[derive(Clone, Debug)]
pub struct Identifier {
    type_name: String,
    name: Option<String>,
}

impl Identifier {
    /// Identifier without a qualifying name
    #[inline]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
        }
    }

    /// Identifier qualified by `name`
    #[inline]
    pub fn named(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: Some(name.into()),
        }
    }

    /// The identifier the injector registers itself under
    #[inline]
    pub fn injector() -> Self {
        Self::new(INJECTOR)
    }

    /// The requested type name
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The qualifying name, if one was supplied
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    fn normalized_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.normalized_name() == other.normalized_name()
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.normalized_name().hash(state);
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} by name {}", self.type_name, name),
            None => f.write_str(&self.type_name),
        }
    }
}

impl From<&str> for Identifier {
    fn from(type_name: &str) -> Self {
        Self::new(type_name)
    }
}

impl From<String> for Identifier {
    fn from(type_name: String) -> Self {
        Self::new(type_name)
    }
}

impl<T: Into<String>, N: Into<String>> From<(T, N)> for Identifier {
    fn from((type_name, name): (T, N)) -> Self {
        Self::named(type_name, name)
    }
}

impl From<&Identifier> for Identifier {
    fn from(identifier: &Identifier) -> Self {
        identifier.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_absent_name_matches_empty_name() {
        let mut set = HashSet::new();
        set.insert(Identifier::new("widget"));

        assert!(set.contains(&Identifier::named("widget", "")));
        assert!(!set.contains(&Identifier::named("widget", "blue")));
    }

    #[test]
    fn test_display() {
        assert_eq!(Identifier::new("widget").to_string(), "widget");
        assert_eq!(Identifier::named("widget", "blue").to_string(), "widget by name blue");
    }

    #[test]
    fn test_type_and_name_are_distinct() {
        assert_ne!(Identifier::named("a", "b"), Identifier::named("b", "a"));
        assert_ne!(Identifier::new("a"), Identifier::new("b"));
    }
}
