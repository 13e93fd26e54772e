//! Error types for dependency injection

use crate::{Identifier, Injectable};
use thiserror::Error;

/// The lookup that failed to find a mapping.
///
/// Each operation reports a missing mapping with its own wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `Injector::unmap`
    Unmap,
    /// `Injector::get_instance` and the typed helpers built on it
    Instance,
    /// `Injector::get_mapping`
    Mapping,
}

impl Operation {
    fn describe(&self, identifier: &Identifier) -> String {
        match self {
            Operation::Unmap => {
                format!("Cannot unmap \"{identifier}\" because no mapping has been found")
            }
            Operation::Instance => {
                format!("Cannot return instance \"{identifier}\" because no mapping has been found")
            }
            Operation::Mapping => format!("Mapping \"{identifier}\" was not found"),
        }
    }
}

/// Errors that can occur during dependency injection operations
#[derive(Error, Debug, Clone)]
pub enum DiError {
    /// A local binding already exists for the identifier
    #[error("Already has mapping for {identifier}")]
    DuplicateMapping { identifier: Identifier },

    /// No binding could be found locally or through the parent chain
    #[error("{}", .operation.describe(.identifier))]
    NoMappingFound {
        identifier: Identifier,
        operation: Operation,
    },

    /// An injection point requested an identifier nobody provides
    #[error("Cannot inject \"{identifier}\" into {target}.{member} due to a missing rule")]
    MissingInjectionRule {
        identifier: Identifier,
        member: String,
        target: &'static str,
    },

    /// The binding was mapped but never given a strategy
    #[error("Mapping \"{identifier}\" has no strategy attached")]
    Unconfigured { identifier: Identifier },

    /// A strategy was already attached to the binding
    #[error("Mapping \"{identifier}\" is already configured")]
    AlreadyConfigured { identifier: Identifier },

    /// The resolved value is not of the requested Rust type
    #[error("Instance \"{identifier}\" is not a {expected}")]
    TypeMismatch {
        identifier: Identifier,
        expected: &'static str,
    },

    /// An `Inject` implementation was handed a member it does not declare
    #[error("{target} has no injectable member {member}")]
    UnknownMember {
        member: String,
        target: &'static str,
    },
}

impl DiError {
    /// Create a NoMappingFound error
    #[inline]
    pub fn no_mapping(identifier: &Identifier, operation: Operation) -> Self {
        Self::NoMappingFound {
            identifier: identifier.clone(),
            operation,
        }
    }

    /// Create a TypeMismatch error for `T`
    #[inline]
    pub fn type_mismatch<T: Injectable>(identifier: &Identifier) -> Self {
        Self::TypeMismatch {
            identifier: identifier.clone(),
            expected: T::type_name_of(),
        }
    }

    /// Create an UnknownMember error for target type `T`
    #[inline]
    pub fn unknown_member<T: ?Sized>(member: impl Into<String>) -> Self {
        Self::UnknownMember {
            member: member.into(),
            target: std::any::type_name::<T>(),
        }
    }
}

/// Result type alias for DI operations
pub type Result<T> = std::result::Result<T, DiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_message() {
        let err = DiError::no_mapping(&Identifier::from("greeting"), Operation::Instance);
        assert_eq!(
            err.to_string(),
            "Cannot return instance \"greeting\" because no mapping has been found"
        );
    }

    #[test]
    fn test_named_messages() {
        let id = Identifier::from(("someValue", "myName"));

        let unmap = DiError::no_mapping(&id, Operation::Unmap);
        assert_eq!(
            unmap.to_string(),
            "Cannot unmap \"someValue by name myName\" because no mapping has been found"
        );

        let mapping = DiError::no_mapping(&id, Operation::Mapping);
        assert_eq!(mapping.to_string(), "Mapping \"someValue by name myName\" was not found");
    }

    #[test]
    fn test_missing_rule_message() {
        let err = DiError::MissingInjectionRule {
            identifier: Identifier::named("db", "primary"),
            member: "database".into(),
            target: "app::Service",
        };
        assert_eq!(
            err.to_string(),
            "Cannot inject \"db by name primary\" into app::Service.database due to a missing rule"
        );
    }

    #[test]
    fn test_type_mismatch_names_expected_type() {
        let err = DiError::type_mismatch::<u32>(&Identifier::new("port"));
        assert_eq!(err.to_string(), "Instance \"port\" is not a u32");
    }
}
