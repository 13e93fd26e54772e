//! Injection directive grammar
//!
//! A directive is a short string attached to a member:
//!
//! | Directive                    | Requested type | Requested name |
//! |------------------------------|----------------|----------------|
//! | `inject`                     | member name    | none           |
//! | `inject:OtherType`           | `OtherType`    | none           |
//! | `inject(name="X")`           | member name    | `X`            |
//! | `inject(name="X"):OtherType` | `OtherType`    | `X`            |
//!
//! Anything else is not a directive. No whitespace is tolerated.

use crate::Identifier;

const KEYWORD: &str = "inject";
const NAME_OPEN: &str = "(name=\"";
const NAME_CLOSE: &str = "\")";

/// What a directive asks the injector for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionRequest {
    /// Requested type name
    pub type_name: String,
    /// Requested qualifier
    pub name: Option<String>,
}

impl From<InjectionRequest> for Identifier {
    fn from(request: InjectionRequest) -> Self {
        match request.name {
            Some(name) => Identifier::named(request.type_name, name),
            None => Identifier::new(request.type_name),
        }
    }
}

/// Classify `value`, the directive attached to `member`.
///
/// Returns `None` when `value` is not an injection directive.
///
/// # Examples
///
/// ```rust
/// use named_injector::annotation::parse;
///
/// let request = parse("otherValue", r#"inject(name="one"):someValue"#).unwrap();
/// assert_eq!(request.type_name, "someValue");
/// assert_eq!(request.name.as_deref(), Some("one"));
///
/// assert!(parse("greeting", "Hello World").is_none());
/// ```
pub fn parse(member: &str, value: &str) -> Option<InjectionRequest> {
    let rest = value.strip_prefix(KEYWORD)?;

    let (name, rest) = match rest.strip_prefix(NAME_OPEN) {
        Some(args) => {
            let end = args.find('"')?;
            let (name, tail) = args.split_at(end);
            if name.is_empty() {
                return None;
            }
            (Some(name), tail.strip_prefix(NAME_CLOSE)?)
        }
        None => (None, rest),
    };

    let type_name = if rest.is_empty() {
        member
    } else {
        match rest.strip_prefix(':') {
            Some(other) if !other.is_empty() => other,
            _ => return None,
        }
    };

    Some(InjectionRequest {
        type_name: type_name.to_owned(),
        name: name.map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(type_name: &str, name: Option<&str>) -> Option<InjectionRequest> {
        Some(InjectionRequest {
            type_name: type_name.into(),
            name: name.map(Into::into),
        })
    }

    #[test]
    fn test_bare_directive_uses_member_name() {
        assert_eq!(parse("someValue", "inject"), request("someValue", None));
    }

    #[test]
    fn test_explicit_type() {
        assert_eq!(
            parse("otherValue", "inject:someValue"),
            request("someValue", None)
        );
    }

    #[test]
    fn test_named() {
        assert_eq!(
            parse("someValue", r#"inject(name="one")"#),
            request("someValue", Some("one"))
        );
    }

    #[test]
    fn test_named_with_explicit_type() {
        assert_eq!(
            parse("otherValue2", r#"inject(name="two"):someValue"#),
            request("someValue", Some("two"))
        );
    }

    #[test]
    fn test_rejects_non_directives() {
        for value in [
            "",
            "Hello World",
            "injector",
            "Inject",
            " inject",
            "inject:",
            "inject(name=\"\")",
            "inject(name=\"one\"",
            "inject(name=one)",
            "inject(name=\"one\")someValue",
            "inject(name=\"one\"):",
            "inject (name=\"one\")",
        ] {
            assert_eq!(parse("member", value), None, "{value:?} should not parse");
        }
    }

    #[test]
    fn test_request_into_identifier() {
        let id: Identifier = parse("a", r#"inject(name="n"):b"#).unwrap().into();
        assert_eq!(id, Identifier::named("b", "n"));
    }
}
