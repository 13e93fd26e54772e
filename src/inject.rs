//! Injection targets
//!
//! A type opts into member wiring by implementing [`Inject`]: it declares an
//! ordered list of [`InjectionPoint`]s, accepts resolved instances for them,
//! and optionally names post-construct hooks to run once wiring completes.
//!
//! Implementations are usually generated with `#[derive(Inject)]` (feature
//! `derive`). Hand-written ones can keep string directives through
//! [`InjectionPoint::parse`].
//!
//! # Example
//!
//! ```rust
//! use named_injector::{Inject, InjectionPoint, Injector, Instance, Result, downcast};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Greeter {
//!     greeting: Option<Arc<String>>,
//!     ready: bool,
//! }
//!
//! impl Greeter {
//!     fn on_ready(&mut self) {
//!         self.ready = true;
//!     }
//! }
//!
//! impl Inject for Greeter {
//!     fn injection_points() -> Vec<InjectionPoint> {
//!         InjectionPoint::parse("greeting", "inject").into_iter().collect()
//!     }
//!
//!     fn assign(&mut self, point: &InjectionPoint, instance: Instance) -> Result<()> {
//!         self.greeting = Some(downcast(instance, point.identifier())?);
//!         Ok(())
//!     }
//!
//!     fn post_constructs() -> &'static [&'static str] {
//!         &["on_ready"]
//!     }
//!
//!     fn hook(name: &str) -> Option<fn(&mut Self)> {
//!         match name {
//!             "on_ready" => Some(Self::on_ready),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let injector = Injector::new();
//! injector.map("greeting")?.to_value(String::from("Hello World"))?;
//!
//! let mut greeter = Greeter::default();
//! injector.inject_into(&mut greeter)?;
//!
//! assert_eq!(greeter.greeting.as_deref().map(String::as_str), Some("Hello World"));
//! assert!(greeter.ready);
//! # Ok::<(), named_injector::DiError>(())
//! ```

use crate::annotation;
use crate::{Identifier, Instance, Result};

/// One member a target wants wired, and what it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionPoint {
    member: String,
    identifier: Identifier,
}

impl InjectionPoint {
    /// Declare that `member` receives the binding for `identifier`
    #[inline]
    pub fn new(member: impl Into<String>, identifier: impl Into<Identifier>) -> Self {
        Self {
            member: member.into(),
            identifier: identifier.into(),
        }
    }

    /// Build an injection point from a string directive.
    ///
    /// Returns `None` when `directive` is not one (see [`annotation`]).
    pub fn parse(member: &str, directive: &str) -> Option<Self> {
        annotation::parse(member, directive).map(|request| Self::new(member, request))
    }

    /// The member receiving the instance
    #[inline]
    pub fn member(&self) -> &str {
        &self.member
    }

    /// The requested binding
    #[inline]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

/// A type whose members can be wired by [`Injector::inject_into`].
///
/// [`Injector::inject_into`]: crate::Injector::inject_into
pub trait Inject: Sized {
    /// Members to wire, in order.
    fn injection_points() -> Vec<InjectionPoint>;

    /// Store `instance` into the member named by `point`.
    ///
    /// Implementations downcast with [`downcast`](crate::downcast) and report
    /// members they don't know with `DiError::UnknownMember`.
    fn assign(&mut self, point: &InjectionPoint, instance: Instance) -> Result<()>;

    /// Names of post-construct hooks, in invocation order.
    fn post_constructs() -> &'static [&'static str] {
        &[]
    }

    /// The hook registered under `name`.
    ///
    /// Names without a hook are skipped.
    fn hook(_name: &str) -> Option<fn(&mut Self)> {
        None
    }
}
