//! # named-injector - Hierarchical Dependency Injection by Name
//!
//! A dependency injection container whose bindings are addressed by a type
//! name plus an optional qualifying name, with parent/child scopes and
//! member wiring for plain structs.
//!
//! ## Features
//!
//! - 🏷️ **Named bindings** - `("greeting", "en")` and `"greeting"` are distinct
//! - 🔁 **Three strategies** - fixed values, fresh instances, lazy singletons
//! - 🌳 **Scoped injectors** - children read parent bindings and may shadow them
//! - 🪛 **Member wiring** - `inject_into` fills declared injection points and runs post-construct hooks
//! - 📊 **Observable** - Optional tracing integration with JSON or pretty output
//!
//! ## Quick Start
//!
//! ```rust
//! use named_injector::Injector;
//!
//! #[derive(Default)]
//! struct Widget;
//!
//! let injector = Injector::new();
//!
//! // Value - the same Arc every time
//! injector.map("greeting")?.to_value(String::from("Hello World"))?;
//!
//! // Type - a new instance every time
//! injector.map("widget")?.to_type(Widget::default)?;
//!
//! // Singleton - built on first resolve, then shared
//! injector.map(("widget", "shared"))?.to_singleton(Widget::default)?;
//!
//! let greeting = injector.get::<String>("greeting")?;
//! assert_eq!(*greeting, "Hello World");
//! # Ok::<(), named_injector::DiError>(())
//! ```
//!
//! ## Scopes
//!
//! ```rust
//! use named_injector::Injector;
//!
//! let root = Injector::new();
//! root.map("x")?.to_value(1i32)?;
//!
//! let child = root.create_child_injector();
//! assert_eq!(*child.get::<i32>("x")?, 1);
//!
//! child.map("x")?.to_value(2i32)?;
//! assert_eq!(*child.get::<i32>("x")?, 2);
//! assert_eq!(*root.get::<i32>("x")?, 1);
//! # Ok::<(), named_injector::DiError>(())
//! ```
//!
//! ## Wiring
//!
//! Types implement [`Inject`] (or derive it with the `derive` feature) to
//! declare which members receive which bindings; see the [`inject`] module.

pub mod annotation;
mod binding;
mod error;
mod identifier;
pub mod inject;
mod injector;
#[cfg(feature = "logging")]
pub mod logging;
mod provider;
mod registry;

pub use annotation::InjectionRequest;
pub use binding::*;
pub use error::*;
pub use identifier::*;
pub use inject::{Inject, InjectionPoint};
pub use injector::*;
pub use provider::*;

#[cfg(feature = "derive")]
pub use named_injector_derive::Inject;

// Re-export tracing macros for convenience when logging feature is enabled
#[cfg(feature = "logging")]
pub use tracing::{debug, error, info, trace, warn};

// Re-export for convenience
pub use std::sync::Arc;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Binding, DiError, Identifier, Inject, InjectionPoint, Injector, Instance, Result,
        Strategy, WeakInjector, downcast,
    };
    pub use std::sync::Arc;
}
