//! Hierarchical injector
//!
//! The `Injector` owns a registry of bindings and a non-owning link to its
//! parent. Lookups check the local registry first and fall back to the
//! parent chain; mutations never leave the local registry.

use crate::binding::{Binding, downcast};
use crate::registry::Registry;
use crate::{DiError, Identifier, Inject, Injectable, Instance, Operation, Result};
use std::sync::{Arc, Weak};

#[cfg(feature = "logging")]
use tracing::{debug, trace};

struct Inner {
    registry: Registry,
    /// Non-owning: a child never keeps its parent alive
    parent: Option<Weak<Inner>>,
    /// Scope depth for debugging
    depth: u32,
}

/// Dependency injection container.
///
/// `Injector` is a cheap handle; clones share the same registry. Every
/// injector registers itself under [`INJECTOR`](crate::INJECTOR) as a
/// [`WeakInjector`] value.
///
/// # Examples
///
/// ```rust
/// use named_injector::Injector;
///
/// let injector = Injector::new();
/// injector.map("greeting")?.to_value(String::from("Hi"))?;
/// injector.map(("greeting", "en"))?.to_value(String::from("Hello"))?;
///
/// assert_eq!(*injector.get::<String>("greeting")?, "Hi");
/// assert_eq!(*injector.get::<String>(("greeting", "en"))?, "Hello");
/// # Ok::<(), named_injector::DiError>(())
/// ```
#[derive(Clone)]
pub struct Injector {
    inner: Arc<Inner>,
}

impl Injector {
    /// Create a new root injector.
    pub fn new() -> Self {
        #[cfg(feature = "logging")]
        debug!(
            target: "named_injector",
            depth = 0,
            "Creating new root injector"
        );

        Self::with_parent(None, 0)
    }

    fn with_parent(parent: Option<Weak<Inner>>, depth: u32) -> Self {
        let injector = Self {
            inner: Arc::new(Inner {
                registry: Registry::new(),
                parent,
                depth,
            }),
        };
        injector.register_self();
        injector
    }

    /// Map `"injector"` to this injector
    fn register_self(&self) {
        self.inner.registry.install(Binding::with_value(
            Identifier::injector(),
            Arc::new(self.downgrade()),
        ));
    }

    // =========================================================================
    // Mapping
    // =========================================================================

    /// Get or create the local binding for `identifier`.
    ///
    /// Calling `map` again for the same identifier returns the same binding.
    /// Attach a strategy to a new binding with `to_value`, `to_type` or
    /// `to_singleton`.
    pub fn map(&self, identifier: impl Into<Identifier>) -> Result<Arc<Binding>> {
        let identifier = identifier.into();

        if let Some(binding) = self.inner.registry.lookup_local(&identifier) {
            return Ok(binding);
        }

        #[cfg(feature = "logging")]
        debug!(
            target: "named_injector",
            identifier = %identifier,
            depth = self.inner.depth,
            mapping_count = self.inner.registry.len() + 1,
            "Creating mapping"
        );

        self.inner.registry.create(identifier)
    }

    /// Remove the local binding for `identifier`.
    ///
    /// Bindings inherited from a parent don't count and are never touched.
    pub fn unmap(&self, identifier: impl Into<Identifier>) -> Result<()> {
        let identifier = identifier.into();

        if !self.inner.registry.remove_local(&identifier) {
            return Err(DiError::no_mapping(&identifier, Operation::Unmap));
        }

        #[cfg(feature = "logging")]
        debug!(
            target: "named_injector",
            identifier = %identifier,
            depth = self.inner.depth,
            "Removed mapping"
        );

        Ok(())
    }

    /// Check if `identifier` is bound here or in any ancestor.
    pub fn has_mapping(&self, identifier: impl Into<Identifier>) -> bool {
        self.has(&identifier.into())
    }

    fn has(&self, identifier: &Identifier) -> bool {
        self.inner.registry.contains_local(identifier)
            || self
                .parent_injector()
                .is_some_and(|parent| parent.has(identifier))
    }

    /// The binding for `identifier` from the nearest scope that defines it.
    pub fn get_mapping(&self, identifier: impl Into<Identifier>) -> Result<Arc<Binding>> {
        let identifier = identifier.into();

        if !self.has(&identifier) {
            return Err(DiError::no_mapping(&identifier, Operation::Mapping));
        }

        self.find(&identifier)
            .ok_or_else(|| DiError::no_mapping(&identifier, Operation::Mapping))
    }

    /// Local binding first, then the parent chain
    fn find(&self, identifier: &Identifier) -> Option<Arc<Binding>> {
        if let Some(binding) = self.inner.registry.lookup_local(identifier) {
            #[cfg(feature = "logging")]
            trace!(
                target: "named_injector",
                identifier = %identifier,
                depth = self.inner.depth,
                location = "local",
                "Mapping found in current scope"
            );
            return Some(binding);
        }

        let parent = self.parent_injector()?;

        #[cfg(feature = "logging")]
        trace!(
            target: "named_injector",
            identifier = %identifier,
            depth = self.inner.depth,
            "Mapping not in local scope, asking parent"
        );

        parent.find(identifier)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve `identifier` according to its binding's strategy.
    ///
    /// Every call resolves again: Type bindings build a fresh instance,
    /// Value and Singleton bindings hand out the same `Arc`.
    pub fn get_instance(&self, identifier: impl Into<Identifier>) -> Result<Instance> {
        let identifier = identifier.into();
        self.instance(&identifier)
    }

    fn instance(&self, identifier: &Identifier) -> Result<Instance> {
        if !self.has(identifier) {
            #[cfg(feature = "logging")]
            debug!(
                target: "named_injector",
                identifier = %identifier,
                depth = self.inner.depth,
                "Mapping not found in injector or parent chain"
            );
            return Err(DiError::no_mapping(identifier, Operation::Instance));
        }

        self.find(identifier)
            .ok_or_else(|| DiError::no_mapping(identifier, Operation::Instance))?
            .resolve()
    }

    /// Resolve `identifier` and downcast to `T`.
    ///
    /// # Errors
    ///
    /// `NoMappingFound` as [`get_instance`](Self::get_instance), and
    /// `TypeMismatch` if the bound value is not a `T`.
    pub fn get<T: Injectable>(&self, identifier: impl Into<Identifier>) -> Result<Arc<T>> {
        let identifier = identifier.into();
        downcast(self.instance(&identifier)?, &identifier)
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Wire every declared injection point of `target`, then run its
    /// post-construct hooks.
    ///
    /// Points are processed in declaration order; the first one without a
    /// resolvable mapping aborts with `MissingInjectionRule`, leaving the
    /// members already assigned in place.
    pub fn inject_into<T: Inject>(&self, target: &mut T) -> Result<()> {
        let target_name = std::any::type_name::<T>();

        for point in T::injection_points() {
            let identifier = point.identifier();

            if !self.has(identifier) {
                #[cfg(feature = "logging")]
                debug!(
                    target: "named_injector",
                    identifier = %identifier,
                    member = point.member(),
                    target_type = target_name,
                    "No rule for injection point"
                );
                return Err(DiError::MissingInjectionRule {
                    identifier: identifier.clone(),
                    member: point.member().to_owned(),
                    target: target_name,
                });
            }

            let instance = self.instance(identifier)?;
            target.assign(&point, instance)?;

            #[cfg(feature = "logging")]
            trace!(
                target: "named_injector",
                identifier = %identifier,
                member = point.member(),
                target_type = target_name,
                "Injected member"
            );
        }

        self.post_construct(target);
        Ok(())
    }

    fn post_construct<T: Inject>(&self, target: &mut T) {
        for name in T::post_constructs() {
            match T::hook(name) {
                Some(hook) => {
                    #[cfg(feature = "logging")]
                    trace!(
                        target: "named_injector",
                        hook = *name,
                        target_type = std::any::type_name::<T>(),
                        "Running post-construct hook"
                    );
                    hook(target);
                }
                None => {
                    #[cfg(feature = "logging")]
                    trace!(
                        target: "named_injector",
                        hook = *name,
                        target_type = std::any::type_name::<T>(),
                        "Skipping post-construct name with no hook"
                    );
                }
            }
        }
    }

    /// Build `T::default()` and wire it.
    pub fn create_instance<T: Inject + Default>(&self) -> Result<T> {
        let mut target = T::default();
        self.inject_into(&mut target)?;
        Ok(target)
    }

    // =========================================================================
    // Scoping
    // =========================================================================

    /// Drop every local binding and map `"injector"` to this injector again.
    ///
    /// Parent and child injectors are unaffected.
    pub fn teardown(&self) {
        #[cfg(feature = "logging")]
        debug!(
            target: "named_injector",
            depth = self.inner.depth,
            mapping_count = self.inner.registry.len(),
            "Tearing down injector"
        );

        self.inner.registry.clear();
        self.register_self();
    }

    /// Create a child injector that can read this injector's bindings.
    ///
    /// The child starts with only its own `"injector"` mapping, which shadows
    /// the parent's. Bindings made on the child stay invisible to the parent.
    pub fn create_child_injector(&self) -> Injector {
        let child_depth = self.inner.depth + 1;

        #[cfg(feature = "logging")]
        debug!(
            target: "named_injector",
            parent_depth = self.inner.depth,
            child_depth = child_depth,
            parent_mappings = self.inner.registry.len(),
            "Creating child injector"
        );

        Self::with_parent(Some(Arc::downgrade(&self.inner)), child_depth)
    }

    /// The parent injector, if this is a child and the parent is still alive.
    pub fn parent_injector(&self) -> Option<Injector> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Injector { inner })
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Non-owning handle to this injector
    #[inline]
    pub fn downgrade(&self) -> WeakInjector {
        WeakInjector {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Whether both handles refer to the same injector
    #[inline]
    pub fn ptr_eq(&self, other: &Injector) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Scope depth (0 = root)
    #[inline]
    pub fn depth(&self) -> u32 {
        self.inner.depth
    }

    /// Number of local bindings, including the self-registration
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    /// Check if there are no local bindings
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.registry.is_empty()
    }

    /// Locally bound identifiers, in no particular order
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.inner.registry.identifiers()
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("mappings", &self.inner.registry.len())
            .field("depth", &self.inner.depth)
            .field("has_parent", &self.inner.parent.is_some())
            .finish()
    }
}

/// Non-owning handle to an [`Injector`].
///
/// This is the value bound to `"injector"` in every injector.
#[derive(Clone)]
pub struct WeakInjector {
    inner: Weak<Inner>,
}

impl WeakInjector {
    /// The injector, if it is still alive
    #[inline]
    pub fn upgrade(&self) -> Option<Injector> {
        self.inner.upgrade().map(|inner| Injector { inner })
    }

    /// Whether this handle points at `injector`
    #[inline]
    pub fn ptr_eq(&self, injector: &Injector) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Arc::as_ptr(&injector.inner))
    }
}

impl std::fmt::Debug for WeakInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakInjector")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
