//! Selection rules deciding which types an interceptor attaches to.
//!
//! A rule is evaluated once per (type, interceptor) registration, never
//! per call.

use std::marker::PhantomData;

use tracing::debug;

use crate::descriptor::{Marker, TypeDescriptor};

/// Predicate over a type's method descriptors.
pub trait SelectionRule: Send + Sync {
    fn matches(&self, ty: &TypeDescriptor) -> bool;
}

impl<F> SelectionRule for F
where
    F: Fn(&TypeDescriptor) -> bool + Send + Sync,
{
    fn matches(&self, ty: &TypeDescriptor) -> bool {
        self(ty)
    }
}

/// Matches types with at least one method that carries marker `M` and is
/// overridable.
///
/// A method carrying `M` that is not overridable can never be wrapped;
/// it does not count towards a match and raises no error.
pub struct MarkedOverridable<M> {
    _marker: PhantomData<fn() -> M>,
}

impl<M> MarkedOverridable<M> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M> Default for MarkedOverridable<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Marker> SelectionRule for MarkedOverridable<M> {
    fn matches(&self, ty: &TypeDescriptor) -> bool {
        let mut matched = false;
        for method in ty.methods().iter().filter(|m| m.has_marker::<M>()) {
            if method.is_overridable() {
                matched = true;
            } else {
                debug!(
                    type_name = ty.name(),
                    method = method.name(),
                    marker = M::NAME,
                    "marked method is not overridable and will not be intercepted"
                );
            }
        }
        matched
    }
}
