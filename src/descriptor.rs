//! Method and type descriptors with explicitly registered markers.
//!
//! Markers are attached at registration time through [`TypeBuilder`]
//! rather than discovered from metadata at call time.

use std::collections::BTreeSet;

/// A zero-data tag that can be attached to a method.
///
/// Presence is the only information a marker carries; it is identified
/// by [`Marker::NAME`].
pub trait Marker {
    const NAME: &'static str;
}

/// A declared method: name, declaring type, dispatch kind and markers.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    name: String,
    declaring_type: String,
    overridable: bool,
    markers: BTreeSet<&'static str>,
}

impl MethodDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Whether dispatch to this method can be substituted by the host.
    pub fn is_overridable(&self) -> bool {
        self.overridable
    }

    /// Check if marker `M` is attached to this method.
    pub fn has_marker<M: Marker>(&self) -> bool {
        self.has_marker_named(M::NAME)
    }

    pub fn has_marker_named(&self, marker: &str) -> bool {
        self.markers.contains(marker)
    }

    pub fn markers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.markers.iter().copied()
    }
}

/// A constructible type and the full set of methods it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Start describing a type.
    ///
    /// # Example
    ///
    /// ```
    /// use interception::descriptor::{Marker, TypeDescriptor};
    ///
    /// struct Audited;
    /// impl Marker for Audited {
    ///     const NAME: &'static str = "Audited";
    /// }
    ///
    /// let ty = TypeDescriptor::builder("Account")
    ///     .method("Balance")
    ///     .overridable("Withdraw")
    ///     .mark::<Audited>("Withdraw")
    ///     .build();
    ///
    /// assert!(ty.method("Withdraw").unwrap().has_marker::<Audited>());
    /// assert!(!ty.method("Balance").unwrap().is_overridable());
    /// ```
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Look up a method by name.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Builder for [`TypeDescriptor`].
///
/// Declaring a method twice keeps the first declaration; later calls
/// only add markers or flip it to overridable.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: String,
    methods: Vec<MethodDescriptor>,
}

impl TypeBuilder {
    /// Declare a non-overridable method.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.entry(name.into());
        self
    }

    /// Declare an overridable method.
    pub fn overridable(mut self, name: impl Into<String>) -> Self {
        self.entry(name.into()).overridable = true;
        self
    }

    /// Attach marker `M` to a method, declaring it if needed.
    pub fn mark<M: Marker>(mut self, name: impl Into<String>) -> Self {
        self.entry(name.into()).markers.insert(M::NAME);
        self
    }

    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor {
            name: self.name,
            methods: self.methods,
        }
    }

    fn entry(&mut self, name: String) -> &mut MethodDescriptor {
        let idx = match self.methods.iter().position(|m| m.name == name) {
            Some(idx) => idx,
            None => {
                self.methods.push(MethodDescriptor {
                    name,
                    declaring_type: self.name.clone(),
                    overridable: false,
                    markers: BTreeSet::new(),
                });
                self.methods.len() - 1
            }
        };
        &mut self.methods[idx]
    }
}
