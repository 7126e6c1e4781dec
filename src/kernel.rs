//! The interception host.
//!
//! A [`Kernel`] knows which types are constructible and which interceptors
//! attach to them. Selection rules run when a type or an interception is
//! registered; resolution only looks the result up.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::advice::{Intercepted, Interceptor};
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::output::{OutputSink, Stdout};
use crate::registration::{BindingBuilder, InterceptBuilder, Module};
use crate::selection::SelectionRule;

/// A type the kernel can construct.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Methods declared by the type, with their markers.
    fn descriptor() -> TypeDescriptor;

    /// Build an instance, resolving collaborators from the kernel.
    fn construct(kernel: &Kernel) -> Result<Self>;
}

pub(crate) type Factory<T> = Arc<dyn Fn(&Kernel) -> Result<T> + Send + Sync>;

struct Binding {
    descriptor: Arc<TypeDescriptor>,
    /// `Factory<T>` for the bound `T`.
    factory: Box<dyn Any + Send + Sync>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

struct InterceptionBinding {
    rule: Box<dyn SelectionRule>,
    interceptor: Arc<dyn Interceptor>,
}

/// Registry of type bindings and interception bindings.
pub struct Kernel {
    bindings: HashMap<TypeId, Binding>,
    interceptions: Vec<InterceptionBinding>,
    output: Arc<dyn OutputSink>,
}

impl Kernel {
    /// Create an empty kernel writing progress lines to stdout.
    pub fn new() -> Self {
        Self::with_output(Arc::new(Stdout))
    }

    /// Create an empty kernel writing progress lines to `output`.
    pub fn with_output(output: Arc<dyn OutputSink>) -> Self {
        Self {
            bindings: HashMap::new(),
            interceptions: Vec::new(),
            output,
        }
    }

    /// Create a kernel writing to stdout and load `modules` in order.
    pub fn with_modules(modules: &[&dyn Module]) -> Result<Self> {
        let mut kernel = Self::new();
        for module in modules {
            kernel.load(*module)?;
        }
        Ok(kernel)
    }

    /// Apply a module's bindings.
    pub fn load(&mut self, module: &dyn Module) -> Result<&mut Self> {
        info!(module = module.name(), "loading module");
        module.load(self)?;
        Ok(self)
    }

    /// Sink shared by interceptors and resolved instances.
    pub fn output(&self) -> Arc<dyn OutputSink> {
        Arc::clone(&self.output)
    }

    /// Start binding `T`.
    pub fn bind<T: Injectable>(&mut self) -> BindingBuilder<'_, T> {
        BindingBuilder::new(self)
    }

    /// Start registering an interceptor for types selected by `rule`.
    pub fn intercept(&mut self, rule: impl SelectionRule + 'static) -> InterceptBuilder<'_> {
        InterceptBuilder::new(self, Box::new(rule))
    }

    /// Resolve an instance of `T`, wrapped with its matched interceptors.
    pub fn get<T: Injectable>(&self) -> Result<Intercepted<T>> {
        let binding = self.binding::<T>()?;
        let factory = binding
            .factory
            .downcast_ref::<Factory<T>>()
            .ok_or(Error::Unbound {
                type_name: std::any::type_name::<T>(),
            })?;

        let instance = factory(self)?;
        debug!(
            type_name = binding.descriptor.name(),
            interceptors = binding.interceptors.len(),
            "resolved"
        );

        Ok(Intercepted::new(
            instance,
            Arc::clone(&binding.descriptor),
            binding.interceptors.clone(),
            self.output(),
        ))
    }

    pub fn is_bound<T: Injectable>(&self) -> bool {
        self.bindings.contains_key(&TypeId::of::<T>())
    }

    /// Whether any interceptor was matched for `T`.
    pub fn is_intercepted<T: Injectable>(&self) -> Result<bool> {
        Ok(!self.binding::<T>()?.interceptors.is_empty())
    }

    /// Names of the interceptors matched for `T`, in registration order.
    pub fn interceptors_for<T: Injectable>(&self) -> Result<Vec<&'static str>> {
        Ok(self
            .binding::<T>()?
            .interceptors
            .iter()
            .map(|i| i.name())
            .collect())
    }

    fn binding<T: Injectable>(&self) -> Result<&Binding> {
        self.bindings
            .get(&TypeId::of::<T>())
            .ok_or(Error::Unbound {
                type_name: std::any::type_name::<T>(),
            })
    }

    pub(crate) fn add_binding<T: Injectable>(&mut self, factory: Factory<T>) {
        let descriptor = Arc::new(T::descriptor());
        let interceptors: Vec<Arc<dyn Interceptor>> = self
            .interceptions
            .iter()
            .filter(|ib| ib.rule.matches(&descriptor))
            .map(|ib| Arc::clone(&ib.interceptor))
            .collect();

        debug!(
            type_name = descriptor.name(),
            interceptors = interceptors.len(),
            "bound"
        );

        let previous = self.bindings.insert(
            TypeId::of::<T>(),
            Binding {
                descriptor,
                factory: Box::new(factory),
                interceptors,
            },
        );
        if previous.is_some() {
            debug!(type_name = std::any::type_name::<T>(), "binding replaced");
        }
    }

    pub(crate) fn add_interception(
        &mut self,
        rule: Box<dyn SelectionRule>,
        interceptor: Arc<dyn Interceptor>,
    ) {
        for binding in self.bindings.values_mut() {
            if rule.matches(&binding.descriptor) {
                debug!(
                    type_name = binding.descriptor.name(),
                    interceptor = interceptor.name(),
                    "interceptor attached"
                );
                binding.interceptors.push(Arc::clone(&interceptor));
            }
        }
        self.interceptions
            .push(InterceptionBinding { rule, interceptor });
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::new()
    }
}
