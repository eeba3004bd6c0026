//! Component traits and the type-erased descriptors stored in a catalog.

use std::any::TypeId;
use std::fmt;

use async_trait::async_trait;

use crate::renderer::RenderScope;
use crate::value::{ParamKind, ParamValue, Parameters};

/// Error raised by a component's own render logic.
pub type ComponentError = Box<dyn std::error::Error + Send + Sync>;

/// A renderable unit of markup.
#[async_trait]
pub trait Component: Send + Sync {
    /// Write this component's markup into the scope.
    ///
    /// Child components rendered through the scope are awaited in place, so
    /// the returned future only resolves once the whole subtree is done.
    async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError>;
}

/// A declared, settable component parameter.
pub struct Param<C> {
    /// Parameter name, matched case-sensitively against argument keys
    pub name: &'static str,

    /// Declared type
    pub kind: ParamKind,

    /// Applies an already-converted value to the component
    pub set: fn(&mut C, &ParamValue),
}

/// A component type that can be registered in a catalog.
///
/// `Default` acts as the factory: the descriptor starts from the default
/// value and applies each supplied parameter through its setter.
pub trait ComponentType: Component + Default + 'static {
    /// Simple name, e.g. "Index"
    const NAME: &'static str;

    /// Fully-qualified name, e.g. "plinth_components::pages::index::Index"
    const QUALIFIED_NAME: &'static str;

    /// Declared parameters.
    fn params() -> &'static [Param<Self>];
}

/// Name and kind of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub kind: ParamKind,
}

/// A type-erased catalog entry.
pub struct ComponentDescriptor {
    type_id: TypeId,
    simple_name: &'static str,
    qualified_name: &'static str,
    params: Vec<ParamInfo>,
    factory: fn(&Parameters) -> Box<dyn Component>,
}

impl ComponentDescriptor {
    /// Describe a component type.
    pub fn of<C: ComponentType>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            simple_name: C::NAME,
            qualified_name: C::QUALIFIED_NAME,
            params: C::params()
                .iter()
                .map(|p| ParamInfo {
                    name: p.name,
                    kind: p.kind,
                })
                .collect(),
            factory: instantiate_boxed::<C>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn simple_name(&self) -> &'static str {
        self.simple_name
    }

    pub fn qualified_name(&self) -> &'static str {
        self.qualified_name
    }

    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Look up a declared parameter by exact name.
    pub fn param(&self, name: &str) -> Option<&ParamInfo> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Create a component instance with the given parameters applied.
    pub fn instantiate(&self, params: &Parameters) -> Box<dyn Component> {
        (self.factory)(params)
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("simple_name", &self.simple_name)
            .field("qualified_name", &self.qualified_name)
            .field("params", &self.params)
            .finish()
    }
}

/// Build a component from its default value plus the supplied parameters.
pub(crate) fn instantiate<C: ComponentType>(params: &Parameters) -> C {
    let mut component = C::default();
    for param in C::params() {
        if let Some(value) = params.get(param.name) {
            (param.set)(&mut component, value);
        }
    }
    component
}

fn instantiate_boxed<C: ComponentType>(params: &Parameters) -> Box<dyn Component> {
    Box::new(instantiate::<C>(params))
}

/// A reference to a component, either by type or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentRef {
    /// A concrete component type
    Type {
        type_id: TypeId,
        qualified_name: &'static str,
    },
    /// A simple or fully-qualified name, resolved through the catalog
    Name(String),
}

impl ComponentRef {
    pub fn of<C: ComponentType>() -> Self {
        ComponentRef::Type {
            type_id: TypeId::of::<C>(),
            qualified_name: C::QUALIFIED_NAME,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        ComponentRef::Name(name.into())
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Type { qualified_name, .. } => f.write_str(qualified_name),
            ComponentRef::Name(name) => f.write_str(name),
        }
    }
}
