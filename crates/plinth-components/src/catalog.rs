//! Component catalog for looking up component types by name.
//!
//! The catalog is assembled once through `CatalogBuilder` and is read-only
//! afterwards. Lookups by simple name return the first registered match.

use std::any::TypeId;

use crate::component::{ComponentDescriptor, ComponentRef, ComponentType};
use crate::error::RenderError;

/// Separator between module path segments in a qualified name.
pub const QUALIFIER_SEPARATOR: &str = "::";

/// An immutable catalog of component descriptors.
#[derive(Debug, Default)]
pub struct ComponentCatalog {
    /// Descriptors in registration order
    components: Vec<ComponentDescriptor>,
}

/// Collects component types before freezing them into a catalog.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    components: Vec<ComponentDescriptor>,
}

impl CatalogBuilder {
    /// Register a component type. Registering the same type twice is a no-op.
    pub fn register<C: ComponentType>(mut self) -> Self {
        let type_id = TypeId::of::<C>();
        if self.components.iter().any(|c| c.type_id() == type_id) {
            tracing::debug!("Component {} already registered", C::QUALIFIED_NAME);
            return self;
        }
        self.components.push(ComponentDescriptor::of::<C>());
        self
    }

    pub fn build(self) -> ComponentCatalog {
        ComponentCatalog {
            components: self.components,
        }
    }
}

impl ComponentCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// A catalog holding every built-in page and component.
    pub fn builtin() -> Self {
        crate::pages::register(Self::builder()).build()
    }

    /// Look up a component by simple or fully-qualified name.
    ///
    /// Names without a `::` qualifier match the simple name, otherwise only
    /// the qualified name is compared.
    pub fn get(&self, name: &str) -> Option<&ComponentDescriptor> {
        if name.contains(QUALIFIER_SEPARATOR) {
            self.components.iter().find(|c| c.qualified_name() == name)
        } else {
            self.components.iter().find(|c| c.simple_name() == name)
        }
    }

    /// Like [`ComponentCatalog::get`], failing with `ComponentNotFound`.
    pub fn resolve(&self, name: &str) -> Result<&ComponentDescriptor, RenderError> {
        self.get(name)
            .ok_or_else(|| RenderError::ComponentNotFound(name.to_string()))
    }

    /// Look up a component by its Rust type.
    pub fn resolve_type(&self, type_id: TypeId) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.type_id() == type_id)
    }

    /// Resolve a type or name reference.
    pub fn resolve_ref(&self, component: &ComponentRef) -> Result<&ComponentDescriptor, RenderError> {
        match component {
            ComponentRef::Type {
                type_id,
                qualified_name,
            } => self
                .resolve_type(*type_id)
                .ok_or_else(|| RenderError::ComponentNotFound(qualified_name.to_string())),
            ComponentRef::Name(name) => self.resolve(name),
        }
    }

    /// Check if a component exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDescriptor> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, ComponentError, Param};
    use crate::pages::{Create, Index};
    use crate::renderer::RenderScope;
    use async_trait::async_trait;

    mod shadow {
        use super::*;

        /// A second component whose simple name collides with the built-in one.
        #[derive(Default)]
        pub struct Index;

        #[async_trait]
        impl Component for Index {
            async fn render(&self, scope: &mut RenderScope<'_>) -> Result<(), ComponentError> {
                scope.write_raw("<p>shadow</p>");
                Ok(())
            }
        }

        impl ComponentType for Index {
            const NAME: &'static str = "Index";
            const QUALIFIED_NAME: &'static str = concat!(module_path!(), "::Index");

            fn params() -> &'static [Param<Self>] {
                &[]
            }
        }
    }

    #[test]
    fn resolves_simple_name_to_first_registered() {
        let catalog = ComponentCatalog::builder()
            .register::<shadow::Index>()
            .register::<Index>()
            .build();

        let found = catalog.resolve("Index").unwrap();
        assert_eq!(found.qualified_name(), shadow::Index::QUALIFIED_NAME);

        let reversed = ComponentCatalog::builder()
            .register::<Index>()
            .register::<shadow::Index>()
            .build();
        assert_eq!(
            reversed.resolve("Index").unwrap().qualified_name(),
            Index::QUALIFIED_NAME
        );
    }

    #[test]
    fn qualified_names_never_fall_back_to_simple_names() {
        let catalog = ComponentCatalog::builder().register::<Index>().build();

        assert!(catalog.resolve(Index::QUALIFIED_NAME).is_ok());
        assert!(catalog.resolve("other::module::Index").is_err());
        assert!(catalog.resolve("plinth_components::Index").is_err());
    }

    #[test]
    fn missing_component_is_not_found() {
        let catalog = ComponentCatalog::builtin();

        let err = catalog.resolve("DoesNotExist").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Component not found: DoesNotExist");
    }

    #[test]
    fn resolves_type_references() {
        let catalog = ComponentCatalog::builder().register::<Index>().build();

        assert!(catalog.resolve_ref(&ComponentRef::of::<Index>()).is_ok());
        let err = catalog.resolve_ref(&ComponentRef::of::<Create>()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn ignores_duplicate_registration() {
        let catalog = ComponentCatalog::builder()
            .register::<Index>()
            .register::<Index>()
            .build();

        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn builtin_catalog_contains_pages() {
        let catalog = ComponentCatalog::builtin();

        assert!(catalog.contains("Index"));
        assert!(catalog.contains("Create"));
        assert!(catalog.contains("MainLayout"));
        assert!(catalog.contains("plinth_components::pages::create::ErrorSummary"));
    }
}
