//! Component catalog and static HTML renderer.
//!
//! Components are Rust types registered in a [`ComponentCatalog`] by simple
//! and fully-qualified name. The [`ComponentRenderer`] resolves a component,
//! coerces loosely-typed arguments into its declared parameters and awaits the
//! render of the whole component tree into a single HTML string.

pub mod catalog;
pub mod coerce;
pub mod component;
pub mod context;
pub mod error;
pub mod pages;
pub mod renderer;
pub mod templates;
pub mod value;

pub use catalog::{CatalogBuilder, ComponentCatalog};
pub use coerce::{coerce, convert};
pub use component::{
    Component, ComponentDescriptor, ComponentError, ComponentRef, ComponentType, Param, ParamInfo,
};
pub use context::RenderContext;
pub use error::RenderError;
pub use renderer::{ComponentRenderer, RenderMode, RenderScope};
pub use templates::TemplateEngine;
pub use value::{Args, ParamKind, ParamValue, Parameters, RawValue};
