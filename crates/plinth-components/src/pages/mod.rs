//! Built-in pages and the components they are composed of.

pub mod create;
pub mod index;
pub mod layout;

pub use create::{Create, ErrorSummary};
pub use index::{Gallery, Index};
pub use layout::{MainLayout, NavMenu};

use crate::catalog::CatalogBuilder;

/// Register every built-in component, pages first.
pub(crate) fn register(builder: CatalogBuilder) -> CatalogBuilder {
    builder
        .register::<Index>()
        .register::<Create>()
        .register::<MainLayout>()
        .register::<NavMenu>()
        .register::<Gallery>()
        .register::<ErrorSummary>()
}
