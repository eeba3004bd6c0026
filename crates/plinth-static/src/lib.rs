//! Prerenders a fixed list of pages into a virtual file store.
//!
//! Each [`PrerenderPage`] names a component, the path it is written to and
//! optional arguments. [`Prerenderer::render_all_pages`] renders them in order
//! through a [`plinth_components::ComponentRenderer`] and writes the markup
//! under the configured prerender directory.

pub mod page;
pub mod prerender;
pub mod report;

pub use page::{default_pages, FailurePolicy, PrerenderConfig, PrerenderPage};
pub use prerender::{PrerenderError, Prerenderer};
pub use report::{PageFailure, PrerenderReport, WrittenPage};
