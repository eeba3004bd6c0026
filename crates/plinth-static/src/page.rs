//! Page list and batch configuration.

use plinth_components::pages::{Create, Index};
use plinth_components::{Args, ComponentRef, ComponentType, RawValue};

/// What to do when a page fails to render or write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the batch on the first failure
    #[default]
    FailFast,
    /// Record the failure and move on to the next page
    Continue,
}

/// Configuration for a prerender batch.
#[derive(Debug, Clone)]
pub struct PrerenderConfig {
    /// Virtual directory every write path is joined onto
    pub prerender_dir: String,

    /// Base URL used when no render context is supplied
    pub base_url: String,

    pub failure_policy: FailurePolicy,
}

impl Default for PrerenderConfig {
    fn default() -> Self {
        Self {
            prerender_dir: "/prerender".to_string(),
            base_url: "http://localhost:5000/".to_string(),
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

/// A component rendered to a fixed output path.
#[derive(Debug, Clone, PartialEq)]
pub struct PrerenderPage {
    pub component: ComponentRef,
    pub write_path: String,
    pub args: Option<Args>,
}

impl PrerenderPage {
    pub fn new(component: ComponentRef, write_path: impl Into<String>) -> Self {
        Self {
            component,
            write_path: write_path.into(),
            args: None,
        }
    }

    /// A page rendering component type `C`.
    pub fn of<C: ComponentType>(write_path: impl Into<String>) -> Self {
        Self::new(ComponentRef::of::<C>(), write_path)
    }

    /// A page rendering the component registered under `name`.
    pub fn named(name: impl Into<String>, write_path: impl Into<String>) -> Self {
        Self::new(ComponentRef::named(name), write_path)
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.args
            .get_or_insert_with(Args::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_args(mut self, args: Args) -> Self {
        self.args = Some(args);
        self
    }
}

/// The site's built-in page list.
pub fn default_pages() -> Vec<PrerenderPage> {
    vec![
        PrerenderPage::of::<Index>("/index.html").with_arg("LazyLoad", "false"),
        PrerenderPage::of::<Create>("/create.html"),
    ]
}
