//! Outcome of a prerender batch.

use crate::prerender::PrerenderError;

/// A page that was rendered and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    pub component: String,
    /// Full virtual path, including the prerender directory
    pub path: String,
    pub bytes: usize,
}

/// A page skipped under [`crate::FailurePolicy::Continue`].
#[derive(Debug)]
pub struct PageFailure {
    pub component: String,
    pub path: String,
    pub error: PrerenderError,
}

/// Result of [`crate::Prerenderer::render_all_pages`].
#[derive(Debug, Default)]
pub struct PrerenderReport {
    /// Pages written, in registration order
    pub written: Vec<WrittenPage>,

    pub failures: Vec<PageFailure>,

    /// Total batch time in milliseconds
    pub duration_ms: u64,
}

impl PrerenderReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.written.iter().map(|page| page.bytes).sum()
    }
}
