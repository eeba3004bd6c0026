//! Batch prerenderer.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use plinth_components::{ComponentRenderer, RenderContext, RenderError};
use plinth_vfs::{combine_paths, StorageError, VirtualFiles};

use crate::page::{FailurePolicy, PrerenderConfig, PrerenderPage};
use crate::report::{PageFailure, PrerenderReport, WrittenPage};

/// Errors that can occur while prerendering.
#[derive(Debug, thiserror::Error)]
pub enum PrerenderError {
    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: RenderError,
    },

    #[error("Failed to store {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: StorageError,
    },
}

/// Renders a list of pages and writes them to a virtual file store.
pub struct Prerenderer {
    renderer: ComponentRenderer,
    files: Arc<dyn VirtualFiles>,
    config: PrerenderConfig,
    pages: Vec<PrerenderPage>,
}

impl Prerenderer {
    pub fn new(
        renderer: ComponentRenderer,
        files: Arc<dyn VirtualFiles>,
        config: PrerenderConfig,
    ) -> Self {
        Self {
            renderer,
            files,
            config,
            pages: Vec::new(),
        }
    }

    pub fn add_page(&mut self, page: PrerenderPage) -> &mut Self {
        self.pages.push(page);
        self
    }

    pub fn with_page(mut self, page: PrerenderPage) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_pages(mut self, pages: impl IntoIterator<Item = PrerenderPage>) -> Self {
        self.pages.extend(pages);
        self
    }

    pub fn pages(&self) -> &[PrerenderPage] {
        &self.pages
    }

    pub fn config(&self) -> &PrerenderConfig {
        &self.config
    }

    /// Virtual path a page is written to.
    pub fn output_path(&self, page: &PrerenderPage) -> String {
        combine_paths(&self.config.prerender_dir, &page.write_path)
    }

    /// Render every registered page, in order, and write it to the store.
    ///
    /// Without a `context`, one is built from the configured base URL. Each
    /// page renders with the context's path set to its write path.
    pub async fn render_all_pages(
        &self,
        context: Option<RenderContext>,
    ) -> Result<PrerenderReport, PrerenderError> {
        let start = Instant::now();

        let context = match context {
            Some(context) => context,
            None => RenderContext::from_base_url(&self.config.base_url).map_err(|source| {
                PrerenderError::InvalidBaseUrl {
                    url: self.config.base_url.clone(),
                    source,
                }
            })?,
        };

        self.warn_duplicate_paths();

        let root = self.files.root_descriptor();
        let mut report = PrerenderReport::default();

        for page in &self.pages {
            let component = self.display_name(page);
            let path = self.output_path(page);

            tracing::info!("Prerendering {} to {}{}", component, root, path);

            let page_context = context.for_page(&page.write_path);
            match self.render_page(page, &page_context, &path).await {
                Ok(bytes) => report.written.push(WrittenPage {
                    component,
                    path,
                    bytes,
                }),
                Err(error) => match self.config.failure_policy {
                    FailurePolicy::FailFast => return Err(error),
                    FailurePolicy::Continue => {
                        tracing::warn!("Skipping {}: {}", path, error);
                        report.failures.push(PageFailure {
                            component,
                            path,
                            error,
                        });
                    }
                },
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Prerendered {} pages ({} failed) in {}ms",
            report.written.len(),
            report.failures.len(),
            report.duration_ms
        );

        Ok(report)
    }

    async fn render_page(
        &self,
        page: &PrerenderPage,
        context: &RenderContext,
        path: &str,
    ) -> Result<usize, PrerenderError> {
        let html = self
            .renderer
            .render(&page.component, context, page.args.as_ref())
            .await
            .map_err(|source| PrerenderError::Render {
                path: path.to_string(),
                source,
            })?;

        let bytes = html.len();
        self.files
            .write_file(path, Bytes::from(html))
            .await
            .map_err(|source| PrerenderError::Storage {
                path: path.to_string(),
                source,
            })?;

        tracing::debug!("Wrote {} ({} bytes)", path, bytes);
        Ok(bytes)
    }

    /// Simple name of a page's component when it resolves, else the reference as given.
    fn display_name(&self, page: &PrerenderPage) -> String {
        match self.renderer.catalog().resolve_ref(&page.component) {
            Ok(descriptor) => descriptor.simple_name().to_string(),
            Err(_) => page.component.to_string(),
        }
    }

    fn warn_duplicate_paths(&self) {
        let mut seen = HashSet::new();
        for page in &self.pages {
            let path = self.output_path(page);
            if !seen.insert(path.clone()) {
                tracing::warn!("Duplicate prerender path {}, later page overwrites it", path);
            }
        }
    }
}
