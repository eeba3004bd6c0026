use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use plinth_components::pages::{Create, Index};
use plinth_components::{ComponentCatalog, ComponentRenderer, RenderContext, RenderError};
use plinth_static::{FailurePolicy, PrerenderConfig, PrerenderError, PrerenderPage, Prerenderer};
use plinth_vfs::{FileSystemVirtualFiles, StorageError, VirtualFiles};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn renderer() -> ComponentRenderer {
    ComponentRenderer::new(Arc::new(ComponentCatalog::builtin()))
}

fn config(policy: FailurePolicy) -> PrerenderConfig {
    PrerenderConfig {
        prerender_dir: "/prerender".to_string(),
        base_url: "http://localhost:5000/".to_string(),
        failure_policy: policy,
    }
}

/// Delegates to a local store but fails every write after the first `allowed`.
struct FailingAfter {
    inner: FileSystemVirtualFiles,
    allowed: usize,
    writes: AtomicUsize,
}

#[async_trait]
impl VirtualFiles for FailingAfter {
    fn root_descriptor(&self) -> String {
        self.inner.root_descriptor()
    }

    async fn write_file(&self, path: &str, contents: Bytes) -> Result<(), StorageError> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            return Err(StorageError::Io {
                path: path.to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.write_file(path, contents).await
    }
}

#[tokio::test]
async fn writes_create_page_under_prerender_dir() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("wwwroot");
    let files = Arc::new(FileSystemVirtualFiles::new(&root));

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_page(PrerenderPage::of::<Create>("/create.html"));

    let report = prerenderer.render_all_pages(None).await.unwrap();

    let written = fs::read_to_string(root.join("prerender/create.html")).unwrap();
    let context = RenderContext::from_base_url("http://localhost:5000/")
        .unwrap()
        .for_page("/create.html");
    let direct = renderer().render_type::<Create>(&context, None).await.unwrap();

    assert_eq!(written, direct);
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].path, "/prerender/create.html");
    assert_eq!(report.written[0].bytes, written.len());
}

#[tokio::test]
async fn index_without_lazy_load_renders_complete_markup() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FileSystemVirtualFiles::new(temp.path()));

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_page(PrerenderPage::of::<Index>("/index.html").with_arg("LazyLoad", "false"));

    prerenderer.render_all_pages(None).await.unwrap();

    let html = fs::read_to_string(temp.path().join("prerender/index.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("gallery-grid"));
    assert!(!html.contains("gallery-placeholder"));
    assert!(!html.contains("{{"));
    assert!(!html.contains("{%"));
}

#[tokio::test]
async fn uses_supplied_context() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FileSystemVirtualFiles::new(temp.path()));
    let context = RenderContext::from_base_url("https://cdn.example.com/app/").unwrap();

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_page(PrerenderPage::named("Create", "/create.html"));

    prerenderer.render_all_pages(Some(context)).await.unwrap();

    let html = fs::read_to_string(temp.path().join("prerender/create.html")).unwrap();
    assert!(html.contains(r#"action="https://cdn.example.com/app/create""#));
    assert!(html.contains(r#"<link rel="canonical" href="https://cdn.example.com/app/create.html">"#));
}

#[tokio::test]
async fn each_page_gets_its_own_canonical_url() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FileSystemVirtualFiles::new(temp.path()));

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_pages(plinth_static::default_pages());

    prerenderer.render_all_pages(None).await.unwrap();

    let create = fs::read_to_string(temp.path().join("prerender/create.html")).unwrap();
    assert!(create.contains(r#"<link rel="canonical" href="http://localhost:5000/create.html">"#));
    assert!(!create.contains(r#"<link rel="canonical" href="http://localhost:5000/">"#));

    let index = fs::read_to_string(temp.path().join("prerender/index.html")).unwrap();
    assert!(index.contains(r#"<link rel="canonical" href="http://localhost:5000/index.html">"#));
}

#[tokio::test]
async fn missing_component_aborts_batch_by_default() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FileSystemVirtualFiles::new(temp.path()));

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_page(PrerenderPage::named("DoesNotExist", "/missing.html"))
        .with_page(PrerenderPage::of::<Create>("/create.html"));

    let err = prerenderer.render_all_pages(None).await.unwrap_err();

    match err {
        PrerenderError::Render { path, source } => {
            assert_eq!(path, "/prerender/missing.html");
            assert!(matches!(source, RenderError::ComponentNotFound(ref name) if name == "DoesNotExist"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!temp.path().join("prerender/missing.html").exists());
    assert!(!temp.path().join("prerender/create.html").exists());
}

#[tokio::test]
async fn continue_policy_skips_only_failing_page() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FileSystemVirtualFiles::new(temp.path()));

    let mut prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::Continue));
    prerenderer
        .add_page(PrerenderPage::named("DoesNotExist", "/missing.html"))
        .add_page(PrerenderPage::of::<Create>("/create.html"));

    let report = prerenderer.render_all_pages(None).await.unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].component, "DoesNotExist");
    assert_eq!(report.failures[0].path, "/prerender/missing.html");
    assert_eq!(report.written.len(), 1);
    assert_eq!(report.written[0].component, "Create");
    assert!(temp.path().join("prerender/create.html").exists());
    assert!(!temp.path().join("prerender/missing.html").exists());
}

#[tokio::test]
async fn earlier_pages_stay_written_when_a_later_write_fails() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FailingAfter {
        inner: FileSystemVirtualFiles::new(temp.path()),
        allowed: 1,
        writes: AtomicUsize::new(0),
    });

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_page(PrerenderPage::of::<Index>("/index.html").with_arg("LazyLoad", "false"))
        .with_page(PrerenderPage::of::<Create>("/create.html"));

    let err = prerenderer.render_all_pages(None).await.unwrap_err();

    assert!(matches!(
        err,
        PrerenderError::Storage { ref path, .. } if path == "/prerender/create.html"
    ));
    assert!(temp.path().join("prerender/index.html").exists());
    assert!(!temp.path().join("prerender/create.html").exists());
}

#[tokio::test]
async fn invalid_argument_fails_page_with_conversion_error() {
    let temp = tempdir().unwrap();
    let files = Arc::new(FileSystemVirtualFiles::new(temp.path()));

    let prerenderer = Prerenderer::new(renderer(), files, config(FailurePolicy::FailFast))
        .with_page(PrerenderPage::of::<Index>("/index.html").with_arg("LazyLoad", "sometimes"));

    let err = prerenderer.render_all_pages(None).await.unwrap_err();

    match err {
        PrerenderError::Render {
            source: RenderError::ArgumentConversion { param, .. },
            ..
        } => assert_eq!(param, "LazyLoad"),
        other => panic!("unexpected error: {other}"),
    }
}
