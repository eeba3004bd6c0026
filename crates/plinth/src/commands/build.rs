//! Prerender all configured pages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use plinth_components::{ComponentCatalog, ComponentRenderer, RenderMode};
use plinth_static::Prerenderer;
use plinth_vfs::{FileSystemVirtualFiles, HttpObjectClient, ObjectStoreVirtualFiles, VirtualFiles};

use crate::config::{load_config, ConfigFile};

/// Run the build command.
///
/// `debug` overrides the config's `debug` flag when set.
pub async fn run(
    config_path: &Path,
    debug: Option<bool>,
    root: Option<PathBuf>,
    continue_on_error: bool,
) -> Result<()> {
    tracing::info!("Prerendering pages...");

    let config = load_config(config_path)?;
    let files = open_store(&config, debug.unwrap_or(config.debug), root)?;

    let catalog = Arc::new(ComponentCatalog::builtin());
    tracing::debug!("Loaded {} components", catalog.len());

    let mode = if config.site.annotate {
        RenderMode::Annotated
    } else {
        RenderMode::Static
    };
    let renderer = ComponentRenderer::new(catalog).with_mode(mode);

    let prerenderer = Prerenderer::new(renderer, files, config.prerender_config(continue_on_error))
        .with_pages(config.prerender_pages());

    let report = prerenderer.render_all_pages(None).await?;

    tracing::info!(
        "Wrote {} pages ({} bytes) in {}ms",
        report.written.len(),
        report.total_bytes(),
        report.duration_ms
    );

    if !report.is_success() {
        for failure in &report.failures {
            tracing::error!("{} ({}): {}", failure.path, failure.component, failure.error);
        }
        anyhow::bail!("{} pages failed to prerender", report.failures.len());
    }

    Ok(())
}

/// Local storage in debug mode, remote object storage otherwise.
fn open_store(
    config: &ConfigFile,
    debug: bool,
    root: Option<PathBuf>,
) -> Result<Arc<dyn VirtualFiles>> {
    if debug {
        let root = root.unwrap_or_else(|| config.storage.local.root.clone());
        return Ok(Arc::new(FileSystemVirtualFiles::new(root)));
    }

    let remote = config
        .storage
        .remote
        .as_ref()
        .context("No [storage.remote] configured; add one or build with --debug")?;

    let mut client = HttpObjectClient::new(&remote.endpoint);
    match std::env::var(&remote.token_env) {
        Ok(token) => client = client.with_token(token),
        Err(_) => tracing::warn!("{} is not set, uploading without credentials", remote.token_env),
    }

    let store = ObjectStoreVirtualFiles::new(Arc::new(client), &remote.bucket)
        .with_scheme(&remote.scheme);
    Ok(Arc::new(store))
}
