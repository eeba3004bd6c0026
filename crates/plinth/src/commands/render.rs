//! Render a single component to stdout.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use plinth_components::{
    Args, ComponentCatalog, ComponentRenderer, RawValue, RenderContext, RenderMode,
};

use crate::config::load_config;

/// Parse a `KEY=VALUE` argument. Values are read as JSON scalars when
/// possible (`false`, `4`, `0.5`), otherwise taken as a string.
pub fn parse_arg(s: &str) -> Result<(String, RawValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }

    let value = serde_json::from_str::<RawValue>(value)
        .unwrap_or_else(|_| RawValue::String(value.to_string()));

    Ok((key.to_string(), value))
}

/// Run the render command.
pub async fn run(
    config_path: &Path,
    component: &str,
    args: Vec<(String, RawValue)>,
    base_url: Option<String>,
    annotate: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let base_url = base_url.unwrap_or(config.site.base_url);

    let context = RenderContext::from_base_url(&base_url)
        .with_context(|| format!("Invalid base URL {base_url}"))?;

    let mode = if annotate || config.site.annotate {
        RenderMode::Annotated
    } else {
        RenderMode::Static
    };
    let renderer = ComponentRenderer::new(Arc::new(ComponentCatalog::builtin())).with_mode(mode);

    let args: Args = args.into_iter().collect();
    let html = renderer
        .render_named(component, &context, Some(&args))
        .await
        .with_context(|| format!("Failed to render {component}"))?;

    println!("{html}");
    Ok(())
}
