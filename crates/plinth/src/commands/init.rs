//! Write a default configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing plinth...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    tracing::info!("Run 'plinth build --debug' to prerender pages locally.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Plinth Configuration

# Write to [storage.local] instead of [storage.remote]
debug = true

[site]
# Base URL used to build absolute links
base_url = "http://localhost:5000/"

# Virtual directory prerendered pages are written under
prerender_dir = "/prerender"

# Keep going when a page fails
continue_on_error = false

# Wrap each component in <!--plinth:Name--> comments
annotate = false

[storage.local]
root = "wwwroot"

# [storage.remote]
# bucket = "cdn"
# endpoint = "https://objects.example.com"
# scheme = "r2"
# token_env = "PLINTH_STORAGE_TOKEN"

[[pages]]
component = "Index"
write_path = "/index.html"
args = { LazyLoad = "false" }

[[pages]]
component = "Create"
write_path = "/create.html"
"#;
