//! Configuration file (plinth.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plinth_components::Args;
use plinth_static::{default_pages, FailurePolicy, PrerenderConfig, PrerenderPage};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Write to local storage instead of remote
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Pages to prerender; empty means the built-in page list
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_prerender_dir")]
    pub prerender_dir: String,
    #[serde(default)]
    pub continue_on_error: bool,
    /// Wrap each component in boundary comments
    #[serde(default)]
    pub annotate: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub local: LocalStorage,
    pub remote: Option<RemoteStorage>,
}

#[derive(Debug, Deserialize)]
pub struct LocalStorage {
    #[serde(default = "default_local_root")]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct RemoteStorage {
    pub bucket: String,
    pub endpoint: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Deserialize)]
pub struct PageEntry {
    pub component: String,
    pub write_path: String,
    #[serde(default)]
    pub args: Args,
}

fn default_base_url() -> String {
    "http://localhost:5000/".to_string()
}
fn default_prerender_dir() -> String {
    "/prerender".to_string()
}
fn default_local_root() -> PathBuf {
    PathBuf::from("wwwroot")
}
fn default_scheme() -> String {
    "r2".to_string()
}
fn default_token_env() -> String {
    "PLINTH_STORAGE_TOKEN".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prerender_dir: default_prerender_dir(),
            continue_on_error: false,
            annotate: false,
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self {
            root: default_local_root(),
        }
    }
}

impl ConfigFile {
    /// Pages to prerender, in declaration order.
    pub fn prerender_pages(&self) -> Vec<PrerenderPage> {
        if self.pages.is_empty() {
            return default_pages();
        }

        self.pages
            .iter()
            .map(|entry| {
                let page = PrerenderPage::named(&entry.component, &entry.write_path);
                if entry.args.is_empty() {
                    page
                } else {
                    page.with_args(entry.args.clone())
                }
            })
            .collect()
    }

    pub fn prerender_config(&self, continue_on_error: bool) -> PrerenderConfig {
        let failure_policy = if continue_on_error || self.site.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::FailFast
        };

        PrerenderConfig {
            prerender_dir: self.site.prerender_dir.clone(),
            base_url: self.site.base_url.clone(),
            failure_policy,
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
