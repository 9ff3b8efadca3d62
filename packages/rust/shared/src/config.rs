//! Application configuration for mdpress.
//!
//! User config lives at `~/.mdpress/mdpress.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MdpressError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "mdpress.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".mdpress";

// ---------------------------------------------------------------------------
// Config structs (matching mdpress.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Page template settings.
    #[serde(default)]
    pub template: TemplateConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Path to a stylesheet used when `--css` is not given.
    /// Empty means the bundled default stylesheet.
    #[serde(default)]
    pub stylesheet: String,
}

/// `[template]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Include highlight.js link/script tags in the page head.
    #[serde(default = "default_true")]
    pub highlight_js: bool,

    /// highlight.js version used in the CDN URLs.
    #[serde(default = "default_highlight_version")]
    pub highlight_version: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            highlight_js: true,
            highlight_version: default_highlight_version(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_highlight_version() -> String {
    "9.18.1".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.mdpress/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MdpressError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.mdpress/mdpress.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| MdpressError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| MdpressError::config(format!("failed to parse {}: {e}", path.display())))
}
