//! Application configuration for Docshelf.
//!
//! User config lives at `~/.docshelf/docshelf.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocshelfError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "docshelf.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".docshelf";

// ---------------------------------------------------------------------------
// Config structs (matching docshelf.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Library manifest settings.
    #[serde(default)]
    pub library: LibraryConfig,

    /// HTTP fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// `[library]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// URL of the library manifest JSON.
    #[serde(default = "default_manifest_url")]
    pub manifest_url: String,

    /// Base URL that manifest hrefs are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Numeric document type codes to keep. Everything else is filtered out.
    #[serde(default = "default_accepted_type_codes")]
    pub accepted_type_codes: Vec<u32>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            manifest_url: default_manifest_url(),
            base_url: default_base_url(),
            accepted_type_codes: default_accepted_type_codes(),
        }
    }
}

fn default_manifest_url() -> String {
    "https://developer.apple.com/library/ios/navigation/library.json".into()
}
fn default_base_url() -> String {
    "https://developer.apple.com/library/ios/navigation/".into()
}
// Codes 3 and 10 denote the "Guide" and "Reference" document kinds.
fn default_accepted_type_codes() -> Vec<u32> {
    vec![3, 10]
}

/// `[fetch]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds. Unset means requests never time out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.docshelf/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DocshelfError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.docshelf/docshelf.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| DocshelfError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DocshelfError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DocshelfError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DocshelfError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DocshelfError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
