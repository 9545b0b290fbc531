//! Application configuration for SliceVote.
//!
//! User config lives at `~/.slicevote/slicevote.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SliceVoteError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "slicevote.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".slicevote";

// ---------------------------------------------------------------------------
// Config structs (matching slicevote.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiSection,
}

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    /// Absolute base URL all relative resource paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the env var holding the admin bearer token
    /// (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".into()
}
fn default_token_env() -> String {
    "SLICEVOTE_ADMIN_TOKEN".into()
}

// ---------------------------------------------------------------------------
// Api config (runtime, validated)
// ---------------------------------------------------------------------------

/// Validated runtime API configuration, passed into the client at
/// construction. Read-only for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Parsed absolute base URL.
    pub base_url: Url,
}

impl ApiConfig {
    /// Build an `ApiConfig` from a base URL string, validating that it is
    /// an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            SliceVoteError::config(format!("invalid api base URL {base_url:?}: {e}"))
        })?;
        Ok(Self { base_url })
    }
}

impl TryFrom<&AppConfig> for ApiConfig {
    type Error = SliceVoteError;

    fn try_from(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api.base_url)
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.slicevote/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| SliceVoteError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.slicevote/slicevote.toml`).
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
    let content = std::fs::read_to_string(path).map_err(|e| SliceVoteError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SliceVoteError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SliceVoteError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SliceVoteError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SliceVoteError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the admin bearer token from the configured env var, if set.
pub fn admin_token(config: &AppConfig) -> Option<String> {
    match std::env::var(&config.api.token_env) {
        Ok(val) if !val.is_empty() => Some(val),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("SLICEVOTE_ADMIN_TOKEN"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.api.base_url, "http://localhost:8080/api");
        assert_eq!(parsed.api.token_env, "SLICEVOTE_ADMIN_TOKEN");
    }

    #[test]
    fn api_config_from_app_config() {
        let toml_str = r#"
[api]
base_url = "http://api.example.com/"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        let api = ApiConfig::try_from(&config).expect("valid base URL");
        assert_eq!(api.base_url.as_str(), "http://api.example.com/");
    }

    #[test]
    fn api_config_rejects_relative_base() {
        let result = ApiConfig::new("not-a-url");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid api base URL"));
    }

    #[test]
    fn admin_token_absent_env() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.api.token_env = "SV_TEST_NONEXISTENT_TOKEN_12345".into();
        assert!(admin_token(&config).is_none());
    }
}
