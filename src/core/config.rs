//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.medimod/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::summary::DEFAULT_GATEWAY;
use crate::core::upload::DEFAULT_MAX_FILE_BYTES;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MedimodConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UploadConfig {
    pub max_file_bytes: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    pub dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

pub const API_URL_ENV: &str = "MEDIMOD_API_URL";
pub const GATEWAY_URL_ENV: &str = "MEDIMOD_GATEWAY_URL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub gateway_url: String,
    pub max_file_bytes: u64,
    pub export_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            gateway_url: DEFAULT_GATEWAY.to_string(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            export_dir: PathBuf::from("."),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.medimod/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".medimod").join("config.toml"))
}

/// Load config from `~/.medimod/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MedimodConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MedimodConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(MedimodConfig::default());
    };
    load_config_from(&path)
}

/// Load config from an explicit path. See [`load_config`].
pub fn load_config_from(path: &Path) -> Result<MedimodConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(MedimodConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MedimodConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_FILE: &str = r#"# MediMod Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:3000"      # Or set MEDIMOD_API_URL, or pass --api-url

# [gateway]
# base_url = "https://ipfs.io/ipfs/"      # Or set MEDIMOD_GATEWAY_URL

# [upload]
# max_file_bytes = 10485760               # 10 MiB

# [export]
# dir = "~/Documents"                     # Where Ctrl+D writes summaries
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_FILE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_api_url` is the `--api-url` flag (None = not specified).
pub fn resolve(config: &MedimodConfig, cli_api_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_api_url, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &MedimodConfig,
    cli_api_url: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    // API base URL: CLI → env → config → default
    let api_base_url = cli_api_url
        .map(|s| s.to_string())
        .or_else(|| env(API_URL_ENV))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or(defaults.api_base_url);

    // Gateway: env → config → default
    let gateway_url = env(GATEWAY_URL_ENV)
        .or_else(|| config.gateway.base_url.clone())
        .unwrap_or(defaults.gateway_url);

    let export_dir = config
        .export
        .dir
        .as_deref()
        .map(expand_home)
        .unwrap_or(defaults.export_dir);

    ResolvedConfig {
        api_base_url,
        gateway_url,
        max_file_bytes: config
            .upload
            .max_file_bytes
            .unwrap_or(defaults.max_file_bytes),
        export_dir,
    }
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&MedimodConfig::default(), None, no_env);
        assert_eq!(resolved, ResolvedConfig::default());
        assert_eq!(resolved.api_base_url, "http://localhost:3000");
        assert_eq!(resolved.gateway_url, "https://ipfs.io/ipfs/");
        assert_eq!(resolved.max_file_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MedimodConfig {
            api: ApiConfig {
                base_url: Some("https://medimod.example".to_string()),
            },
            gateway: GatewayConfig {
                base_url: Some("https://gw.example/ipfs/".to_string()),
            },
            upload: UploadConfig {
                max_file_bytes: Some(1024),
            },
            export: ExportConfig {
                dir: Some("/tmp/exports".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, None, no_env);
        assert_eq!(resolved.api_base_url, "https://medimod.example");
        assert_eq!(resolved.gateway_url, "https://gw.example/ipfs/");
        assert_eq!(resolved.max_file_bytes, 1024);
        assert_eq!(resolved.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config = MedimodConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            API_URL_ENV => Some("http://from-env".to_string()),
            GATEWAY_URL_ENV => Some("http://gw-env/".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, None, env);
        assert_eq!(resolved.api_base_url, "http://from-env");
        assert_eq!(resolved.gateway_url, "http://gw-env/");

        let resolved = resolve_with_env(&config, Some("http://from-cli"), env);
        assert_eq!(resolved.api_base_url, "http://from-cli");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[gateway]
base_url = "https://dweb.link/ipfs/"
"#;
        let config: MedimodConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.gateway.base_url.as_deref(),
            Some("https://dweb.link/ipfs/")
        );
        assert!(config.api.base_url.is_none());
        assert!(config.upload.max_file_bytes.is_none());
    }

    #[test]
    fn test_generated_default_parses_to_defaults() {
        let config: MedimodConfig = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        let resolved = resolve_with_env(&config, None, no_env);
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn test_missing_file_is_generated() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(".medimod").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.api.base_url.is_none());
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/exports"), home.join("exports"));
        }
    }
}
