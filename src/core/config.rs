//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.safar/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::Purpose;
use crate::core::session::Session;
use crate::core::state::Screen;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SafarConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub user: UserConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UserConfig {
    pub name: Option<String>,
    pub mobile_number: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub start_screen: Option<Screen>,
    pub vehicle_purpose: Option<Purpose>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub session: Session,
    pub start_screen: Screen,
    pub vehicle_purpose: Purpose,
}

/// Values taken from the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub screen: Option<Screen>,
    pub purpose: Option<Purpose>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.safar/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".safar").join("config.toml"))
}

/// Load config from `~/.safar/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SafarConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SafarConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(SafarConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SafarConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(SafarConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: SafarConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Safar Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8080"   # Or set SAFAR_BASE_URL env var
# timeout_secs = 15

# [user]
# name = "Your Name"                   # Or SAFAR_USER_NAME
# mobile_number = "9876543210"         # Or SAFAR_MOBILE
# token = "eyJhbGciOi..."              # Or SAFAR_TOKEN; enables favourites and interest requests

# [ui]
# start_screen = "routes"              # "routes" or "vehicles"
# vehicle_purpose = "rent"             # "rent" or "sell"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SafarConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env<F>(config: &SafarConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("SAFAR_BASE_URL"))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Session identity: env → config
    let user_name = env("SAFAR_USER_NAME")
        .or_else(|| config.user.name.clone())
        .unwrap_or_default();
    let mobile_number = env("SAFAR_MOBILE")
        .or_else(|| config.user.mobile_number.clone())
        .unwrap_or_default();
    let token = env("SAFAR_TOKEN").or_else(|| config.user.token.clone());

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        session: Session::new(&user_name, &mobile_number, token),
        start_screen: cli.screen.or(config.ui.start_screen).unwrap_or_default(),
        vehicle_purpose: cli.purpose.or(config.ui.vehicle_purpose).unwrap_or_default(),
    }
}
