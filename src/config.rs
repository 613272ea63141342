//! Configuration management for the playlist exporter.
//!
//! Values come from the process environment, optionally seeded from `.env`
//! files, and are collected into plain settings structs that get passed
//! down to the API and export layers. Nothing here is global mutable state.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current directory
//! 3. `.env` in the local data directory
//! 4. Built-in defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use url::Url;

use crate::{error::ConfigError, types::Credentials};

pub const APP_NAME: &str = "playlist-export";

pub const DEFAULT_API_URL: &str = "https://openapi.tidal.com";
pub const DEFAULT_AUTH_URL: &str = "https://auth.tidal.com/v1/oauth2/token";
pub const DEFAULT_API_VERSION: &str = "/v2";
pub const DEFAULT_COUNTRY_CODE: &str = "US";
pub const DEFAULT_INCLUDE: &str = "items";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 250;
pub const DEFAULT_MAX_RETRIES: u32 = 5;
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 5;
pub const DEFAULT_RETRY_AFTER_DIVISOR: u32 = 3;
pub const DEFAULT_CHECKPOINT_EVERY: usize = 5;

/// Loads environment variables from `.env` files.
///
/// Reads `./.env` first, then `<data_local_dir>/playlist-export/.env`.
/// `dotenv` never overrides variables that are already set, so the process
/// environment always wins. Missing files are fine; the data directory is
/// created so users know where to put theirs.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/playlist-export/.env`
/// - macOS: `~/Library/Application Support/playlist-export/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-export/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let _ = dotenv::dotenv();

    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(format!("{APP_NAME}/.env"));
    path
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn url_or_default(var: &'static str, default: &str) -> Result<Url, ConfigError> {
    let raw = env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}

/// Returns the API client id from `TIDAL_CLIENT_ID`.
pub fn client_id() -> Result<String, ConfigError> {
    required("TIDAL_CLIENT_ID")
}

/// Returns the API client secret from `TIDAL_CLIENT_SECRET`.
///
/// The secret should never end up in logs or version control.
pub fn client_secret() -> Result<String, ConfigError> {
    required("TIDAL_CLIENT_SECRET")
}

/// Both credentials, or the first one that is missing.
pub fn credentials() -> Result<Credentials, ConfigError> {
    Ok(Credentials {
        client_id: client_id()?,
        client_secret: client_secret()?,
    })
}

/// Catalog API base, overridable with `TIDAL_API_URL`.
pub fn api_url() -> Result<Url, ConfigError> {
    url_or_default("TIDAL_API_URL", DEFAULT_API_URL)
}

/// Token endpoint, overridable with `TIDAL_AUTH_URL`.
pub fn auth_url() -> Result<Url, ConfigError> {
    url_or_default("TIDAL_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Market used for catalog lookups, overridable with `TIDAL_COUNTRY_CODE`.
pub fn country_code() -> String {
    env::var("TIDAL_COUNTRY_CODE")
        .ok()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string())
}

/// Default music directory for exports: `<home>/Music/Playlist`.
pub fn default_output_root() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("Music");
    path.push("Playlist");
    path
}

/// Settings for talking to the catalog API.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Trusted authority every request is pinned to.
    pub api_base: Url,
    pub api_version: String,
    pub country_code: String,
    pub default_include: String,
    /// Courtesy pause before every catalog request.
    pub request_delay: Duration,
    /// Total attempts allowed while the server keeps answering 429.
    pub max_retries: u32,
    pub default_retry_after: Duration,
    /// Fraction of `retry-after` actually waited: `retry_after / divisor`.
    pub retry_after_divisor: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_URL).expect("default API url is valid"),
            api_version: DEFAULT_API_VERSION.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            default_include: DEFAULT_INCLUDE.to_string(),
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            max_retries: DEFAULT_MAX_RETRIES,
            default_retry_after: Duration::from_secs(DEFAULT_RETRY_AFTER_SECS),
            retry_after_divisor: DEFAULT_RETRY_AFTER_DIVISOR,
        }
    }
}

impl ApiSettings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_base: api_url()?,
            country_code: country_code(),
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub token_url: Url,
}

impl AuthSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            token_url: auth_url()?,
        })
    }
}

/// Settings for the on-disk export.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub output_root: PathBuf,
    pub checkpoint_every: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
        }
    }
}
