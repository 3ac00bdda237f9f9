//! Client configuration.
//!
//! Settings are resolved in three layers, later layers winning:
//! 1. Built-in defaults
//! 2. `config.toml` (from `SCOOPJOY_CONFIG` or the platform config directory)
//! 3. `SCOOPJOY_BASE_URL` / `SCOOPJOY_COOKIE` environment variables
//!
//! Command-line flags are applied on top by the caller.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{
  DEFAULT_BASE_URL, DEFAULT_DEBOUNCE_MS, DEFAULT_EMPTY_CART_REDIRECT_MS, DEFAULT_ORDER_REDIRECT_MS, DEFAULT_TOAST_MS,
};
use crate::paths;

pub const ENV_CONFIG: &str = "SCOOPJOY_CONFIG";
pub const ENV_BASE_URL: &str = "SCOOPJOY_BASE_URL";
pub const ENV_COOKIE: &str = "SCOOPJOY_COOKIE";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config file '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid base url '{url}': {source}")]
  BaseUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Storefront backend origin, e.g. `https://shop.example.com`.
  pub base_url: String,
  /// Raw `Cookie` header sent with every request. Carries the session and
  /// the anti-forgery token.
  pub cookie: Option<String>,
  pub debounce_ms: u64,
  pub toast_ms: u64,
  pub empty_cart_redirect_ms: u64,
  pub order_redirect_ms: u64,
  /// Per-request timeout. `None` leaves the HTTP client default in place.
  pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      cookie: None,
      debounce_ms: DEFAULT_DEBOUNCE_MS,
      toast_ms: DEFAULT_TOAST_MS,
      empty_cart_redirect_ms: DEFAULT_EMPTY_CART_REDIRECT_MS,
      order_redirect_ms: DEFAULT_ORDER_REDIRECT_MS,
      request_timeout_secs: None,
    }
  }
}

impl Config {
  /// Load configuration from `path`, or from the default location when
  /// `path` is `None`, then apply environment overrides.
  ///
  /// An explicitly given file must exist; a missing default file just
  /// yields the defaults.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    let explicit = path
      .map(Path::to_path_buf)
      .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

    let mut config = match explicit {
      Some(path) => Self::from_file(&path)?,
      None => match paths::config_file() {
        Some(path) if path.exists() => Self::from_file(&path)?,
        _ => {
          debug!("no config file found, using defaults");
          Self::default()
        }
      },
    };

    config.apply_env();
    config.validate()?;
    Ok(config)
  }

  /// Parse a config file without applying environment overrides.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
  }

  fn apply_env(&mut self) {
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
      debug!(base_url = %base_url, "base url overridden from environment");
      self.base_url = base_url;
    }
    if let Ok(cookie) = std::env::var(ENV_COOKIE) {
      debug!("cookie overridden from environment");
      self.cookie = Some(cookie);
    }
  }

  /// Check that the base url parses.
  pub fn validate(&self) -> Result<(), ConfigError> {
    url::Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
      url: self.base_url.clone(),
      source,
    })?;
    Ok(())
  }

  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }

  pub fn toast_duration(&self) -> Duration {
    Duration::from_millis(self.toast_ms)
  }

  pub fn empty_cart_redirect(&self) -> Duration {
    Duration::from_millis(self.empty_cart_redirect_ms)
  }

  pub fn order_redirect(&self) -> Duration {
    Duration::from_millis(self.order_redirect_ms)
  }

  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }
}
