//! # Client configuration: `hdnotes.toml`
//!
//! Everything the client needs to know about its environment. In practice only
//! the backend base URL changes between deployments; the other knobs exist so the
//! redirect delay and note mutation policy are explicit rather than buried in views.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://notesbackend-mne8.onrender.com"
//!
//! [auth]
//! redirect_delay_ms = 1500   # pause after a successful OTP check
//!
//! [notes]
//! mutation_policy = "confirmed"   # or "optimistic"
//! ```
//!
//! ## Environment
//!
//! [`ClientConfig::from_env`] starts from the defaults and applies
//! `NOTES_API_BASE_URL`. On native targets the variable is read at runtime (after
//! loading a `.env` file via `dotenvy`); on WASM there is no process environment,
//! so it is baked in at compile time.
//!
//! All structs derive `Default` with production values, so a missing or empty
//! config file is equivalent to the default configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const BASE_URL_ENV: &str = "NOTES_API_BASE_URL";

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://notesbackend-mne8.onrender.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("base URL must start with http:// or https://, got `{0}`")]
    InvalidBaseUrl(String),
}

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the notes backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long the success message stays up before navigating to the notes view.
    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay() -> u64 {
    1500
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesConfig {
    #[serde(default)]
    pub mutation_policy: MutationPolicy,
}

/// When local note mutations become visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationPolicy {
    /// Apply only after the backend confirms.
    #[default]
    Confirmed,
    /// Apply immediately, roll back if the backend rejects.
    Optimistic,
}

impl ClientConfig {
    /// Defaults plus `NOTES_API_BASE_URL`, if set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match env_base_url() {
            Some(url) => match config.clone().with_base_url(&url) {
                Ok(config) => {
                    tracing::info!("{BASE_URL_ENV} set, using {}", config.api.base_url);
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring {BASE_URL_ENV}: {e}");
                    config
                }
            },
            None => {
                tracing::info!("{BASE_URL_ENV} not set, using default: {DEFAULT_BASE_URL}");
                config
            }
        }
    }

    /// Builder method to point the client at another backend.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api.base_url = normalize_base_url(url)?;
        Ok(self)
    }

    /// Builder method to set the note mutation policy.
    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.notes.mutation_policy = policy;
        self
    }

    pub fn redirect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.auth.redirect_delay_ms)
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "hdnotes.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        let base_url = normalize_base_url(&config.api.base_url)?;
        Ok(Self {
            api: ApiConfig { base_url },
            ..config
        })
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(url.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn env_base_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn env_base_url() -> Option<String> {
    option_env!("NOTES_API_BASE_URL")
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}
