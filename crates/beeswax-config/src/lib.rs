//! Shared configuration for Beeswax tools.
//!
//! A TOML config file layered with `BEESWAX_*` environment variables, the
//! keyring-backed credential store, and translation into a ready-to-use
//! `beeswax_api::Session`. The CLI adds flag-aware wrappers on top.

mod credentials;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use beeswax_api::{CredentialProvider, Session, TlsMode, TransportConfig};

pub use credentials::{CredentialChain, EnvCredentials, KeyringStore, os_user};

/// Prefix of every environment variable read by [`load_config`].
pub const ENV_PREFIX: &str = "BEESWAX_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no Beeswax endpoint configured")]
    NoEndpoint,

    #[error("credential store error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// API base URL, e.g. `https://acme.api.beeswax.com/rest/`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Login email. The password never lives here; see [`KeyringStore`].
    #[serde(default)]
    pub username: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS verification (sandbox hosts with self-signed certs).
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    /// Default output format for the CLI: "json" or "yaml".
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            username: None,
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            output: default_output(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "json".into()
}

impl Config {
    /// The endpoint, trimmed and ending in `/` so path segments append cleanly.
    pub fn normalized_endpoint(&self) -> Result<String, ConfigError> {
        let raw = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::NoEndpoint)?;

        let endpoint = if raw.ends_with('/') {
            raw.to_owned()
        } else {
            format!("{raw}/")
        };
        url::Url::parse(&endpoint).map_err(|e| ConfigError::Validation {
            field: "endpoint".into(),
            reason: format!("invalid URL '{endpoint}': {e}"),
        })?;
        Ok(endpoint)
    }

    /// Transport settings derived from `timeout`, `insecure` and `ca_cert`.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca) = self.ca_cert {
            TlsMode::CustomCa(ca.clone())
        } else {
            TlsMode::System
        };
        TransportConfig::default()
            .with_tls(tls)
            .with_timeout(Duration::from_secs(self.timeout))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "beeswax", "beeswax").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("beeswax");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the Config from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).only(&[
            "endpoint", "username", "timeout", "insecure", "ca_cert", "output",
        ]));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session construction ────────────────────────────────────────────

/// Build a configured, not yet authenticated session from `cfg`.
pub fn build_session(
    cfg: &Config,
    credentials: Arc<dyn CredentialProvider>,
) -> Result<Session, ConfigError> {
    let endpoint = cfg.normalized_endpoint()?;
    let session = Session::new(cfg.transport()).with_credentials(credentials);
    session
        .configure(endpoint)
        .map_err(|e| ConfigError::Validation {
            field: "endpoint".into(),
            reason: e.to_string(),
        })?;
    Ok(session)
}
