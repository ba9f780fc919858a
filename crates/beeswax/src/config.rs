//! Flag-aware wrappers around `beeswax_config`.
//!
//! Command-line flags override the config file and `BEESWAX_*` variables;
//! everything else is resolved by the config crate.

use std::sync::Arc;

use beeswax_api::{Session, StoredCredentials};
use beeswax_config::{Config, CredentialChain, KeyringStore};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Load config and apply command-line overrides.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = beeswax_config::load_config()?;
    if let Some(ref endpoint) = global.endpoint {
        cfg.endpoint = Some(endpoint.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    if global.insecure {
        cfg.insecure = true;
    }
    Ok(cfg)
}

/// `--output` if given, else the config file's `output`.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    global
        .output
        .map_or_else(|| output::format_from_config(&cfg.output), Ok)
}

/// Flag → environment → keyring → config credential chain.
pub fn credential_chain(global: &GlobalOpts, cfg: &Config) -> CredentialChain {
    let explicit = StoredCredentials {
        username: global.username.clone(),
        password: None,
    };
    CredentialChain::standard(cfg, KeyringStore::default(), explicit)
}

/// Build the shared session for API-bound commands.
pub fn session(global: &GlobalOpts, cfg: &Config) -> Result<Arc<Session>, CliError> {
    let chain = credential_chain(global, cfg);
    let session = beeswax_config::build_session(cfg, Arc::new(chain))?;
    Ok(Arc::new(session))
}
