// Credential sources
//
// `KeyringStore` keeps the username and password in two OS keyring slots
// keyed by the local OS user. `CredentialChain` stacks several sources and
// merges them field by field, first source winning.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use beeswax_api::{CredentialProvider, Error, StaticCredentials, StoredCredentials};

use crate::{Config, ConfigError};

const USERNAME_SERVICE: &str = "beeswax_username";
const PASSWORD_SERVICE: &str = "beeswax_password";

/// Name of the logged-in OS user, used as the keyring account.
pub fn os_user() -> String {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "default".into())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Username/password slots in the OS keyring.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    user: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new(os_user())
    }
}

impl KeyringStore {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    fn entry(&self, service: &str) -> Result<keyring::Entry, ConfigError> {
        Ok(keyring::Entry::new(service, &self.user)?)
    }

    fn read(&self, service: &str) -> Result<Option<String>, ConfigError> {
        match self.entry(service)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read both slots; either may be absent.
    pub fn load(&self) -> Result<StoredCredentials, ConfigError> {
        Ok(StoredCredentials {
            username: self.read(USERNAME_SERVICE)?,
            password: self.read(PASSWORD_SERVICE)?.map(SecretString::from),
        })
    }

    /// Write both slots, replacing whatever was there.
    pub fn save(&self, username: &str, password: &SecretString) -> Result<(), ConfigError> {
        self.entry(USERNAME_SERVICE)?.set_password(username)?;
        self.entry(PASSWORD_SERVICE)?
            .set_password(password.expose_secret())?;
        debug!(user = %self.user, "stored credentials in keyring");
        Ok(())
    }

    /// Remove both slots. Missing entries are not an error.
    pub fn clear(&self) -> Result<(), ConfigError> {
        for service in [USERNAME_SERVICE, PASSWORD_SERVICE] {
            match self.entry(service)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

fn store_error(err: &ConfigError) -> Error {
    Error::Credentials {
        message: err.to_string(),
    }
}

impl CredentialProvider for KeyringStore {
    fn lookup(&self) -> Result<StoredCredentials, Error> {
        self.load().map_err(|e| store_error(&e))
    }

    fn store(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        self.save(username, password).map_err(|e| store_error(&e))
    }
}

// ── Environment ─────────────────────────────────────────────────────

/// `BEESWAX_USERNAME` / `BEESWAX_PASSWORD`. Read-only.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn lookup(&self) -> Result<StoredCredentials, Error> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Ok(StoredCredentials {
            username: var("BEESWAX_USERNAME"),
            password: var("BEESWAX_PASSWORD").map(SecretString::from),
        })
    }

    fn store(&self, _username: &str, _password: &SecretString) -> Result<(), Error> {
        Err(Error::Credentials {
            message: "environment credentials are read-only".into(),
        })
    }
}

// ── Chain ───────────────────────────────────────────────────────────

/// Layered credential sources, merged per field in order.
///
/// A layer that fails is logged and skipped, so an unavailable keyring
/// doesn't block credentials coming from the environment. `store` goes to
/// the designated writable store.
pub struct CredentialChain {
    layers: Vec<Arc<dyn CredentialProvider>>,
    store: Arc<dyn CredentialProvider>,
}

impl CredentialChain {
    pub fn new(store: Arc<dyn CredentialProvider>) -> Self {
        Self {
            layers: Vec::new(),
            store,
        }
    }

    /// Append a lower-priority layer.
    #[must_use]
    pub fn layer(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.layers.push(provider);
        self
    }

    /// `explicit` (command-line values) → environment → keyring →
    /// plaintext username in `cfg`. Stores go to the keyring.
    pub fn standard(cfg: &Config, keyring: KeyringStore, explicit: StoredCredentials) -> Self {
        let keyring: Arc<dyn CredentialProvider> = Arc::new(keyring);
        let from_config = StaticCredentials::new(StoredCredentials {
            username: cfg.username.clone(),
            password: None,
        });
        Self::new(Arc::clone(&keyring))
            .layer(Arc::new(StaticCredentials::new(explicit)))
            .layer(Arc::new(EnvCredentials))
            .layer(keyring)
            .layer(Arc::new(from_config))
    }
}

impl CredentialProvider for CredentialChain {
    fn lookup(&self) -> Result<StoredCredentials, Error> {
        let mut merged = StoredCredentials::default();
        for layer in &self.layers {
            if merged.is_complete() {
                break;
            }
            match layer.lookup() {
                Ok(found) => merged = merged.or(found),
                Err(e) => warn!(error = %e, "credential source unavailable, skipping"),
            }
        }
        Ok(merged)
    }

    fn store(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        self.store.store(username, password)
    }
}
