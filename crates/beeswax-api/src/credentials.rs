// Credential provider seam
//
// The session asks a `CredentialProvider` for a username/password only when
// an authentication call is missing one of them. Providers live behind a
// trait so the keyring-backed store (beeswax-config) and test doubles plug
// in the same way.

use std::fmt;

use secrecy::SecretString;

use crate::error::Error;

/// A possibly-partial username/password pair.
///
/// Either slot may be absent: nothing stored yet, or only one half stored.
#[derive(Clone, Default)]
pub struct StoredCredentials {
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl StoredCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(SecretString::from(password.into())),
        }
    }

    /// `true` when both slots are filled.
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Fill each empty slot from `fallback`, field by field.
    #[must_use]
    pub fn or(self, fallback: StoredCredentials) -> Self {
        Self {
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
        }
    }
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Source of credentials for re-authentication.
pub trait CredentialProvider: Send + Sync {
    /// Return whatever is stored. Absent slots are not an error.
    fn lookup(&self) -> Result<StoredCredentials, Error>;

    /// Persist both slots, overwriting any prior entry.
    fn store(&self, username: &str, password: &SecretString) -> Result<(), Error>;
}

/// Provider with nothing stored and nowhere to store.
///
/// Sessions built without a provider use this; re-authentication then
/// relies entirely on explicit credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn lookup(&self) -> Result<StoredCredentials, Error> {
        Ok(StoredCredentials::default())
    }

    fn store(&self, _username: &str, _password: &SecretString) -> Result<(), Error> {
        Err(Error::Credentials {
            message: "no credential store configured".into(),
        })
    }
}

/// In-memory provider, for programs that resolve credentials themselves.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    inner: std::sync::RwLock<StoredCredentials>,
}

impl StaticCredentials {
    pub fn new(credentials: StoredCredentials) -> Self {
        Self {
            inner: std::sync::RwLock::new(credentials),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn lookup(&self) -> Result<StoredCredentials, Error> {
        let guard = self.inner.read().map_err(|_| Error::Credentials {
            message: "credential lock poisoned".into(),
        })?;
        Ok(guard.clone())
    }

    fn store(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let mut guard = self.inner.write().map_err(|_| Error::Credentials {
            message: "credential lock poisoned".into(),
        })?;
        *guard = StoredCredentials {
            username: Some(username.to_owned()),
            password: Some(password.clone()),
        };
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn or_merges_per_field() {
        let explicit = StoredCredentials {
            username: Some("me@example.com".into()),
            password: None,
        };
        let merged = explicit.or(StoredCredentials::new("stored@example.com", "hunter2"));
        assert_eq!(merged.username.as_deref(), Some("me@example.com"));
        assert_eq!(merged.password.unwrap().expose_secret(), "hunter2");
    }

    #[test]
    fn debug_redacts_password() {
        let creds = StoredCredentials::new("ops@example.com", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("ops@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn static_store_overwrites() {
        let provider = StaticCredentials::default();
        assert!(!provider.lookup().unwrap().is_complete());
        provider
            .store("a@example.com", &SecretString::from("one".to_owned()))
            .unwrap();
        provider
            .store("b@example.com", &SecretString::from("two".to_owned()))
            .unwrap();
        let stored = provider.lookup().unwrap();
        assert_eq!(stored.username.as_deref(), Some("b@example.com"));
        assert_eq!(stored.password.unwrap().expose_secret(), "two");
    }

    #[test]
    fn no_credentials_is_empty() {
        assert!(!NoCredentials.lookup().unwrap().is_complete());
        assert!(NoCredentials.store("x", &SecretString::from("y".to_owned())).is_err());
    }
}
