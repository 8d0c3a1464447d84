use keyring::Entry;

use crate::store::{CredentialError, SecretStore};

/// Secrets kept in the platform keychain (macOS Keychain, Windows
/// Credential Manager, Secret Service on Linux with the kernel keyring as a
/// session cache), one entry per key.
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, CredentialError> {
        Entry::new(&self.service, key).map_err(|e| backend_error(key, e))
    }
}

fn backend_error(key: &str, err: keyring::Error) -> CredentialError {
    CredentialError::Backend {
        key: key.to_string(),
        message: err.to_string(),
    }
}

impl SecretStore for KeychainStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CredentialError> {
        match self.entry(key)?.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(backend_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CredentialError> {
        tracing::debug!(service = %self.service, key, "Storing credential");
        self.entry(key)?
            .set_secret(value)
            .map_err(|e| backend_error(key, e))
    }

    fn delete(&self, key: &str) -> Result<(), CredentialError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(backend_error(key, e)),
        }
    }
}
