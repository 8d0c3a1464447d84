use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::{CredentialError, SecretStore};

/// Process-local secret store, used in tests and as a stand-in where no
/// platform keychain is available.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
        key: &str,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, CredentialError> {
        self.entries.lock().map_err(|e| CredentialError::Backend {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CredentialError> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CredentialError> {
        self.lock(key)?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CredentialError> {
        self.lock(key)?.remove(key);
        Ok(())
    }
}
