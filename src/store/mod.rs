pub mod keychain;
pub mod memory;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::domain::Credentials;

pub use keychain::KeychainStore;
pub use memory::MemorySecretStore;

/// Service identifier the credentials are filed under.
pub const SERVICE: &str = "net.appforce1.swiftweeklybrief";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Stored value for {0} is not valid UTF-8")]
    Conversion(String),

    #[error("Secure storage failure for {key}: {message}")]
    Backend { key: String, message: String },
}

/// Secure key/value storage for secrets.
///
/// A key that does not exist reads as `None` rather than an error.
pub trait SecretStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CredentialError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), CredentialError>;
    fn delete(&self, key: &str) -> Result<(), CredentialError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKey {
    SendyApi,
    Secret,
    ProductionListId,
    TestListId,
}

impl CredentialKey {
    /// Keychain account name. Shared with earlier releases of the tool, so
    /// credentials stored by them stay readable.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::SendyApi => "sendyApi",
            CredentialKey::Secret => "secret",
            CredentialKey::ProductionListId => "productionListId",
            CredentialKey::TestListId => "testListId",
        }
    }
}

/// Values written by `configure`. `None` leaves the stored value untouched.
#[derive(Debug, Default)]
pub struct CredentialsUpdate {
    pub api_key: Option<SecretString>,
    pub shared_secret: Option<SecretString>,
    pub production_list_id: Option<String>,
    pub test_list_id: Option<String>,
}

/// Typed access to the four stored credentials.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn SecretStore + Send + Sync>,
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn SecretStore + Send + Sync>) -> Self {
        Self { backend }
    }

    pub fn get_string(&self, key: CredentialKey) -> Result<Option<String>, CredentialError> {
        let Some(bytes) = self.backend.get(key.as_str())? else {
            return Ok(None);
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| CredentialError::Conversion(key.as_str().to_string()))
    }

    /// Store `value` under `key`; `None` removes the entry.
    pub fn set_string(&self, key: CredentialKey, value: Option<&str>) -> Result<(), CredentialError> {
        match value {
            Some(value) => self.backend.set(key.as_str(), value.as_bytes()),
            None => self.backend.delete(key.as_str()),
        }
    }

    pub fn load(&self) -> Result<Credentials, CredentialError> {
        Ok(Credentials {
            api_key: self.get_string(CredentialKey::SendyApi)?.map(SecretString::from),
            shared_secret: self.get_string(CredentialKey::Secret)?.map(SecretString::from),
            production_list_id: self.get_string(CredentialKey::ProductionListId)?,
            test_list_id: self.get_string(CredentialKey::TestListId)?,
        })
    }

    pub fn save(&self, update: &CredentialsUpdate) -> Result<(), CredentialError> {
        if let Some(secret) = &update.shared_secret {
            self.set_string(CredentialKey::Secret, Some(secret.expose_secret()))?;
        }
        if let Some(api_key) = &update.api_key {
            self.set_string(CredentialKey::SendyApi, Some(api_key.expose_secret()))?;
        }
        if let Some(id) = &update.production_list_id {
            self.set_string(CredentialKey::ProductionListId, Some(id))?;
        }
        if let Some(id) = &update.test_list_id {
            self.set_string(CredentialKey::TestListId, Some(id))?;
        }
        Ok(())
    }
}
