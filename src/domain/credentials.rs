use secrecy::SecretString;

/// Secrets used to authorize a campaign request.
///
/// Either the API key with list IDs, or the shared secret understood by an
/// intermediary script, authorizes the send. Both may be present.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub api_key: Option<SecretString>,
    pub shared_secret: Option<SecretString>,
    pub production_list_id: Option<String>,
    pub test_list_id: Option<String>,
}

impl Credentials {
    /// List ID for a production or test send.
    pub fn list_id(&self, for_real: bool) -> Option<&str> {
        if for_real {
            self.production_list_id.as_deref()
        } else {
            self.test_list_id.as_deref()
        }
    }

    /// Whether an API key or a shared secret is available.
    pub fn can_authorize(&self) -> bool {
        self.api_key.is_some() || self.shared_secret.is_some()
    }
}
