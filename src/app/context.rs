use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::Settings;
use crate::fetcher::http_fetcher::{build_client, HttpFetcher};
use crate::fetcher::Fetcher;
use crate::loader::NewsletterLoader;
use crate::publisher::CampaignPublisher;
use crate::store::{CredentialStore, KeychainStore, SecretStore, SERVICE};

/// Everything a command needs, constructed once at startup.
pub struct AppContext {
    pub settings: Settings,
    pub settings_path: PathBuf,
    pub credentials: CredentialStore,
    pub loader: NewsletterLoader,
    pub publisher: CampaignPublisher,
}

impl AppContext {
    /// Context backed by the settings file at `settings_path` (or the default
    /// location) and the platform keychain.
    pub fn new(settings_path: Option<PathBuf>) -> Result<Self> {
        let settings_path = Self::resolve_settings_path(settings_path)?;
        Self::with_secret_store(settings_path, Arc::new(KeychainStore::new(SERVICE)))
    }

    /// Context for `configure`: an unparsable settings file is replaced
    /// rather than reported.
    pub fn for_configure(settings_path: Option<PathBuf>) -> Result<Self> {
        let settings_path = Self::resolve_settings_path(settings_path)?;
        Self::for_configure_with_secret_store(settings_path, Arc::new(KeychainStore::new(SERVICE)))
    }

    pub fn for_configure_with_secret_store(
        settings_path: PathBuf,
        secrets: Arc<dyn SecretStore + Send + Sync>,
    ) -> Result<Self> {
        let settings = Settings::load_or_default(&settings_path)?;
        Self::with_settings(settings_path, settings, secrets)
    }

    pub fn with_secret_store(
        settings_path: PathBuf,
        secrets: Arc<dyn SecretStore + Send + Sync>,
    ) -> Result<Self> {
        let settings = Settings::load_from(&settings_path)?;
        Self::with_settings(settings_path, settings, secrets)
    }

    pub fn with_settings(
        settings_path: PathBuf,
        settings: Settings,
        secrets: Arc<dyn SecretStore + Send + Sync>,
    ) -> Result<Self> {
        let client = build_client(Duration::from_secs(settings.request_timeout_secs))?;
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(client.clone()));

        Ok(Self {
            settings,
            settings_path,
            credentials: CredentialStore::new(secrets),
            loader: NewsletterLoader::new(fetcher),
            publisher: CampaignPublisher::new(client),
        })
    }

    fn resolve_settings_path(settings_path: Option<PathBuf>) -> Result<PathBuf> {
        match settings_path {
            Some(p) => Ok(p),
            None => Ok(Settings::default_path()?),
        }
    }
}
