//! Fetching the current newsletter: the latest feed item and its rendered body.

use std::sync::Arc;

use url::Url;

use crate::app::{BriefError, Result};
use crate::domain::FeedItem;
use crate::fetcher::Fetcher;
use crate::normalizer::{self, Normalizer};

#[derive(Clone)]
pub struct NewsletterLoader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    normalizer: Normalizer,
}

impl NewsletterLoader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self {
            fetcher,
            normalizer: Normalizer::new(),
        }
    }

    /// Fetch the feed at `rss_url` and return its most recently published item.
    pub async fn load_rss(&self, rss_url: &Url) -> Result<FeedItem> {
        let body = self.fetcher.fetch(rss_url).await?;
        if body.is_empty() {
            return Err(BriefError::MissingData);
        }

        let items = self.normalizer.normalize(&body)?;
        if items.is_empty() {
            return Err(BriefError::NoItems);
        }
        tracing::debug!(url = %rss_url, items = items.len(), "Parsed feed");

        let item = normalizer::latest(items).ok_or(BriefError::ParseFailed)?;
        tracing::info!(id = %item.unique_id, title = item.display_title(), "Selected current item");
        Ok(item)
    }

    /// Fetch the pre-rendered newsletter HTML, unmodified.
    pub async fn load_newsletter_content(&self, content_url: &Url) -> Result<String> {
        let body = self.fetcher.fetch(content_url).await?;
        if body.is_empty() {
            return Err(BriefError::MissingData);
        }

        let content = String::from_utf8(body).map_err(|_| BriefError::EncodingError)?;
        tracing::info!(url = %content_url, bytes = content.len(), "Loaded newsletter content");
        Ok(content)
    }
}
