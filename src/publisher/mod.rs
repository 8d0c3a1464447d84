//! Submission of campaigns to a Sendy "create campaign" endpoint.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::app::{BriefError, Result};
use crate::domain::{CampaignRequest, Credentials, FeedItem, SenderIdentity};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

#[derive(Clone)]
pub struct CampaignPublisher {
    client: Client,
}

impl CampaignPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a campaign from `item` and `content` and submit it to `endpoint`.
    pub async fn publish(
        &self,
        endpoint: &Url,
        item: Option<&FeedItem>,
        content: Option<&str>,
        for_real: bool,
        credentials: &Credentials,
        sender: &SenderIdentity,
    ) -> Result<String> {
        let request = CampaignRequest::prepare(item, content, for_real, credentials, sender)?;
        self.submit(endpoint, &request).await
    }

    /// POST `request` and return the endpoint's raw response text.
    ///
    /// The response text is not interpreted; Sendy reports failures in the
    /// body of an otherwise successful exchange.
    pub async fn submit(&self, endpoint: &Url, request: &CampaignRequest) -> Result<String> {
        tracing::info!(
            endpoint = %endpoint,
            title = %request.title,
            for_real = request.for_real,
            "Submitting campaign"
        );

        let response = self
            .client
            .post(endpoint.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(request.to_form_body())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Campaign endpoint returned non-success status");
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(BriefError::MissingPublishResult);
        }

        String::from_utf8(body.to_vec()).map_err(|_| BriefError::MissingPublishResult)
    }
}
