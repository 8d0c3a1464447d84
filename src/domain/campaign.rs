//! Campaign request construction and form encoding.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::app::{BriefError, Result};
use crate::domain::{Credentials, FeedItem};

/// Bytes escaped inside a URL fragment; everything else passes through.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Fragment set plus the query delimiters, for values embedded in a query string.
const QUERY_VALUE: &AsciiSet = &FRAGMENT.add(b'&').add(b'=').add(b'+');

const TEST_TITLE_PREFIX: &str = "Test: ";

/// Who the newsletter is sent from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderIdentity {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub brand_id: String,
}

impl Default for SenderIdentity {
    fn default() -> Self {
        Self {
            from_name: "Swift Weekly Brief".to_string(),
            from_email: "hello@swiftweeklybrief.com".to_string(),
            reply_to: "hello@swiftweeklybrief.com".to_string(),
            brand_id: "5".to_string(),
        }
    }
}

/// The body of a Sendy "create campaign" call.
#[derive(Debug, Clone)]
pub struct CampaignRequest {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub title: String,
    pub subject: String,
    pub html_text: String,
    pub brand_id: String,
    pub query_string: String,
    pub for_real: bool,
    pub api_key: Option<SecretString>,
    pub secret: Option<SecretString>,
    pub list_ids: Option<String>,
}

impl CampaignRequest {
    /// Build the request for `item` with `content` as the HTML body.
    ///
    /// A test send (`for_real == false`) prefixes the campaign title with
    /// `"Test: "` and targets the test list. The subject always uses the
    /// feed item's own title.
    pub fn prepare(
        item: Option<&FeedItem>,
        content: Option<&str>,
        for_real: bool,
        credentials: &Credentials,
        sender: &SenderIdentity,
    ) -> Result<Self> {
        let item = item.ok_or(BriefError::NoItem)?;
        let content = content.ok_or(BriefError::NoNewsletterContent)?;
        let title = item.title.as_deref().ok_or(BriefError::MissingData)?;

        let campaign_title = if for_real {
            title.to_string()
        } else {
            format!("{}{}", TEST_TITLE_PREFIX, title)
        };

        Ok(Self {
            from_name: sender.from_name.clone(),
            from_email: sender.from_email.clone(),
            reply_to: sender.reply_to.clone(),
            title: campaign_title,
            subject: format!("{}: {}", sender.from_name, title),
            html_text: content.to_string(),
            brand_id: sender.brand_id.clone(),
            query_string: utm_query_string(&sender.from_name, title),
            for_real,
            api_key: credentials.api_key.clone(),
            secret: credentials.shared_secret.clone(),
            list_ids: credentials.list_id(for_real).map(String::from),
        })
    }

    /// Form fields in submission order. Absent credentials are omitted.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("from_name", self.from_name.as_str()),
            ("from_email", self.from_email.as_str()),
            ("reply_to", self.reply_to.as_str()),
            ("title", self.title.as_str()),
            ("subject", self.subject.as_str()),
            ("html_text", self.html_text.as_str()),
            ("brand_id", self.brand_id.as_str()),
            ("query_string", self.query_string.as_str()),
            ("send_campaign", "1"),
            ("for_real", if self.for_real { "1" } else { "0" }),
        ];

        if let Some(secret) = &self.secret {
            fields.push(("secret", secret.expose_secret()));
        }
        if let Some(api_key) = &self.api_key {
            fields.push(("api_key", api_key.expose_secret()));
        }
        if let Some(list_ids) = &self.list_ids {
            fields.push(("list_ids", list_ids.as_str()));
        }

        fields
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// Values are escaped with an alphanumeric-only safe set, so most
    /// punctuation is percent-encoded even where a form would allow it.
    /// The receiving API expects this.
    pub fn to_form_body(&self) -> String {
        self.fields()
            .into_iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(name, FRAGMENT),
                    utf8_percent_encode(value, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Campaign identifier for UTM tagging: spaces become underscores, `#` is dropped.
pub fn campaign_slug(title: &str) -> String {
    title.replace(' ', "_").replace('#', "")
}

/// UTM parameters appended by Sendy to every link in the campaign.
pub fn utm_query_string(source: &str, title: &str) -> String {
    format!(
        "utm_source={}&utm_medium=email&utm_campaign={}",
        utf8_percent_encode(&campaign_slug(source), QUERY_VALUE),
        utf8_percent_encode(&campaign_slug(title), QUERY_VALUE)
    )
}
