use thiserror::Error;

use crate::config::ConfigError;
use crate::store::CredentialError;

#[derive(Error, Debug)]
pub enum BriefError {
    #[error("Settings error: {0}")]
    Settings(#[from] ConfigError),

    #[error("Missing setting: {0}. Run `weekly-brief configure` first")]
    MissingSetting(&'static str),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Response contained no data")]
    MissingData,

    #[error("Feed contains no items")]
    NoItems,

    #[error("Could not select an item from the feed")]
    ParseFailed,

    #[error("Newsletter content is not valid UTF-8")]
    EncodingError,

    #[error("No feed item to publish")]
    NoItem,

    #[error("No newsletter content to publish")]
    NoNewsletterContent,

    #[error("Campaign endpoint returned no readable response")]
    MissingPublishResult,

    #[error("Credential store error: {0}")]
    Credential(#[from] CredentialError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BriefError>;
