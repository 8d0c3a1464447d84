use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{BriefError, Result};
use crate::domain::FeedItem;

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Parse RSS, Atom or JSON Feed bytes into feed items, in document order.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<FeedItem>> {
        let feed = parser::parse(body).map_err(|e| BriefError::FeedParse(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| FeedItem {
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string()),
                published_at: entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc)),
                unique_id: entry.id,
            })
            .collect();

        Ok(items)
    }
}

/// The most recently published item.
///
/// Undated items sort before every dated one, so they only win when nothing
/// is dated. Ties go to the later item in document order.
pub fn latest(items: Vec<FeedItem>) -> Option<FeedItem> {
    items.into_iter().max_by_key(|item| item.published_at)
}
