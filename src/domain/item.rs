use chrono::{DateTime, Utc};

/// A single entry of the newsletter feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub unique_id: String,
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl FeedItem {
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            title: None,
            published_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }
}
