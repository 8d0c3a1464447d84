//! # weekly-brief
//!
//! Publishes the weekly newsletter as a Sendy campaign.
//!
//! ## Architecture
//!
//! ```text
//! Settings + Credentials → (Feed Fetcher ‖ Content Fetcher) → Campaign Publisher
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Store settings and credentials
//! weekly-brief configure --rss-feed https://example.com/feed.xml \
//!     --content-url https://example.com/latest.html \
//!     --api-campaign-url https://sendy.example.com/api/campaigns/create.php \
//!     --secret s3cret
//!
//! # Which issue would be sent?
//! weekly-brief current show
//!
//! # Test send, then the real thing
//! weekly-brief current send
//! weekly-brief current send --prod
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together settings,
/// credentials, loader and publisher.
pub mod app;

/// Command-line interface using clap.
///
/// - `configure` - Store settings and credentials
/// - `current show` - Print the unique ID of the current item
/// - `current load` - Print the current newsletter content
/// - `current send [--prod]` - Publish the current newsletter
pub mod cli;

/// Persistent settings in `~/.config/weekly-brief/settings.toml`.
pub mod config;

/// Core domain models.
///
/// - [`FeedItem`](domain::FeedItem): The newsletter's feed entry
/// - [`Credentials`](domain::Credentials): Secrets authorizing a send
/// - [`CampaignRequest`](domain::CampaignRequest): Form-encoded campaign body
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for GET requests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Loading the current feed item and newsletter content.
pub mod loader;

/// Feed parsing and selection of the latest item.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0
/// into [`FeedItem`](domain::FeedItem) structs.
pub mod normalizer;

/// Campaign submission to the Sendy API.
pub mod publisher;

/// Secure credential storage.
///
/// - [`SecretStore`](store::SecretStore): Trait over a key/value secret store
/// - [`KeychainStore`](store::KeychainStore): Platform keychain implementation
/// - [`CredentialStore`](store::CredentialStore): Typed access to the four credentials
pub mod store;
