pub mod campaign;
pub mod credentials;
pub mod item;

pub use campaign::{CampaignRequest, SenderIdentity};
pub use credentials::Credentials;
pub use item::FeedItem;
