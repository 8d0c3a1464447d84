pub mod http_fetcher;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the raw response body.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
