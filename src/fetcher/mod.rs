pub mod batch;
pub mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Item, User};

pub use http::HttpFetcher;

/// The upstream API seam: three id-addressed reads plus the updates feed.
///
/// Fetching by id is the only primitive the upstream offers — no batching,
/// no search, no server-side filtering. Implementations must return
/// `Ok(None)` for missing or malformed entities and reserve `Err` for
/// transport-level failure.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_item(&self, id: u64) -> Result<Option<Item>>;

    async fn fetch_user(&self, handle: &str) -> Result<Option<User>>;

    /// One ranked id list, e.g. `"topstories"`.
    async fn fetch_id_list(&self, list: &str) -> Result<Vec<u64>>;

    /// The `items` field of the global recent-updates feed.
    async fn fetch_updates(&self) -> Result<Vec<u64>>;
}
