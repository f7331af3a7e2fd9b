use std::collections::HashSet;
use std::sync::Arc;

use crate::app::cancel::CancelToken;
use crate::app::error::Result;
use crate::cache::SessionCache;
use crate::domain::{FeedCategory, FeedSnapshot, Post, User};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::{feed, tree};

/// Wires the fetcher and the session cache together and hosts the cached
/// top-level operations.
///
/// Each operation follows the same shape: serve from the cache unless
/// `refresh` forces a bypass, fetch otherwise, and write the fresh result
/// back — but never after cancellation, so a superseded load cannot
/// overwrite its successor's state.
pub struct AppContext {
    fetcher: Arc<dyn Fetcher>,
    pub cache: SessionCache,
}

impl AppContext {
    pub fn new() -> Self {
        Self::with_fetcher(Arc::new(HttpFetcher::new()))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            cache: SessionCache::new(),
        }
    }

    pub fn fetcher(&self) -> &dyn Fetcher {
        self.fetcher.as_ref()
    }

    /// Loads a category's id list and first page of items.
    pub async fn load_feed(
        &self,
        category: FeedCategory,
        refresh: bool,
        cancel: &CancelToken,
    ) -> Result<FeedSnapshot> {
        if !refresh {
            if let Some(snapshot) = self.cache.get_feed(category) {
                tracing::debug!(%category, "feed served from cache");
                return Ok(snapshot);
            }
        }

        let ids = feed::resolve_feed_ids(self.fetcher(), category, cancel).await?;
        let page = feed::fetch_page(self.fetcher(), &ids, category, 0, cancel).await?;
        let snapshot = FeedSnapshot {
            category,
            ids,
            items: page.items,
            cursor: page.next_index,
        };

        cancel.check()?;
        self.cache.put_feed(snapshot.clone());
        tracing::info!(%category, items = snapshot.items.len(), "feed loaded");
        Ok(snapshot)
    }

    /// Extends the cached snapshot for `category` by one page.
    ///
    /// Upstream lists can shift between calls, so freshly fetched items are
    /// de-duplicated against those already held; the cursor only advances.
    pub async fn load_more(
        &self,
        category: FeedCategory,
        cancel: &CancelToken,
    ) -> Result<FeedSnapshot> {
        let Some(snapshot) = self.cache.get_feed(category) else {
            return self.load_feed(category, false, cancel).await;
        };
        if snapshot.is_exhausted() {
            return Ok(snapshot);
        }

        let page =
            feed::fetch_page(self.fetcher(), &snapshot.ids, category, snapshot.cursor, cancel)
                .await?;

        let mut merged = snapshot;
        let seen: HashSet<u64> = merged.items.iter().map(|item| item.id).collect();
        merged
            .items
            .extend(page.items.into_iter().filter(|item| !seen.contains(&item.id)));
        merged.cursor = merged.cursor.max(page.next_index);

        cancel.check()?;
        self.cache.put_feed(merged.clone());
        tracing::info!(%category, items = merged.items.len(), "feed extended");
        Ok(merged)
    }

    /// Loads a post and its bounded comment tree. Absent and suppressed
    /// posts both come back as `None`.
    pub async fn load_post(
        &self,
        id: u64,
        refresh: bool,
        cancel: &CancelToken,
    ) -> Result<Option<Post>> {
        if !refresh {
            if let Some(post) = self.cache.get_post(id) {
                tracing::debug!(id, "post served from cache");
                return Ok(Some(post));
            }
        }

        cancel.check()?;
        let item = match self.fetcher.fetch_item(id).await? {
            Some(item) if !item.is_suppressed() => item,
            _ => return Ok(None),
        };

        let comments = tree::build_comment_tree(self.fetcher(), &item.kids, cancel).await?;
        let post = Post { item, comments };

        cancel.check()?;
        self.cache.put_post(post.clone());
        tracing::info!(
            id,
            comments = post.comments.iter().map(|node| node.count()).sum::<usize>(),
            "post loaded"
        );
        Ok(Some(post))
    }

    /// Loads a profile. The cache key is the lowercased handle; the
    /// upstream lookup keeps the caller's casing.
    pub async fn load_user(
        &self,
        handle: &str,
        refresh: bool,
        cancel: &CancelToken,
    ) -> Result<Option<User>> {
        if !refresh {
            if let Some(user) = self.cache.get_user(handle) {
                tracing::debug!(handle, "user served from cache");
                return Ok(Some(user));
            }
        }

        cancel.check()?;
        let Some(user) = self.fetcher.fetch_user(handle).await? else {
            return Ok(None);
        };

        cancel.check()?;
        self.cache.put_user(user.clone());
        tracing::info!(handle, "user loaded");
        Ok(Some(user))
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
