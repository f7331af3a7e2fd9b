use crate::app::{CancelToken, Result};
use crate::domain::{FeedCategory, FeedPage};
use crate::fetcher::batch::{fetch_chunk, CHUNK_SIZE};
use crate::fetcher::Fetcher;

/// Qualifying items per page.
pub const PAGE_SIZE: usize = 30;

/// Resolves a category to its ordered id list.
///
/// `submit` is a local-only placeholder and fetches nothing; `comments`
/// reads the global updates feed; everything else maps to one ranked-list
/// endpoint. Upstream failures are not retried here — retry is the caller's
/// decision.
pub async fn resolve_feed_ids(
    fetcher: &dyn Fetcher,
    category: FeedCategory,
    cancel: &CancelToken,
) -> Result<Vec<u64>> {
    cancel.check()?;

    let ids = match category.ranked_endpoint() {
        Some(list) => fetcher.fetch_id_list(list).await?,
        None if category == FeedCategory::Comments => fetcher.fetch_updates().await?,
        None => Vec::new(),
    };

    cancel.check()?;
    tracing::debug!(%category, count = ids.len(), "resolved feed ids");
    Ok(ids)
}

/// Produces one page of up to [`PAGE_SIZE`] qualifying items starting at
/// `start`, plus the absolute index to resume from.
///
/// Qualification is applied after fetching, so the cursor keeps advancing
/// through underlying ids — pulling extra chunks — until the page fills or
/// the list runs out. Dropped items never count toward the page target.
/// Chaining the returned `next_index` into the next call yields the next
/// distinct page with no duplicate ids.
pub async fn fetch_page(
    fetcher: &dyn Fetcher,
    ids: &[u64],
    category: FeedCategory,
    start: usize,
    cancel: &CancelToken,
) -> Result<FeedPage> {
    // The first ids of the `past` list are reserved for the front page.
    let mut cursor = start.max(category.start_offset());
    let mut items = Vec::with_capacity(PAGE_SIZE);

    while items.len() < PAGE_SIZE && cursor < ids.len() {
        let end = (cursor + CHUNK_SIZE).min(ids.len());
        let fetched = fetch_chunk(fetcher, &ids[cursor..end], cancel).await?;

        for (offset, slot) in fetched.into_iter().enumerate() {
            let Some(item) = slot else { continue };
            if !item.qualifies(category) {
                continue;
            }
            items.push(item);
            if items.len() == PAGE_SIZE {
                // Resume right after the id that filled the page; the
                // unconsumed tail of this chunk is refetched next time.
                let next_index = cursor + offset + 1;
                tracing::debug!(%category, next_index, "page filled");
                return Ok(FeedPage { items, next_index });
            }
        }

        cursor = end;
    }

    tracing::debug!(%category, count = items.len(), next_index = cursor, "page complete");
    Ok(FeedPage {
        items,
        next_index: cursor,
    })
}
