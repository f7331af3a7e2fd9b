use futures::future::join_all;

use crate::app::{CancelToken, Result};
use crate::domain::Item;
use crate::fetcher::Fetcher;

/// Ids per concurrent burst. Bounds in-flight requests against the
/// rate-sensitive upstream.
pub const CHUNK_SIZE: usize = 15;

/// Fetches one chunk concurrently and recombines results in request order:
/// slot `i` corresponds to `ids[i]`. Per-id failures become absence so one
/// bad id cannot sink its siblings; cancellation discards the whole chunk.
pub(crate) async fn fetch_chunk(
    fetcher: &dyn Fetcher,
    ids: &[u64],
    cancel: &CancelToken,
) -> Result<Vec<Option<Item>>> {
    cancel.check()?;

    let results = join_all(ids.iter().map(|&id| fetcher.fetch_item(id))).await;

    // Results that arrive after cancellation are discarded unconditionally.
    cancel.check()?;

    let slots = ids
        .iter()
        .zip(results)
        .map(|(&id, result)| match result {
            Ok(item) => item,
            Err(e) => {
                tracing::debug!(id, error = %e, "item fetch failed, treating as absent");
                None
            }
        })
        .collect();

    Ok(slots)
}

/// Batch fetch-by-ids: chunked, concurrent within a chunk, ordered output.
///
/// Missing and suppressed items are silently excluded and do not count
/// toward `target`. Chunk issuance stops early once `target` live items
/// have been collected; the tail of the final chunk may push the output
/// slightly past it.
pub async fn fetch_items(
    fetcher: &dyn Fetcher,
    ids: &[u64],
    target: Option<usize>,
    cancel: &CancelToken,
) -> Result<Vec<Item>> {
    let mut items = Vec::new();

    for chunk in ids.chunks(CHUNK_SIZE) {
        if target.is_some_and(|target| items.len() >= target) {
            break;
        }

        let fetched = fetch_chunk(fetcher, chunk, cancel).await?;
        items.extend(
            fetched
                .into_iter()
                .flatten()
                .filter(|item| !item.is_suppressed()),
        );
    }

    tracing::debug!(
        requested = ids.len(),
        fetched = items.len(),
        "batch fetch complete"
    );
    Ok(items)
}
