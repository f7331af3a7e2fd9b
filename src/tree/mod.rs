use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::app::{CancelToken, Result};
use crate::domain::{CommentNode, Item, ItemType};
use crate::fetcher::Fetcher;

/// Levels expanded below the root item.
pub const MAX_DEPTH: usize = 5;

/// Children expanded per level; ids past this are dropped, not queued.
pub const MAX_BREADTH: usize = 10;

/// Expands root-level comment ids into a bounded forest.
///
/// This is a best-effort preview of the (unbounded) discussion graph,
/// trading completeness for bounded latency and request count. Per-id
/// failures inside the tree are swallowed as absent branches so one bad
/// subtree cannot block its siblings; only cancellation aborts the build.
pub async fn build_comment_tree(
    fetcher: &dyn Fetcher,
    root_ids: &[u64],
    cancel: &CancelToken,
) -> Result<Vec<CommentNode>> {
    build_level(fetcher, root_ids.to_vec(), 0, cancel).await
}

fn build_level<'a>(
    fetcher: &'a dyn Fetcher,
    ids: Vec<u64>,
    depth: usize,
    cancel: &'a CancelToken,
) -> BoxFuture<'a, Result<Vec<CommentNode>>> {
    async move {
        if depth >= MAX_DEPTH || ids.is_empty() {
            return Ok(Vec::new());
        }
        cancel.check()?;

        let taken: Vec<u64> = ids.into_iter().take(MAX_BREADTH).collect();
        let fetched = join_all(taken.iter().map(|&id| fetcher.fetch_item(id))).await;
        cancel.check()?;

        let survivors: Vec<Item> = fetched
            .into_iter()
            .filter_map(|result| match result {
                Ok(Some(item)) if item.kind == ItemType::Comment && !item.is_suppressed() => {
                    Some(item)
                }
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(depth, error = %e, "comment fetch failed, dropping branch");
                    None
                }
            })
            .collect();

        // Sibling subtrees resolve concurrently; the children array still
        // reflects the author's original reply order.
        let forests = join_all(
            survivors
                .iter()
                .map(|item| build_level(fetcher, item.kids.clone(), depth + 1, cancel)),
        )
        .await;

        let mut nodes = Vec::with_capacity(survivors.len());
        for (comment, forest) in survivors.into_iter().zip(forests) {
            nodes.push(CommentNode {
                comment,
                children: forest?,
            });
        }
        Ok(nodes)
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EmbersError;
    use crate::fetcher::fake::{comment, story, FakeFetcher};

    #[tokio::test]
    async fn test_single_comment() {
        let fetcher = FakeFetcher::new().with_item(comment(1, Vec::new()));
        let cancel = CancelToken::new();
        let forest = build_comment_tree(&fetcher, &[1], &cancel).await.unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].comment.id, 1);
        assert!(forest[0].children.is_empty());
    }

    #[tokio::test]
    async fn test_depth_is_bounded() {
        // A reply chain seven levels deep: 1 → 2 → … → 7.
        let mut fetcher = FakeFetcher::new();
        for id in 1..=7u64 {
            let kids = if id < 7 { vec![id + 1] } else { Vec::new() };
            fetcher = fetcher.with_item(comment(id, kids));
        }
        let cancel = CancelToken::new();

        let forest = build_comment_tree(&fetcher, &[1], &cancel).await.unwrap();
        // Nodes occupy levels 0 through 4; the level-4 node keeps no
        // children even though id 6 exists upstream.
        assert_eq!(forest[0].depth(), MAX_DEPTH - 1);
        assert_eq!(forest[0].count(), MAX_DEPTH);
        // Ids 6 and 7 were never requested.
        assert_eq!(fetcher.item_calls(), 5);
    }

    #[tokio::test]
    async fn test_breadth_is_bounded_in_order() {
        let kids: Vec<u64> = (10..25).collect();
        let mut fetcher = FakeFetcher::new().with_item(comment(1, kids.clone()));
        for &id in &kids {
            fetcher = fetcher.with_item(comment(id, Vec::new()));
        }
        let cancel = CancelToken::new();

        let forest = build_comment_tree(&fetcher, &[1], &cancel).await.unwrap();
        let child_ids: Vec<u64> = forest[0].children.iter().map(|c| c.comment.id).collect();
        // Exactly the first ten, original order, no error for the rest.
        assert_eq!(child_ids, (10..20).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_non_comments_and_suppressed_are_dropped() {
        let mut ghost = comment(3, Vec::new());
        ghost.deleted = true;
        let fetcher = FakeFetcher::new()
            .with_item(comment(1, Vec::new()))
            .with_item(story(2))
            .with_item(ghost);
        let cancel = CancelToken::new();

        // Id 5 does not exist.
        let forest = build_comment_tree(&fetcher, &[1, 2, 3, 5], &cancel).await.unwrap();
        let ids: Vec<u64> = forest.iter().map(|node| node.comment.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_failed_branch_does_not_block_siblings() {
        let fetcher = FakeFetcher::new()
            .with_item(comment(1, Vec::new()))
            .failing_id(2)
            .with_item(comment(3, Vec::new()));
        let cancel = CancelToken::new();

        let forest = build_comment_tree(&fetcher, &[1, 2, 3], &cancel).await.unwrap();
        let ids: Vec<u64> = forest.iter().map(|node| node.comment.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_sibling_order_survives_expansion() {
        let fetcher = FakeFetcher::new()
            .with_item(comment(9, vec![4]))
            .with_item(comment(2, Vec::new()))
            .with_item(comment(7, Vec::new()))
            .with_item(comment(4, Vec::new()));
        let cancel = CancelToken::new();

        let forest = build_comment_tree(&fetcher, &[9, 2, 7], &cancel).await.unwrap();
        let ids: Vec<u64> = forest.iter().map(|node| node.comment.id).collect();
        assert_eq!(ids, vec![9, 2, 7]);
        assert_eq!(forest[0].children[0].comment.id, 4);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_the_build() {
        let fetcher = FakeFetcher::new()
            .with_item(comment(1, vec![2]))
            .with_item(comment(2, Vec::new()));
        let cancel = CancelToken::new();
        let fetcher = fetcher.cancel_after(1, cancel.clone());

        let result = build_comment_tree(&fetcher, &[1], &cancel).await;
        assert!(matches!(result, Err(EmbersError::Cancelled)));
    }
}
