use serde::{Deserialize, Serialize};

use crate::domain::item::Item;

/// A comment plus its expanded children, in the author's original reply
/// order.
///
/// Trees are a bounded preview of the real discussion graph: at most
/// [`MAX_DEPTH`](crate::tree::MAX_DEPTH) levels deep and
/// [`MAX_BREADTH`](crate::tree::MAX_BREADTH) children per level. Ids past
/// the bounds are dropped, not queued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    pub comment: Item,
    pub children: Vec<CommentNode>,
}

/// A post together with its materialized comment tree; the unit the post
/// cache stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub item: Item,
    pub comments: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(comment: Item) -> Self {
        Self {
            comment,
            children: Vec::new(),
        }
    }

    /// Number of comments in this subtree, the node itself included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CommentNode::count).sum::<usize>()
    }

    /// Deepest level below this node; a leaf reports 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}
