use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::item::Item;

/// The closed set of feed views. Each determines which ranked id list is
/// fetched and which qualification filter applies to its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedCategory {
    Top,
    New,
    Past,
    Comments,
    Ask,
    Show,
    Jobs,
    Submit,
}

impl FeedCategory {
    pub const ALL: [FeedCategory; 8] = [
        FeedCategory::Top,
        FeedCategory::New,
        FeedCategory::Past,
        FeedCategory::Comments,
        FeedCategory::Ask,
        FeedCategory::Show,
        FeedCategory::Jobs,
        FeedCategory::Submit,
    ];

    /// Upstream ranked-list endpoint backing this category, if any.
    ///
    /// `past` reads the same list as `top` and skips its first page via
    /// [`start_offset`](Self::start_offset). `comments` goes through the
    /// updates feed instead, and `submit` is a local-only placeholder.
    pub fn ranked_endpoint(self) -> Option<&'static str> {
        match self {
            FeedCategory::Top | FeedCategory::Past => Some("topstories"),
            FeedCategory::New => Some("newstories"),
            FeedCategory::Ask => Some("askstories"),
            FeedCategory::Show => Some("showstories"),
            FeedCategory::Jobs => Some("jobstories"),
            FeedCategory::Comments | FeedCategory::Submit => None,
        }
    }

    /// Fixed pagination offset into the id list. The first 30 ids of the
    /// `past` list belong to the front page and are skipped.
    pub fn start_offset(self) -> usize {
        match self {
            FeedCategory::Past => 30,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedCategory::Top => "top",
            FeedCategory::New => "new",
            FeedCategory::Past => "past",
            FeedCategory::Comments => "comments",
            FeedCategory::Ask => "ask",
            FeedCategory::Show => "show",
            FeedCategory::Jobs => "jobs",
            FeedCategory::Submit => "submit",
        }
    }
}

impl fmt::Display for FeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of qualifying items plus the absolute index to resume from.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<Item>,
    /// Next unfetched position in the backing id list. Chaining this into
    /// the next call yields the next distinct page, never a replay.
    pub next_index: usize,
}

/// Everything known about one category's feed within the session: the full
/// ranked id list, the items materialized so far, and the advance-only
/// cursor into the list.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub category: FeedCategory,
    pub ids: Vec<u64>,
    pub items: Vec<Item>,
    pub cursor: usize,
}

impl FeedSnapshot {
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.ids.len()
    }
}
