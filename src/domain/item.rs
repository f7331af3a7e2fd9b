use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

use crate::domain::feed::FeedCategory;

/// Discriminator tag carried by every upstream item.
///
/// `Unknown` absorbs tags this crate does not recognize so a single odd
/// record cannot fail a whole batch; every qualification filter excludes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Story,
    Comment,
    Job,
    Poll,
    PollOpt,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One content record from the upstream API.
///
/// Every field except `id` may be absent upstream, so everything else is
/// optional or defaulted. `dead` and `deleted` are suppression flags: an
/// item carrying either exists but must never be rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: ItemType,
    #[serde(default)]
    pub by: Option<String>,
    /// Creation time in unix seconds; absence means "unknown age".
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Free-text body, HTML-bearing (comments and text posts).
    #[serde(default)]
    pub text: Option<String>,
    /// External link; absence implies a discussion-only item.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub descendants: Option<u32>,
    #[serde(default)]
    pub parent: Option<u64>,
    /// Child ids in the author's original reply order.
    #[serde(default)]
    pub kids: Vec<u64>,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Item {
    /// Suppressed items exist upstream but are excluded from all output.
    pub fn is_suppressed(&self) -> bool {
        self.dead || self.deleted
    }

    /// Category qualification filter, applied after fetching since the
    /// upstream lists cannot be filtered server-side.
    pub fn qualifies(&self, category: FeedCategory) -> bool {
        if self.is_suppressed() {
            return false;
        }
        match category {
            FeedCategory::Jobs => self.kind == ItemType::Job,
            FeedCategory::Comments => self.kind == ItemType::Comment && !self.text_is_blank(),
            _ => matches!(self.kind, ItemType::Story | ItemType::Poll),
        }
    }

    /// True when the body is absent or decodes to pure whitespace.
    pub fn text_is_blank(&self) -> bool {
        match &self.text {
            Some(text) => decode_html_entities(text).trim().is_empty(),
            None => true,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.time.and_then(|t| DateTime::from_timestamp(t as i64, 0))
    }
}
