use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A profile record from the upstream API.
///
/// The handle is case-significant for lookup but cached case-insensitively;
/// see [`SessionCache`](crate::cache::SessionCache).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub karma: i64,
    /// HTML-bearing "about" blurb.
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub submitted: Vec<u64>,
}

impl User {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|t| DateTime::from_timestamp(t as i64, 0))
    }
}
