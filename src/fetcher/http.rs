use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::app::{EmbersError, Result};
use crate::domain::{Item, User};
use crate::fetcher::Fetcher;

pub const BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

/// reqwest-based [`Fetcher`] against the public API.
///
/// Entity reads are lenient: null bodies, non-2xx statuses, and payloads
/// without a usable id all surface as `Ok(None)`, because absence is common
/// and expected. List reads are strict: the resolver needs the whole list or
/// an error it can report.
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let base = Url::parse(BASE_URL).expect("Invalid base URL constant");
        Self::with_base(base)
    }

    /// Point at a different base address (test servers, mirrors).
    pub fn with_base(base: Url) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent("embers/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client, base }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_item(&self, id: u64) -> Result<Option<Item>> {
        let url = self.endpoint(&format!("item/{id}.json"));
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::debug!(id, status = %response.status(), "item fetch returned non-success, treating as absent");
            return Ok(None);
        }

        let value = match response.json::<Value>().await {
            Ok(value) => value,
            Err(e) if e.is_decode() => {
                tracing::debug!(id, error = %e, "undecodable item body, treating as absent");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(parse_item(value))
    }

    async fn fetch_user(&self, handle: &str) -> Result<Option<User>> {
        let url = self.endpoint(&format!("user/{handle}.json"));
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::debug!(handle, status = %response.status(), "user fetch returned non-success, treating as absent");
            return Ok(None);
        }

        let value = match response.json::<Value>().await {
            Ok(value) => value,
            Err(e) if e.is_decode() => {
                tracing::debug!(handle, error = %e, "undecodable user body, treating as absent");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(parse_user(value))
    }

    async fn fetch_id_list(&self, list: &str) -> Result<Vec<u64>> {
        let url = self.endpoint(&format!("{list}.json"));
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbersError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let value: Value = response.json().await?;
        let ids = value
            .as_array()
            .map(|values| numeric_ids(values))
            .ok_or_else(|| EmbersError::Malformed(format!("{list} did not return an id array")))?;

        tracing::debug!(list, count = ids.len(), "resolved ranked id list");
        Ok(ids)
    }

    async fn fetch_updates(&self) -> Result<Vec<u64>> {
        let url = self.endpoint("updates.json");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbersError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let value: Value = response.json().await?;
        let ids = value
            .get("items")
            .and_then(Value::as_array)
            .map(|values| numeric_ids(values))
            .ok_or_else(|| {
                EmbersError::Malformed("updates feed is missing its items field".into())
            })?;

        tracing::debug!(count = ids.len(), "resolved updates feed");
        Ok(ids)
    }
}

/// A payload without a numeric `id` field is malformed and counts as absent.
fn parse_item(value: Value) -> Option<Item> {
    value.get("id")?.as_u64()?;
    serde_json::from_value(value).ok()
}

fn parse_user(value: Value) -> Option<User> {
    value.get("id")?.as_str()?;
    serde_json::from_value(value).ok()
}

/// Defensive filter against malformed upstream lists: anything non-numeric
/// is dropped without error.
fn numeric_ids(values: &[Value]) -> Vec<u64> {
    values.iter().filter_map(Value::as_u64).collect()
}
