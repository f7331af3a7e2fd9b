//! In-memory [`Fetcher`] for tests, plus item constructors shared across
//! test modules.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::app::{CancelToken, EmbersError, Result};
use crate::domain::{Item, ItemType, User};
use crate::fetcher::Fetcher;

pub(crate) fn item(id: u64, kind: ItemType) -> Item {
    Item {
        id,
        kind,
        by: Some(format!("user{id}")),
        time: Some(1_700_000_000 + id),
        title: Some(format!("item {id}")),
        text: None,
        url: None,
        score: 1,
        descendants: None,
        parent: None,
        kids: Vec::new(),
        dead: false,
        deleted: false,
    }
}

pub(crate) fn story(id: u64) -> Item {
    item(id, ItemType::Story)
}

pub(crate) fn job(id: u64) -> Item {
    item(id, ItemType::Job)
}

pub(crate) fn comment(id: u64, kids: Vec<u64>) -> Item {
    let mut comment = item(id, ItemType::Comment);
    comment.title = None;
    comment.text = Some(format!("comment {id}"));
    comment.kids = kids;
    comment
}

pub(crate) fn user(handle: &str) -> User {
    User {
        id: handle.to_string(),
        created: Some(1_600_000_000),
        karma: 100,
        about: None,
        submitted: Vec::new(),
    }
}

/// Programmable fetcher: a fixed entity universe, per-id transport failures,
/// an item-fetch call counter, and an optional hook that trips a
/// [`CancelToken`] once enough item fetches have gone through.
pub(crate) struct FakeFetcher {
    items: HashMap<u64, Item>,
    users: HashMap<String, User>,
    lists: HashMap<String, Vec<u64>>,
    updates: Vec<u64>,
    failing: HashSet<u64>,
    item_calls: AtomicUsize,
    cancel_hook: Mutex<Option<(usize, CancelToken)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            users: HashMap::new(),
            lists: HashMap::new(),
            updates: Vec::new(),
            failing: HashSet::new(),
            item_calls: AtomicUsize::new(0),
            cancel_hook: Mutex::new(None),
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.insert(item.id, item);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    pub fn with_list(mut self, name: &str, ids: Vec<u64>) -> Self {
        self.lists.insert(name.to_string(), ids);
        self
    }

    pub fn with_updates(mut self, ids: Vec<u64>) -> Self {
        self.updates = ids;
        self
    }

    /// Makes `fetch_item(id)` fail with a transport-style error.
    pub fn failing_id(mut self, id: u64) -> Self {
        self.failing.insert(id);
        self
    }

    /// Trips `token` once `count` item fetches have been served, simulating
    /// a supersession that lands mid-operation.
    pub fn cancel_after(self, count: usize, token: CancelToken) -> Self {
        *self.cancel_hook.lock().unwrap() = Some((count, token));
        self
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_item(&self, id: u64) -> Result<Option<Item>> {
        let calls = self.item_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((count, token)) = &*self.cancel_hook.lock().unwrap() {
            if calls >= *count {
                token.cancel();
            }
        }

        if self.failing.contains(&id) {
            return Err(EmbersError::Malformed(format!(
                "simulated transport failure for item {id}"
            )));
        }
        Ok(self.items.get(&id).cloned())
    }

    async fn fetch_user(&self, handle: &str) -> Result<Option<User>> {
        Ok(self.users.get(handle).cloned())
    }

    async fn fetch_id_list(&self, list: &str) -> Result<Vec<u64>> {
        self.lists.get(list).cloned().ok_or_else(|| EmbersError::Status {
            status: 404,
            url: format!("fake://{list}.json"),
        })
    }

    async fn fetch_updates(&self) -> Result<Vec<u64>> {
        Ok(self.updates.clone())
    }
}
