use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::domain::{FeedCategory, FeedSnapshot, Post, User};

/// Feeds reorder constantly.
pub const FEED_TTL: Duration = Duration::from_secs(60);
/// Threads accrete comments at a slower pace.
pub const POST_TTL: Duration = Duration::from_secs(120);
/// Profiles almost never change.
pub const USER_TTL: Duration = Duration::from_secs(300);

struct Entry<V> {
    value: V,
    stored_at: Instant,
}

/// Generic time-bounded key-value store.
///
/// An entry is valid while `now − stored_at ≤ TTL`; an expired entry is
/// evicted on the read that finds it, never proactively. Absence is a
/// single bit — expired, evicted, and never-written look the same to the
/// reader. Writes unconditionally overwrite with a fresh timestamp. There
/// is no capacity bound: the key space (categories + viewed posts + viewed
/// users) stays small over a session.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    fn get_at(&mut self, key: &K, now: Instant) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) <= self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at: now,
            },
        );
    }
}

/// The three cache classes of one browsing session: feed snapshots by
/// category, posts by id, users by lowercased handle.
///
/// Values live here for the session's lifetime only; nothing persists.
/// Locks are taken for single map operations and never held across an
/// await.
pub struct SessionCache {
    feeds: Mutex<TtlCache<FeedCategory, FeedSnapshot>>,
    posts: Mutex<TtlCache<u64, Post>>,
    users: Mutex<TtlCache<String, User>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            feeds: Mutex::new(TtlCache::new(FEED_TTL)),
            posts: Mutex::new(TtlCache::new(POST_TTL)),
            users: Mutex::new(TtlCache::new(USER_TTL)),
        }
    }

    pub fn get_feed(&self, category: FeedCategory) -> Option<FeedSnapshot> {
        self.feeds.lock().expect("feed cache poisoned").get(&category)
    }

    pub fn put_feed(&self, snapshot: FeedSnapshot) {
        self.feeds
            .lock()
            .expect("feed cache poisoned")
            .insert(snapshot.category, snapshot);
    }

    pub fn get_post(&self, id: u64) -> Option<Post> {
        self.posts.lock().expect("post cache poisoned").get(&id)
    }

    pub fn put_post(&self, post: Post) {
        self.posts
            .lock()
            .expect("post cache poisoned")
            .insert(post.item.id, post);
    }

    /// Handles are case-significant for upstream lookup but one profile for
    /// caching purposes.
    pub fn get_user(&self, handle: &str) -> Option<User> {
        self.users
            .lock()
            .expect("user cache poisoned")
            .get(&handle.to_lowercase())
    }

    pub fn put_user(&self, user: User) {
        let key = user.id.to_lowercase();
        self.users
            .lock()
            .expect("user cache poisoned")
            .insert(key, user);
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
