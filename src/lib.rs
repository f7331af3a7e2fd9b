//! # Embers
//!
//! A read-only client data layer for the Hacker News API.
//!
//! ## Architecture
//!
//! Embers follows a modular pipeline architecture:
//!
//! ```text
//! Feed resolver → Fetcher → Tree builder → Session cache
//! ```
//!
//! - [`feed`]: category → ranked id list, plus cursor-based pagination
//! - [`fetcher`]: the upstream API seam and chunked concurrent batch fetch
//! - [`tree`]: depth/breadth-bounded comment-tree expansion
//! - [`cache`]: time-bounded memoization of feeds, posts, and users
//!
//! The upstream API offers only id-addressed reads (one item, one user, one
//! ranked id list per request), so everything here is about spending those
//! requests carefully: fixed-size concurrent chunks, early exit once a page
//! is full, bounded recursion into comment threads, and TTL caches sized to
//! how fast each entity class actually changes.
//!
//! ## Quick start
//!
//! ```no_run
//! use embers::app::{AppContext, CancelToken};
//! use embers::domain::FeedCategory;
//!
//! # async fn run() -> embers::app::Result<()> {
//! let ctx = AppContext::new();
//! let cancel = CancelToken::new();
//! let snapshot = ctx.load_feed(FeedCategory::Top, false, &cancel).await?;
//! for item in &snapshot.items {
//!     println!("{}", item.display_title());
//! }
//! # Ok(())
//! # }
//! ```

/// Application context, error types, and cancellation.
///
/// [`AppContext`](app::AppContext) wires the fetcher and the session cache
/// together and hosts the cached top-level operations.
pub mod app;

/// Time-bounded key-value caching.
///
/// - [`TtlCache`](cache::TtlCache): generic `(value, timestamp)` store
/// - [`SessionCache`](cache::SessionCache): feed/post/user instances
pub mod cache;

/// Core domain models.
///
/// - [`Item`](domain::Item): one content record (story/comment/job/poll)
/// - [`User`](domain::User): a profile record
/// - [`CommentNode`](domain::CommentNode): an item plus its bounded subtree
/// - [`FeedCategory`](domain::FeedCategory): the fixed set of feed views
pub mod domain;

/// Feed id-list resolution and pagination.
///
/// - [`resolve_feed_ids`](feed::resolve_feed_ids): category → ordered ids
/// - [`fetch_page`](feed::fetch_page): one page of qualifying items plus a
///   resumption cursor
pub mod feed;

/// Upstream API access.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait over the id-addressed reads
/// - [`HttpFetcher`](fetcher::http::HttpFetcher): reqwest-based implementation
/// - [`batch`](fetcher::batch): chunked concurrent fetch-by-ids
pub mod fetcher;

/// Bounded comment-tree building.
///
/// Expands child-id lists into a forest of [`CommentNode`](domain::CommentNode)s,
/// at most 5 levels deep and 10 children wide per level.
pub mod tree;
