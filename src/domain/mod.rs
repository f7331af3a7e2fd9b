pub mod comment;
pub mod feed;
pub mod item;
pub mod user;

pub use comment::{CommentNode, Post};
pub use feed::{FeedCategory, FeedPage, FeedSnapshot};
pub use item::{Item, ItemType};
pub use user::User;
