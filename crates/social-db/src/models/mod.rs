//! Database models - SQLx-compatible structs for PostgreSQL tables

mod notification;
mod post;
mod user;

pub use notification::{MediaModel, NotificationModel};
pub use post::{AuthoredPostModel, HashtagCountModel, HashtagModel, PostModel};
pub use user::{UserModel, UserStatsModel};
