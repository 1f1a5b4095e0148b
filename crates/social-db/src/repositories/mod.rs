//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in social-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod follow;
mod like;
mod media;
mod notification;
mod post;
mod search;
mod sql;
mod timeline;
mod user;

pub use follow::PgFollowRepository;
pub use like::PgLikeRepository;
pub use media::PgMediaRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use search::PgSearchRepository;
pub use timeline::PgTimelineRepository;
pub use user::PgUserRepository;
