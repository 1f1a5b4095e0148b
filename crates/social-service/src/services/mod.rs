//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod follow;
pub mod like;
pub mod media;
pub mod notification;
pub mod post;
pub mod search;
pub mod timeline;
pub mod user;
mod viewer;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{first_validation_message, ServiceError, ServiceResult};
pub use follow::FollowService;
pub use like::LikeService;
pub use media::{MediaService, MediaStore, StoredFile, UploadedFile, MAX_FILES_PER_UPLOAD, ORPHAN_GRACE_HOURS};
pub use notification::NotificationService;
pub use post::PostService;
pub use search::SearchService;
pub use timeline::{TimelineService, TRENDING_WINDOW_DAYS};
pub use user::UserService;
