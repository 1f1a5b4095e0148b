//! # social-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, CommentService, FollowService, LikeService, MediaService, MediaStore,
    NotificationService, PostService, SearchService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, TimelineService, UploadedFile, UserService,
};
