//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreatePostRequest, LoginRequest, RefreshTokenRequest, RegisterRequest,
    UpdatePostRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, CommentListResponse, CommentResponse, DeletedCountResponse,
    FollowCountsResponse, FollowStatusResponse, FollowersResponse, FollowingResponse,
    HashtagListResponse, HashtagResponse, HealthChecks, HealthResponse, LikeStatusResponse,
    MediaResponse, MessageResponse, MultiUploadResponse, NotificationListResponse,
    NotificationResponse, PageMeta, PostListResponse, PostMediaResponse, PostResponse,
    PostSummary, ReadinessResponse, ReplyListResponse, SearchResponse, SuggestedUsersResponse,
    TimelineResponse, TrendingHashtagsResponse, UnreadCountResponse, UpdatedCountResponse,
    UploadResponse, UserListResponse, UserPublic, UserSummary,
};
