//! Repository traits

mod repositories;

pub use repositories::{
    FollowRepository, LikeRepository, MediaRepository, NotificationRepository, PostRepository,
    RepoResult, SearchRepository, TimelineRepository, UserRepository,
};
