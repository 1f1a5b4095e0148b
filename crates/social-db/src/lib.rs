//! # social-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `social-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - Repository implementations
//!
//! Counter updates that accompany a detail row (likes, replies, reposts) run
//! in the same transaction as the row itself.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use social_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use social_db::repositories::PgUserRepository;
//! use social_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::with_url("postgres://localhost/social_db");
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgFollowRepository, PgLikeRepository, PgMediaRepository, PgNotificationRepository,
    PgPostRepository, PgSearchRepository, PgTimelineRepository, PgUserRepository,
};
