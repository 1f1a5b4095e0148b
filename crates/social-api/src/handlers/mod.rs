//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod comments;
pub mod follows;
pub mod health;
pub mod likes;
pub mod media;
pub mod notifications;
pub mod posts;
pub mod search;
pub mod timeline;
pub mod users;
