//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{Pagination, DEFAULT_LIMIT, MAX_LIMIT};
pub use path::{parse_id, IdPath};
pub use validated::ValidatedJson;
