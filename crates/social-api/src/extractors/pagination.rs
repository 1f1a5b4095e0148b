//! Pagination extractor
//!
//! Extracts `limit`/`offset` query parameters. Each endpoint picks its own
//! default and maximum page size when resolving them.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use social_core::PageRequest;

use crate::response::ApiError;

/// Default page size for listings
pub const DEFAULT_LIMIT: i64 = 20;
/// Maximum page size for listings
pub const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl Pagination {
    /// Page with the standard default of 20 and maximum of 100
    pub fn page(&self) -> PageRequest {
        self.page_with(DEFAULT_LIMIT, MAX_LIMIT)
    }

    pub fn page_with(&self, default: i64, max: i64) -> PageRequest {
        PageRequest::new(self.limit, self.offset, default, max)
    }

    /// Limit alone, for endpoints without an offset
    pub fn limit_with(&self, default: i64, max: i64) -> i64 {
        self.page_with(default, max).limit
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<Pagination>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(params)
    }
}
