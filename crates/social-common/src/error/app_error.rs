//! Application error types
//!
//! Unified error handling for the entire application.

use social_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("token expired")]
    TokenExpired,

    // Validation errors
    #[error("validation error: {0}")]
    Validation(String),

    // Database errors
    #[error("database error: {0}")]
    Database(String),

    // File storage errors
    #[error("storage error: {0}")]
    Storage(String),

    // Internal errors
    #[error("internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::Validation(_) => 400,

            // 401 Unauthorized
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,

            // 500 Internal Server Error
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::Snowflake;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidCredentials.status_code(), 401);
        assert_eq!(AppError::TokenExpired.status_code(), 401);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Storage("disk full".to_string()).status_code(), 500);
        assert_eq!(AppError::Config("bad port".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        assert_eq!(AppError::from(DomainError::AlreadyLiked).status_code(), 409);
        assert_eq!(AppError::from(DomainError::CannotFollowSelf).status_code(), 400);
        assert_eq!(AppError::from(DomainError::NotPostAuthor).status_code(), 403);
        assert_eq!(
            AppError::from(DomainError::PostNotFound(Snowflake::new(1))).status_code(),
            404
        );
        assert_eq!(
            AppError::from(DomainError::DatabaseError("x".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
        assert_eq!(AppError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(AppError::Storage("x".to_string()).error_code(), "STORAGE_ERROR");
        assert_eq!(
            AppError::from(DomainError::PostNotFound(Snowflake::new(1))).error_code(),
            "UNKNOWN_POST"
        );
    }

    #[test]
    fn test_internal_hides_source_message() {
        let err = AppError::Internal(anyhow::anyhow!("password hashing failed"));
        assert_eq!(err.to_string(), "internal server error");
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
