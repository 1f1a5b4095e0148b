//! Service layer error types
//!
//! Wraps domain and application errors, plus the few failures that only
//! the service layer can detect (bad multipart input, storage I/O).

use social_common::AppError;
use social_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, token, config)
    App(AppError),

    /// Validation error
    Validation(String),

    /// File system failure while storing or removing uploads
    Storage(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "{msg}"),
            Self::Storage(msg) => write!(f, "storage error: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
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
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::Storage(_) | Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::Domain(e),
            other => Self::App(other),
        }
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(first_validation_message(&err))
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Storage(msg) => AppError::Storage(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Pick the first field message out of a validator report.
///
/// Field order in `ValidationErrors` is a hash map order, so the fields are
/// sorted by name to keep the message stable.
pub fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .unwrap_or_else(|| "invalid request".to_string())
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::Snowflake;
    use validator::Validate;

    #[test]
    fn test_io_error_is_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only upload dir");
        let err = ServiceError::from(io);
        assert!(matches!(err, ServiceError::Storage(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_internal_error() {
        let err = ServiceError::internal("annotation dropped the post");
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_domain_mapping() {
        assert_eq!(ServiceError::from(DomainError::AlreadyLiked).status_code(), 409);
        assert_eq!(ServiceError::from(DomainError::NotMediaOwner).status_code(), 403);
        assert_eq!(
            ServiceError::from(DomainError::PostNotFound(Snowflake::new(1))).status_code(),
            404
        );
        assert_eq!(
            ServiceError::from(DomainError::ContentTooLong { max: 280 }).status_code(),
            400
        );
    }

    #[test]
    fn test_app_domain_is_unwrapped() {
        let err = ServiceError::from(AppError::Domain(DomainError::CannotFollowSelf));
        assert!(matches!(err, ServiceError::Domain(DomainError::CannotFollowSelf)));
    }

    #[test]
    fn test_convert_to_app_error() {
        let app_err: AppError =
            ServiceError::from(DomainError::PostNotFound(Snowflake::new(456))).into();
        assert_eq!(app_err.status_code(), 404);

        let app_err: AppError = ServiceError::validation("no files provided").into();
        assert!(matches!(app_err, AppError::Validation(_)));
        assert_eq!(app_err.status_code(), 400);

        let app_err: AppError = ServiceError::Storage("disk full".to_string()).into();
        assert_eq!(app_err.error_code(), "STORAGE_ERROR");
    }

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 3, message = "username must be 3-50 characters"))]
        username: String,
    }

    #[test]
    fn test_validation_errors_message() {
        let signup = Signup {
            username: "ab".to_string(),
        };
        let err = ServiceError::from(signup.validate().unwrap_err());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "username must be 3-50 characters");
    }
}
