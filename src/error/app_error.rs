use crate::error::DatabaseErrorConverter;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Client-side variants (`Validation`, `ValidationErrors`, `BadRequest`,
/// `NotFound`, `RateLimited`) carry a message that is safe to return to the
/// caller. Every other variant is a server-side failure whose details are
/// logged and never exposed.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("{reason}")]
    Validation { field: String, reason: String },

    /// Validation errors collected from a validator-derived struct
    #[error("Validation failed: {}", summarize(errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("{message}")]
    BadRequest { message: String },

    /// Too many requests from the same client within the rate window
    #[error("Rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Upstream HTTP API failure
    #[error("External API error ({provider}): {message}")]
    ExternalApi {
        provider: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

fn summarize(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an upstream failure without an underlying cause.
    pub fn external(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ExternalApi {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Message safe to show the caller. Only meaningful for client errors.
    pub fn client_message(&self) -> String {
        match self {
            AppError::ValidationErrors { errors } => summarize(errors),
            other => other.to_string(),
        }
    }

    /// Whether the error was caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound { .. }
                | AppError::Validation { .. }
                | AppError::ValidationErrors { .. }
                | AppError::BadRequest { .. }
                | AppError::RateLimited { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<diesel_async::pooled_connection::PoolError>> for AppError {
    fn from(error: bb8::RunError<diesel_async::pooled_connection::PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::from(error),
        }
    }
}

impl From<crate::config::error::ConfigError> for AppError {
    fn from(error: crate::config::error::ConfigError) -> Self {
        let key = match &error {
            crate::config::error::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

/// Flattens nested struct and list errors into `parent.child` /
/// `parent[i].child` paths.
fn collect_field_errors(
    errors: &validator::ValidationErrors,
    prefix: &str,
    out: &mut Vec<ValidationFieldError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| ValidationFieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", path)),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = Vec::new();
        collect_field_errors(&errors, "", &mut collected);
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: collected }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

/// A handler failure tagged with the route's public error code.
///
/// Server-side causes are logged and replaced by `{"error": code}` with
/// HTTP 500; client-side causes keep their own status and message.
#[derive(Debug)]
pub struct RouteError {
    pub code: &'static str,
    pub source: AppError,
}

/// Attaches a route error code to a fallible result.
pub trait RouteResultExt<T> {
    fn or_route(self, code: &'static str) -> Result<T, RouteError>;
}

impl<T> RouteResultExt<T> for AppResult<T> {
    fn or_route(self, code: &'static str) -> Result<T, RouteError> {
        self.map_err(|source| RouteError { code, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct SaveForm {
        #[validate(length(min = 1, message = "userId required"))]
        user_id: String,
        #[validate(range(min = 1.0, message = "amount must be positive"))]
        amount: f64,
    }

    #[test]
    fn test_client_error_classification() {
        assert!(AppError::validation("amount", "bad").is_client_error());
        assert!(AppError::RateLimited { retry_after_secs: 3 }.is_client_error());
        assert!(!AppError::external("finnhub", "boom").is_client_error());
        assert!(
            !AppError::Internal {
                source: anyhow::anyhow!("x")
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_validation_display_is_reason_only() {
        let err = AppError::validation("symbols", "symbols required");
        assert_eq!(err.to_string(), "symbols required");
    }

    #[test]
    fn test_from_validator_errors_collects_sorted_fields() {
        let form = SaveForm {
            user_id: String::new(),
            amount: 0.0,
        };
        let err: AppError = form.validate().unwrap_err().into();
        match err {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "amount");
                assert_eq!(errors[0].message, "amount must be positive");
                assert_eq!(errors[1].field, "user_id");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_or_route_attaches_code() {
        let result: AppResult<()> = Err(AppError::external("openai", "down"));
        let err = result.or_route("coach_failed").unwrap_err();
        assert_eq!(err.code, "coach_failed");
        assert!(matches!(err.source, AppError::ExternalApi { .. }));
    }
}
