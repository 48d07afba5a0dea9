use crate::applications::domain::TransitionError;
use crate::config::ConfigError;
use crate::identity::service::AuthError;
use crate::rooms::domain::LedgerError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// One field-level validation message, surfaced in the `errors` array of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Storage failures shared by every repository trait.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Crate-wide error translated into the HTTP envelope at the route boundary.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Validation(Vec<FieldError>),
    Conflict(String),
    State(String),
    NotFound(String),
    Auth(AuthError),
    Internal(String),
}

impl AppError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Validation(errors) => {
                write!(f, "validation failed ({} field(s))", errors.len())
            }
            AppError::Conflict(message) => write!(f, "{}", message),
            AppError::State(message) => write!(f, "{}", message),
            AppError::NotFound(entity) => write!(f, "{} not found", entity),
            AppError::Auth(err) => write!(f, "{}", err),
            AppError::Internal(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Auth(err) => Some(err),
            AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::State(_)
            | AppError::NotFound(_)
            | AppError::Internal(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation failed".to_string(),
                Some(errors),
            ),
            AppError::Conflict(message) | AppError::State(message) => {
                (StatusCode::BAD_REQUEST, message, None)
            }
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"), None)
            }
            AppError::Auth(err) => {
                let status = if matches!(err, AuthError::Forbidden) {
                    StatusCode::FORBIDDEN
                } else {
                    StatusCode::UNAUTHORIZED
                };
                (status, err.to_string(), None)
            }
            AppError::Internal(message) => {
                tracing::error!(%message, "unexpected failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                tracing::error!(error = %self, "infrastructure failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        crate::http::failure(status, message, errors)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<LedgerError> for AppError {
    fn from(value: LedgerError) -> Self {
        Self::State(value.to_string())
    }
}

impl From<TransitionError> for AppError {
    fn from(value: TransitionError) -> Self {
        match value {
            TransitionError::EmptyComments => Self::Validation(vec![FieldError::new(
                "comments",
                "review comments must not be empty",
            )]),
            other => Self::State(other.to_string()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::Conflict => Self::Conflict("record already exists".to_string()),
            RepositoryError::NotFound => Self::NotFound("record".to_string()),
            RepositoryError::Unavailable(reason) => Self::Internal(reason),
        }
    }
}
