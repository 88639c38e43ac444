//! Error handling primitives shared across the core.

use thiserror::Error;

use crate::features::domain::ValidationError;

/// Stable error codes, attached to log events and used to pick HTTP statuses.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SurvCode {
    /// An artifact was missing, unreadable or inconsistent at startup.
    StartupFailure = 0,
    /// Required features were absent from a request.
    MissingFields = 1,
    /// A feature value could not be coerced to a number.
    InvalidValue = 2,
    /// Scaling or prediction failed for a well-formed request.
    Internal = 3,
}

/// Canonical error type for the core.
#[derive(Debug, Error)]
pub enum SurvError {
    /// Artifact loading failed; the process must not serve traffic.
    #[error("cannot load {artifact} from {path}: {reason}")]
    Startup {
        artifact: &'static str,
        path: String,
        reason: String,
    },

    /// The request record did not satisfy the feature schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any failure raised while scaling or predicting.
    #[error("{0}")]
    Internal(String),
}

/// Result alias used throughout the crate.
pub type SurvResult<T> = Result<T, SurvError>;

impl SurvError {
    /// Startup helper.
    pub fn startup(
        artifact: &'static str,
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Startup {
            artifact,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Internal error helper.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Machine parsable code for this error.
    pub fn code(&self) -> SurvCode {
        match self {
            SurvError::Startup { .. } => SurvCode::StartupFailure,
            SurvError::Validation(ValidationError::MissingFields(_)) => SurvCode::MissingFields,
            SurvError::Validation(ValidationError::InvalidValue { .. }) => SurvCode::InvalidValue,
            SurvError::Internal(_) => SurvCode::Internal,
        }
    }

    /// Whether the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SurvError::Validation(_))
    }
}
