use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Classified failure of a status lookup. Each variant carries the device
/// identifier (or, for the boundary variants, a free-form detail).
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("No registration found for device \"{0}\".")]
    MissingRegistration(String),

    #[error("Unable to retrieve registration for device \"{0}\".")]
    RegistrationRetrieveFailure(String),

    #[error("Unable to retrieve status for device \"{0}\".")]
    StatusRetrieveFailure(String),

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Wire record the boundary layer hands back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub code: u16,
    pub error: String,
    pub message: String,
}

impl StatusError {
    pub fn code(&self) -> u16 {
        match self {
            StatusError::MissingRegistration(_) | StatusError::InvalidRequest(_) => 400,
            StatusError::Unauthenticated(_) => 401,
            StatusError::RegistrationRetrieveFailure(_) | StatusError::StatusRetrieveFailure(_) => 500,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StatusError::MissingRegistration(_) => "MissingRegistration",
            StatusError::RegistrationRetrieveFailure(_) => "RegistrationRetrieveFailure",
            StatusError::StatusRetrieveFailure(_) => "StatusRetrieveFailure",
            StatusError::Unauthenticated(_) => "Unauthenticated",
            StatusError::InvalidRequest(_) => "InvalidRequest",
        }
    }

    pub fn to_failure(&self) -> Failure {
        Failure {
            code: self.code(),
            error: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<StatusError> for Failure {
    fn from(err: StatusError) -> Self {
        err.to_failure()
    }
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_failure())).into_response()
    }
}
