use crate::ctx::ResponseCtx;
use crate::security::SecurityViolation;
use http::StatusCode;
use thiserror::Error;

/// Why a stage failed the request.
///
/// Only [`StageError::Security`] and [`StageError::NotFound`] carry a message
/// meant for the client. The other kinds are logged in full and answered
/// with a generic `500`.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Security(#[from] SecurityViolation),

    #[error("File not found: {0}")]
    NotFound(String),

    /// Deployment problem such as a missing front controller.
    #[error("configuration fault: {0}")]
    Configuration(String),

    /// Anything else, including failures of custom stages.
    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl StageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Security(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            Self::Security(_) | Self::NotFound(_) => self.to_string(),
            Self::Configuration(_) | Self::Unclassified(_) => "Internal Server Error".to_string(),
        }
    }

    pub fn to_response(&self) -> ResponseCtx {
        ResponseCtx::text(self.status(), self.client_message())
    }
}
