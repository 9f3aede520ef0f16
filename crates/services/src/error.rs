//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::ExamStateError;
use storage::SessionError;

/// Errors emitted by the exam API client.
///
/// Timeout and unreachable are distinct variants so the UI can map them to
/// actionable messages instead of a generic failure.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("server unreachable")]
    Unreachable,

    #[error("request failed with status {status}: {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response shape: {0}")]
    Malformed(String),

    #[error(transparent)]
    Network(reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err)
        }
    }
}

/// Errors emitted by `ExamFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamFlowError {
    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("answer rejected by validator")]
    AnswerRejected { explanation: Option<String> },

    #[error("welcome returned no questions")]
    NoQuestions,

    #[error("action not available in this phase")]
    PhaseMismatch,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    State(#[from] ExamStateError),
}
