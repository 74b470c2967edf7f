//! Shared error types for the services crate.

use thiserror::Error;

use grade_core::TaskTypeError;

/// Errors emitted while submitting a bundle to the processing endpoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The backend rejected the submission with a JSON error body.
    #[error("{message}")]
    Rejected {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("backend returned a malformed submission response")]
    MalformedResponse(#[source] reqwest::Error),
    #[error(transparent)]
    TaskType(#[from] TaskTypeError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl SubmitError {
    /// True when the request never completed, as opposed to the backend
    /// answering with an error.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Errors emitted by the progress event stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StreamError {
    #[error("stream request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
