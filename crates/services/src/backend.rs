use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use grade_core::{Session, SessionId, TaskType};

use crate::error::{StreamError, SubmitError};
use crate::stream::ProgressStream;

/// One file picked by the user, held in memory until submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// HTTP client for the grading backend.
///
/// Owns the reqwest client and the base URL; everything else borrows it.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit the archive and roster for processing.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Rejected` when the backend answers non-2xx (the
    /// JSON error body is surfaced verbatim), `SubmitError::Http` when the
    /// request never completes, and `SubmitError::MalformedResponse` when a
    /// 2xx body does not decode.
    pub async fn submit(
        &self,
        archive: UploadFile,
        roster: UploadFile,
        task_type: TaskType,
    ) -> Result<Session, SubmitError> {
        let form = Form::new()
            .part(
                "zip_file",
                Part::bytes(archive.bytes).file_name(archive.file_name),
            )
            .part(
                "csv_file",
                Part::bytes(roster.bytes).file_name(roster.file_name),
            )
            .text("task_type", task_type.as_str());

        let response = self
            .client
            .post(format!("{}/process", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("submission failed with status {status}"),
            };
            return Err(SubmitError::Rejected { status, message });
        }

        let body: ProcessResponse = response
            .json()
            .await
            .map_err(SubmitError::MalformedResponse)?;
        let task_type: TaskType = body.task_type.parse()?;

        Ok(Session::new(SessionId::new(body.session_id), task_type))
    }

    /// Open the progress event stream for a session.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::HttpStatus` on a non-2xx response and
    /// `StreamError::Transport` when the connection fails.
    pub async fn open_stream(&self, session: &Session) -> Result<ProgressStream, StreamError> {
        let response = self
            .client
            .get(format!("{}/stream/{}", self.base_url, session.id()))
            .query(&[("task_type", session.task_type().as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StreamError::HttpStatus(response.status()));
        }

        Ok(ProgressStream::new(response))
    }

    #[must_use]
    pub fn csv_download_url(&self, session_id: &SessionId) -> String {
        format!("{}/download/{}/csv", self.base_url, session_id)
    }

    #[must_use]
    pub fn excel_download_url(&self, session_id: &SessionId) -> String {
        format!("{}/download/{}/excel", self.base_url, session_id)
    }
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    session_id: String,
    task_type: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}
