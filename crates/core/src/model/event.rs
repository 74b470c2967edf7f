use serde::{Deserialize, Serialize};

/// Whether the submitter's name was matched against the roster.
///
/// The backend reports `"success"` for exact and fuzzy matches alike; any
/// other value means no roster entry was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Success,
    #[serde(other)]
    NoMatch,
}

impl MatchStatus {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// One successfully graded file, as reported inside a `progress` event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResult {
    pub file_name: String,
    pub student_name: String,
    #[serde(default)]
    pub matched_name: Option<String>,
    #[serde(default)]
    pub match_percentage: u32,
    pub match_status: MatchStatus,
    /// Grade extracted from the generated feedback, e.g. `"8/10"`.
    #[serde(default)]
    pub score: Option<String>,
    /// Full feedback text. Shown only in the feedback modal.
    #[serde(default)]
    pub comment: Option<String>,
    /// Server-truncated preview of `comment` (150 chars + ellipsis).
    #[serde(default)]
    pub comment_preview: Option<String>,
}

/// One decoded message from the `/stream/{session_id}` event stream.
///
/// `error` is a per-file failure and leaves the stream open; `complete` and
/// `fatal_error` are terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    Progress {
        current: u32,
        total: u32,
        percentage: u8,
        result: ProcessedResult,
    },
    Complete {
        total: u32,
        #[serde(default)]
        csv_filename: Option<String>,
        #[serde(default)]
        excel_filename: Option<String>,
    },
    Error {
        file: String,
        message: String,
    },
    FatalError {
        message: String,
    },
}

impl ProgressEvent {
    /// Terminal events end the stream; the connection must be closed after
    /// dispatching one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete { .. } | Self::FatalError { .. })
    }
}
