use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque, server-issued identifier for one upload-to-download workflow.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new `SessionId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown task type: {raw}")]
pub struct TaskTypeError {
    pub raw: String,
}

/// Which grading instruction set the backend should apply to the bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Reading,
    Oral,
    Essay,
}

impl TaskType {
    pub const ALL: [Self; 3] = [Self::Reading, Self::Oral, Self::Essay];

    /// The wire value understood by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::Oral => "oral",
            Self::Essay => "essay",
        }
    }

    /// Human-readable label for selection controls.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Oral => "Oral",
            Self::Essay => "Essay",
        }
    }
}

impl FromStr for TaskType {
    type Err = TaskTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reading" => Ok(Self::Reading),
            "oral" => Ok(Self::Oral),
            "essay" => Ok(Self::Essay),
            other => Err(TaskTypeError {
                raw: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One live grading workflow, as acknowledged by the backend.
///
/// Exactly one `Session` exists per UI instance; it is owned by the session
/// state machine and read (never written) by everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    task_type: TaskType,
}

impl Session {
    #[must_use]
    pub fn new(id: SessionId, task_type: TaskType) -> Self {
        Self { id, task_type }
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn task_type(&self) -> TaskType {
        self.task_type
    }
}
