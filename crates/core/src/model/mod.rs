mod event;
mod session;

pub use event::{MatchStatus, ProcessedResult, ProgressEvent};
pub use session::{Session, SessionId, TaskType, TaskTypeError};
