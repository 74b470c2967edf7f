#![forbid(unsafe_code)]

pub mod model;

pub use model::{
    MatchStatus, ProcessedResult, ProgressEvent, Session, SessionId, TaskType, TaskTypeError,
};
