#![forbid(unsafe_code)]

pub mod backend;
pub mod error;
pub mod session;
pub mod stream;

pub use backend::{BackendClient, UploadFile};
pub use error::{StreamError, SubmitError};
pub use session::{
    ExportFiles, Notice, Phase, ProgressSnapshot, RowEntry, SessionState, StreamDisposition,
};
pub use stream::ProgressStream;
