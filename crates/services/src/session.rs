//! The session state machine.
//!
//! Owns the one live [`Session`] per UI instance and every phase transition.
//! All methods are synchronous and free of I/O; the caller (the UI's stream
//! pump) feeds decoded events in and acts on the returned disposition.

use grade_core::{ProcessedResult, ProgressEvent, Session};

/// Where the workflow currently is. Exactly one panel is visible per phase
/// (`Submitting` keeps the upload panel up with its controls disabled).
///
/// There is no `Error` phase: fatal paths land back on `Idle` with a notice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Processing,
    Complete,
}

/// Progress indicator values, as last reported by the stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub current: u32,
    pub total: u32,
    pub percentage: u8,
}

/// One line of the results table, in arrival order. Error rows are a side
/// channel: they render full-width and never count toward progress totals.
#[derive(Clone, Debug, PartialEq)]
pub enum RowEntry {
    Result(ProcessedResult),
    Error { file: String, message: String },
}

/// Export file names reported by the terminal `complete` event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportFiles {
    pub csv_filename: Option<String>,
    pub excel_filename: Option<String>,
}

/// A user-facing message that survives a phase transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The backend rejected the submission; the form stays populated.
    Submission(String),
    /// The whole session failed and was reset.
    Fatal(String),
    /// The stream transport dropped before a terminal event.
    ConnectionLost,
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Submission(message) | Self::Fatal(message) => message,
            Self::ConnectionLost => "Connection to the server was lost. Please try again.",
        }
    }
}

/// What the stream pump should do with the connection after an apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamDisposition {
    Continue,
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    phase: Phase,
    session: Option<Session>,
    progress: ProgressSnapshot,
    entries: Vec<RowEntry>,
    exports: ExportFiles,
    notice: Option<Notice>,
    stream_epoch: u64,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        self.progress
    }

    #[must_use]
    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    /// Count of successfully processed rows, excluding error rows.
    #[must_use]
    pub fn result_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, RowEntry::Result(_)))
            .count()
    }

    #[must_use]
    pub fn exports(&self) -> &ExportFiles {
        &self.exports
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The epoch of the stream currently allowed to mutate this state.
    /// Events carrying any other epoch are ignored.
    #[must_use]
    pub fn stream_epoch(&self) -> u64 {
        self.stream_epoch
    }

    /// True when `epoch` identifies the stream currently feeding this state
    /// and the session is still processing. Everything a stream reports is
    /// ignored once this turns false.
    #[must_use]
    pub fn is_live(&self, epoch: u64) -> bool {
        epoch == self.stream_epoch && self.phase == Phase::Processing
    }

    /// Enter `Submitting`. Returns false (and does nothing) unless the state
    /// is `Idle`, which is what makes double-submission a no-op.
    pub fn begin_submit(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.notice = None;
        self.phase = Phase::Submitting;
        true
    }

    /// The submission was rejected or never completed. Phase returns to
    /// `Idle`; the form fields are untouched so the user can retry.
    pub fn submit_failed(&mut self, notice: Notice) {
        self.phase = Phase::Idle;
        self.notice = Some(notice);
    }

    /// The backend acknowledged the upload. Stores the session, enters
    /// `Processing`, and returns the epoch the new stream must present.
    /// Any previously open stream is superseded by the epoch bump.
    pub fn begin_processing(&mut self, session: Session) -> u64 {
        self.session = Some(session);
        self.phase = Phase::Processing;
        self.progress = ProgressSnapshot::default();
        self.entries.clear();
        self.exports = ExportFiles::default();
        self.stream_epoch += 1;
        self.stream_epoch
    }

    /// Force the progress indicators to `total of total`, 100%, without
    /// leaving `Processing`. Used to let the final state be perceived before
    /// the download panel swaps in.
    pub fn mark_complete_progress(&mut self, epoch: u64, total: u32) {
        if self.is_live(epoch) {
            self.progress = ProgressSnapshot {
                current: total,
                total,
                percentage: 100,
            };
        }
    }

    /// Apply one decoded stream event. Events from a superseded stream, or
    /// arriving outside `Processing`, are ignored and the stale connection is
    /// told to close.
    pub fn apply_event(&mut self, epoch: u64, event: ProgressEvent) -> StreamDisposition {
        if !self.is_live(epoch) {
            return StreamDisposition::Close;
        }

        match event {
            ProgressEvent::Progress {
                current,
                total,
                percentage,
                result,
            } => {
                self.progress = ProgressSnapshot {
                    current,
                    total,
                    percentage,
                };
                self.entries.push(RowEntry::Result(result));
                StreamDisposition::Continue
            }
            ProgressEvent::Error { file, message } => {
                self.entries.push(RowEntry::Error { file, message });
                StreamDisposition::Continue
            }
            ProgressEvent::Complete {
                total,
                csv_filename,
                excel_filename,
            } => {
                self.progress = ProgressSnapshot {
                    current: total,
                    total,
                    percentage: 100,
                };
                self.exports = ExportFiles {
                    csv_filename,
                    excel_filename,
                };
                self.phase = Phase::Complete;
                StreamDisposition::Close
            }
            ProgressEvent::FatalError { message } => {
                self.reset();
                self.notice = Some(Notice::Fatal(message));
                StreamDisposition::Close
            }
        }
    }

    /// The transport failed before a terminal event arrived. Resets with a
    /// generic notice; no automatic reconnect is attempted. Returns whether
    /// the loss was acted on, so the caller can mirror the reset in whatever
    /// state it holds; a stale stream failing reports false.
    pub fn connection_lost(&mut self, epoch: u64) -> bool {
        if !self.is_live(epoch) {
            return false;
        }
        self.reset();
        self.notice = Some(Notice::ConnectionLost);
        true
    }

    /// Back to the initial state: no session, no rows, 0% progress, upload
    /// panel visible. Idempotent, and the only path back to `Idle`. Bumps the
    /// stream epoch so an in-flight stream becomes inert.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.session = None;
        self.progress = ProgressSnapshot::default();
        self.entries.clear();
        self.exports = ExportFiles::default();
        self.notice = None;
        self.stream_epoch += 1;
    }
}
