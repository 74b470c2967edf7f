use dioxus::core::Task;
use dioxus::prelude::*;

use grade_core::TaskType;
use services::{SessionState, UploadFile};

/// Signals backing the grade view. `Copy` so actions can move it into
/// spawned tasks without ceremony.
#[derive(Clone, Copy)]
pub(crate) struct GradeState {
    /// The session state machine; the only writer of phase transitions.
    pub session: Signal<SessionState>,
    pub archive: Signal<Option<UploadFile>>,
    pub roster: Signal<Option<UploadFile>>,
    pub task_type: Signal<TaskType>,
    /// Escaped full feedback text currently shown in the modal.
    pub feedback: Signal<Option<String>>,
    /// The in-flight submit-and-stream task, kept so reset can cancel it and
    /// drop its connection.
    pub stream_task: Signal<Option<Task>>,
}

pub(crate) fn use_grade_state() -> GradeState {
    GradeState {
        session: use_signal(SessionState::new),
        archive: use_signal(|| None),
        roster: use_signal(|| None),
        task_type: use_signal(|| TaskType::Reading),
        feedback: use_signal(|| None),
        stream_task: use_signal(|| None),
    }
}
