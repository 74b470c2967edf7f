//! Async actions behind the grade view.
//!
//! Each action owns its whole lifecycle inside a single spawned task, so the
//! view only ever wires callbacks to these entry points. Stale tasks are
//! fenced off by the session epoch rather than cancelled; the one live task
//! is also kept on [`GradeState`] so reset can cancel it outright and drop
//! its connection.

use std::sync::Arc;
use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use tracing::{debug, warn};

use grade_core::{ProgressEvent, TaskType};
use services::{BackendClient, Notice, ProgressStream, StreamDisposition};

use super::state::GradeState;
use crate::context::AppContext;

/// Submit the current form and, on success, drive the progress stream to a
/// terminal event. A no-op unless both files are picked and the session is
/// idle.
pub(super) fn submit(ctx: &AppContext, state: GradeState) {
    let backend = ctx.backend();
    let hold = ctx.complete_hold();
    let task = spawn(async move {
        run_batch(backend, hold, state).await;
        let mut stream_task = state.stream_task;
        stream_task.set(None);
    });
    let mut stream_task = state.stream_task;
    stream_task.set(Some(task));
}

/// Clear everything back to a fresh upload form, cancelling any in-flight
/// stream task. Idempotent; also the user's escape hatch from a stream that
/// has gone quiet.
pub(super) fn reset(state: GradeState) {
    let mut stream_task = state.stream_task;
    if let Some(task) = stream_task.take() {
        task.cancel();
    }

    let mut session = state.session;
    session.write().reset();
    clear_form(state);
}

async fn run_batch(backend: Arc<BackendClient>, hold: Duration, state: GradeState) {
    let mut session = state.session;

    let picked = (state.archive.peek().clone(), state.roster.peek().clone());
    let (Some(archive), Some(roster)) = picked else {
        return;
    };
    let task_type = *state.task_type.peek();
    if !session.write().begin_submit() {
        return;
    }

    debug!(task_type = task_type.as_str(), "submitting batch");
    let submitted = match backend.submit(archive, roster, task_type).await {
        Ok(submitted) => submitted,
        Err(error) => {
            warn!(%error, "submission failed");
            let message = if error.is_connectivity() {
                "Could not reach the server. Check your connection and try again.".to_string()
            } else {
                error.to_string()
            };
            session.write().submit_failed(Notice::Submission(message));
            return;
        }
    };

    let epoch = session.write().begin_processing(submitted.clone());
    match backend.open_stream(&submitted).await {
        Ok(stream) => pump_stream(state, stream, epoch, hold).await,
        Err(error) => {
            warn!(%error, "could not open progress stream");
            handle_connection_lost(state, epoch);
        }
    }
}

/// Apply events from `stream` until a terminal event or until the session
/// tells us this connection has been superseded.
async fn pump_stream(state: GradeState, mut stream: ProgressStream, epoch: u64, hold: Duration) {
    let mut session = state.session;
    loop {
        match stream.next_event().await {
            Ok(Some(event)) => {
                if let ProgressEvent::Complete { total, .. } = &event {
                    // Pin the bar at 100% so completion is perceivable
                    // before the panel swaps.
                    session.write().mark_complete_progress(epoch, *total);
                    stream.close();
                    if !hold.is_zero() {
                        tokio::time::sleep(hold).await;
                    }
                    session.write().apply_event(epoch, event);
                    break;
                }

                if matches!(event, ProgressEvent::FatalError { .. }) {
                    apply_fatal(state, epoch, event);
                    break;
                }

                let is_progress = matches!(event, ProgressEvent::Progress { .. });
                let disposition = session.write().apply_event(epoch, event);
                if is_progress {
                    scroll_results_to_latest();
                }
                if disposition == StreamDisposition::Close {
                    break;
                }
            }
            Ok(None) => {
                // The server went away without a terminal event.
                handle_connection_lost(state, epoch);
                break;
            }
            Err(error) => {
                warn!(%error, "progress stream failed");
                handle_connection_lost(state, epoch);
                break;
            }
        }
    }
    stream.close();
}

/// A fatal event abandons the whole session: the state machine resets and
/// the form clears, exactly as if the user had hit reset, with the failure
/// notice kept. A stale stream's fatal changes nothing.
pub(crate) fn apply_fatal(state: GradeState, epoch: u64, event: ProgressEvent) {
    let mut session = state.session;
    let live = session.peek().is_live(epoch);
    session.write().apply_event(epoch, event);
    if live {
        clear_form(state);
    }
}

/// Mirror a transport loss into the form: the session resets with its notice
/// and the slots go back to their placeholders.
pub(crate) fn handle_connection_lost(state: GradeState, epoch: u64) {
    let mut session = state.session;
    if session.write().connection_lost(epoch) {
        clear_form(state);
    }
}

fn clear_form(state: GradeState) {
    let mut archive = state.archive;
    let mut roster = state.roster;
    let mut task_type = state.task_type;
    let mut feedback = state.feedback;

    archive.set(None);
    roster.set(None);
    task_type.set(TaskType::Reading);
    feedback.set(None);
}

/// Keep the newest row in view as results arrive.
fn scroll_results_to_latest() {
    eval(
        "const anchor = document.getElementById('grade-results-end'); \
         if (anchor) { anchor.scrollIntoView({ block: 'end', behavior: 'smooth' }); }",
    );
}
