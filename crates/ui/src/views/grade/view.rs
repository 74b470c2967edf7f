use dioxus::prelude::*;

use services::Phase;

use super::actions;
use super::components::{DownloadPanel, FeedbackModal, ProcessingPanel, UploadPanel};
use super::state::use_grade_state;
use crate::context::AppContext;
use crate::platform::{DesktopLinkOpener, UiLinkOpener};
use crate::vm::{RowVm, escape_text, map_row_entry};

/// The single screen of the app. Which panel shows is a pure function of the
/// session phase; everything the panels need is projected here so they stay
/// dumb.
#[component]
pub fn GradeView() -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_grade_state();
    let mut feedback = state.feedback;

    let session = state.session.read();
    let phase = session.phase();
    let progress = session.progress();
    let notice = session.notice().map(|notice| escape_text(notice.message()));
    let rows: Vec<RowVm> = session.entries().iter().map(map_row_entry).collect();
    let download_urls = session.session().map(|active| {
        let backend = ctx.backend();
        (
            backend.csv_download_url(active.id()),
            backend.excel_download_url(active.id()),
        )
    });
    let exports = session.exports().clone();
    drop(session);

    let submit_ctx = ctx.clone();
    let (csv_url, excel_url) = download_urls.unwrap_or_default();

    rsx! {
        div { class: "grade-root",
            header { class: "grade-header",
                h1 { "Bulk Grader" }
                p { class: "grade-tagline",
                    "Upload a submissions archive and a roster, then watch the feedback come in."
                }
            }
            if let Some(message) = notice {
                div { class: "notice", role: "alert", dangerous_inner_html: "{message}" }
            }
            match phase {
                Phase::Idle | Phase::Submitting => rsx! {
                    UploadPanel {
                        task_type: state.task_type,
                        archive: state.archive,
                        roster: state.roster,
                        submitting: phase == Phase::Submitting,
                        on_submit: move |()| actions::submit(&submit_ctx, state),
                    }
                },
                Phase::Processing => rsx! {
                    ProcessingPanel {
                        progress,
                        rows,
                        on_preview: move |text| feedback.set(Some(text)),
                        on_cancel: move |()| actions::reset(state),
                    }
                },
                Phase::Complete => rsx! {
                    DownloadPanel {
                        total: progress.total,
                        csv_url,
                        excel_url,
                        csv_filename: exports.csv_filename,
                        excel_filename: exports.excel_filename,
                        on_open: move |url: String| DesktopLinkOpener.open_url(&url),
                        on_reset: move |()| actions::reset(state),
                    }
                },
            }
            if let Some(text) = state.feedback.read().clone() {
                FeedbackModal {
                    text,
                    on_close: move |()| feedback.set(None),
                }
            }
        }
    }
}
