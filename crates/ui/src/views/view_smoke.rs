use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

use grade_core::{MatchStatus, ProcessedResult, ProgressEvent, Session, SessionId, TaskType};
use services::{BackendClient, ProgressSnapshot, RowEntry, UploadFile};

use super::GradeView;
use super::grade::actions::{apply_fatal, handle_connection_lost};
use super::grade::components::{DownloadPanel, FeedbackModal, ProcessingPanel, UploadPanel};
use super::grade::state::use_grade_state;
use crate::context::{UiApp, build_app_context};
use crate::vm::{RowVm, escape_text, map_row_entry};

#[derive(Clone)]
struct TestApp;

impl UiApp for TestApp {
    fn backend(&self) -> Arc<BackendClient> {
        Arc::new(BackendClient::new("http://127.0.0.1:9"))
    }

    fn complete_hold(&self) -> Duration {
        Duration::ZERO
    }
}

fn render_dom(mut dom: VirtualDom) -> String {
    dom.rebuild_in_place();
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
    dioxus_ssr::render(&dom)
}

#[component]
fn GradeViewHarness() -> Element {
    let app: Arc<dyn UiApp> = Arc::new(TestApp);
    use_context_provider(|| build_app_context(&app));
    rsx! { GradeView {} }
}

#[test]
fn grade_view_smoke_starts_on_upload_panel() {
    let html = render_dom(VirtualDom::new(GradeViewHarness));
    assert!(html.contains("Bulk Grader"), "missing title in {html}");
    assert!(html.contains("Task type"), "missing task picker in {html}");
    assert!(
        html.contains("Submissions archive"),
        "missing archive slot in {html}"
    );
    assert!(html.contains("Student roster"), "missing roster slot in {html}");
    assert!(html.contains("Start grading"), "missing submit in {html}");
    assert!(!html.contains("modal-overlay"), "modal open at launch in {html}");
}

#[component]
fn UploadHarness(archive_name: Option<String>, roster_name: Option<String>) -> Element {
    let archive = use_signal(move || {
        archive_name
            .clone()
            .map(|name| UploadFile::new(name, Vec::new()))
    });
    let roster = use_signal(move || {
        roster_name
            .clone()
            .map(|name| UploadFile::new(name, Vec::new()))
    });
    let task_type = use_signal(|| grade_core::TaskType::Reading);
    rsx! {
        UploadPanel {
            task_type,
            archive,
            roster,
            submitting: false,
            on_submit: move |()| {},
        }
    }
}

#[test]
fn upload_panel_prompts_until_files_are_picked() {
    let dom = VirtualDom::new_with_props(
        UploadHarness,
        UploadHarnessProps {
            archive_name: None,
            roster_name: None,
        },
    );
    let html = render_dom(dom);
    assert!(
        html.contains("Drop a .zip here or click to choose"),
        "missing archive prompt in {html}"
    );
    assert!(html.contains("disabled"), "submit not disabled in {html}");
    assert!(!html.contains("file-slot--filled"), "slot filled in {html}");
}

#[test]
fn upload_panel_shows_picked_file_names() {
    let dom = VirtualDom::new_with_props(
        UploadHarness,
        UploadHarnessProps {
            archive_name: Some("week3.zip".to_string()),
            roster_name: Some("roster.csv".to_string()),
        },
    );
    let html = render_dom(dom);
    assert!(html.contains("week3.zip"), "missing archive name in {html}");
    assert!(html.contains("roster.csv"), "missing roster name in {html}");
    assert!(html.contains("file-slot--filled"), "slot not filled in {html}");
}

#[component]
fn ProcessingHarness(progress: ProgressSnapshot, rows: Vec<RowVm>) -> Element {
    rsx! {
        ProcessingPanel {
            progress,
            rows,
            on_preview: move |_| {},
            on_cancel: move |()| {},
        }
    }
}

fn sample_rows() -> Vec<RowVm> {
    let entries = vec![
        RowEntry::Result(ProcessedResult {
            file_name: "bob.pdf".to_string(),
            student_name: "Bob".to_string(),
            matched_name: Some("Bob Smith".to_string()),
            match_percentage: 92,
            match_status: MatchStatus::Success,
            score: Some("8/10".to_string()),
            comment: Some("Good work overall".to_string()),
            comment_preview: Some("Good work".to_string()),
        }),
        RowEntry::Result(ProcessedResult {
            file_name: "mystery.pdf".to_string(),
            student_name: "Unknown".to_string(),
            matched_name: None,
            match_percentage: 0,
            match_status: MatchStatus::NoMatch,
            score: None,
            comment: None,
            comment_preview: None,
        }),
        RowEntry::Error {
            file: "corrupt.pdf".to_string(),
            message: "could not extract text".to_string(),
        },
    ];
    entries.iter().map(map_row_entry).collect()
}

#[test]
fn processing_panel_renders_progress_and_rows() {
    let dom = VirtualDom::new_with_props(
        ProcessingHarness,
        ProcessingHarnessProps {
            progress: ProgressSnapshot {
                current: 3,
                total: 10,
                percentage: 30,
            },
            rows: sample_rows(),
        },
    );
    let html = render_dom(dom);
    assert!(html.contains("Processing 3 of 10"), "missing counts in {html}");
    assert!(html.contains("30%"), "missing percentage in {html}");
    assert!(html.contains("bob.pdf"), "missing result row in {html}");
    assert!(html.contains("badge-matched"), "missing match badge in {html}");
    assert!(html.contains("badge-no-match"), "missing no-match badge in {html}");
    assert!(
        html.contains("results-row--error"),
        "missing error row in {html}"
    );
    assert!(
        html.contains("Could not process corrupt.pdf"),
        "missing error text in {html}"
    );
    assert!(
        html.contains("grade-results-end"),
        "missing scroll anchor in {html}"
    );
    assert!(html.contains("Cancel batch"), "missing cancel control in {html}");
}

#[test]
fn processing_panel_never_emits_raw_backend_markup() {
    let entries = vec![RowEntry::Result(ProcessedResult {
        file_name: "<img src=x onerror=alert(1)>.pdf".to_string(),
        student_name: "<script>alert(2)</script>".to_string(),
        matched_name: Some("Bob <b>Smith</b>".to_string()),
        match_percentage: 50,
        match_status: MatchStatus::Success,
        score: Some("5/10".to_string()),
        comment: Some("keep <em>calm</em>".to_string()),
        comment_preview: Some("keep <em>calm</em>".to_string()),
    })];
    let rows: Vec<RowVm> = entries.iter().map(map_row_entry).collect();
    let dom = VirtualDom::new_with_props(
        ProcessingHarness,
        ProcessingHarnessProps {
            progress: ProgressSnapshot {
                current: 1,
                total: 1,
                percentage: 100,
            },
            rows,
        },
    );
    let html = render_dom(dom);
    assert!(!html.contains("<script"), "script tag leaked into {html}");
    assert!(!html.contains("<img"), "img tag leaked into {html}");
    assert!(!html.contains("<em>"), "comment markup leaked into {html}");
}

#[component]
fn FailureRecoveryHarness(connection_lost: bool) -> Element {
    let state = use_grade_state();
    use_hook(move || {
        let mut archive = state.archive;
        archive.set(Some(UploadFile::new("week3.zip", Vec::new())));
        let mut roster = state.roster;
        roster.set(Some(UploadFile::new("roster.csv", Vec::new())));
        let mut task_type = state.task_type;
        task_type.set(TaskType::Essay);

        let mut session = state.session;
        session.write().begin_submit();
        let epoch = session
            .write()
            .begin_processing(Session::new(SessionId::new("s1"), TaskType::Essay));
        if connection_lost {
            handle_connection_lost(state, epoch);
        } else {
            apply_fatal(
                state,
                epoch,
                ProgressEvent::FatalError {
                    message: "out of disk".to_string(),
                },
            );
        }
    });

    let session = state.session.read();
    let notice = session.notice().map(|notice| notice.message().to_string());
    drop(session);

    rsx! {
        if let Some(message) = notice {
            div { class: "notice", "{message}" }
        }
        UploadPanel {
            task_type: state.task_type,
            archive: state.archive,
            roster: state.roster,
            submitting: false,
            on_submit: move |()| {},
        }
    }
}

#[test]
fn fatal_event_restores_a_pristine_upload_form() {
    let dom = VirtualDom::new_with_props(
        FailureRecoveryHarness,
        FailureRecoveryHarnessProps {
            connection_lost: false,
        },
    );
    let html = render_dom(dom);
    assert!(html.contains("out of disk"), "missing notice in {html}");
    assert!(
        html.contains("Drop a .zip here or click to choose"),
        "archive slot not back to placeholder in {html}"
    );
    assert!(
        html.contains("Drop a .csv here or click to choose"),
        "roster slot not back to placeholder in {html}"
    );
    assert!(!html.contains("week3.zip"), "stale archive name in {html}");
    assert!(!html.contains("roster.csv"), "stale roster name in {html}");
    assert!(!html.contains("file-slot--filled"), "slot stayed filled in {html}");
}

#[test]
fn connection_loss_restores_a_pristine_upload_form() {
    let dom = VirtualDom::new_with_props(
        FailureRecoveryHarness,
        FailureRecoveryHarnessProps {
            connection_lost: true,
        },
    );
    let html = render_dom(dom);
    assert!(
        html.contains("Connection to the server was lost"),
        "missing notice in {html}"
    );
    assert!(!html.contains("week3.zip"), "stale archive name in {html}");
    assert!(!html.contains("file-slot--filled"), "slot stayed filled in {html}");
}

#[component]
fn DownloadHarness() -> Element {
    rsx! {
        DownloadPanel {
            total: 12,
            csv_url: "http://127.0.0.1:9/download/abc/csv".to_string(),
            excel_url: "http://127.0.0.1:9/download/abc/excel".to_string(),
            csv_filename: Some("grading_results.csv".to_string()),
            excel_filename: Some("grading_results.xlsx".to_string()),
            on_open: move |_| {},
            on_reset: move |()| {},
        }
    }
}

#[test]
fn download_panel_offers_both_exports_and_reset() {
    let html = render_dom(VirtualDom::new(DownloadHarness));
    assert!(html.contains("Grading complete"), "missing title in {html}");
    assert!(html.contains("12 submissions processed"), "missing total in {html}");
    assert!(html.contains("Download CSV"), "missing csv action in {html}");
    assert!(html.contains("Download Excel"), "missing excel action in {html}");
    assert!(
        html.contains("grading_results.csv"),
        "missing export name in {html}"
    );
    assert!(html.contains("Grade another batch"), "missing reset in {html}");
}

#[component]
fn ModalHarness(text: String) -> Element {
    rsx! {
        FeedbackModal {
            text,
            on_close: move |()| {},
        }
    }
}

#[test]
fn feedback_modal_renders_escaped_text_only() {
    let dom = VirtualDom::new_with_props(
        ModalHarness,
        ModalHarnessProps {
            text: escape_text("watch out for <script>alert(1)</script>"),
        },
    );
    let html = render_dom(dom);
    assert!(html.contains("modal-overlay"), "missing overlay in {html}");
    assert!(html.contains("watch out for"), "missing body text in {html}");
    assert!(!html.contains("<script"), "script tag leaked into {html}");
}
