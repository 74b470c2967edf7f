use dioxus::prelude::*;

use services::ProgressSnapshot;

use crate::vm::RowVm;

/// Live progress bar plus the incrementally growing results table.
///
/// Row text was escaped during projection, so the cells render through
/// `dangerous_inner_html`; anything else would double-escape it.
#[component]
pub fn ProcessingPanel(
    progress: ProgressSnapshot,
    rows: Vec<RowVm>,
    on_preview: Callback<String>,
    on_cancel: Callback<()>,
) -> Element {
    rsx! {
        section { class: "panel processing-panel",
            div { class: "progress-block",
                div { class: "progress-counts",
                    span { "Processing {progress.current} of {progress.total}" }
                    span { class: "progress-percent", "{progress.percentage}%" }
                }
                div { class: "progress-track",
                    div {
                        class: "progress-fill",
                        style: "width: {progress.percentage}%;",
                    }
                }
            }
            div { class: "results-scroll",
                table { class: "results-table",
                    thead {
                        tr {
                            th { "File" }
                            th { "Student" }
                            th { "Matched" }
                            th { "Match %" }
                            th { "Score" }
                            th { "Feedback" }
                        }
                    }
                    tbody {
                        for row in rows {
                            match row {
                                RowVm::Result(row) => rsx! {
                                    tr { class: "results-row",
                                        td { dangerous_inner_html: "{row.file_name}" }
                                        td { dangerous_inner_html: "{row.student_name}" }
                                        td {
                                            if row.matched {
                                                span { class: "badge badge-matched",
                                                    dangerous_inner_html: "{row.matched_name}",
                                                }
                                            } else {
                                                span { class: "badge badge-no-match", "No match" }
                                            }
                                        }
                                        td { "{row.match_percentage}" }
                                        td { dangerous_inner_html: "{row.score}" }
                                        td { class: "results-feedback",
                                            span { class: "results-feedback-preview",
                                                dangerous_inner_html: "{row.comment_preview}",
                                            }
                                            if !row.comment.is_empty() {
                                                button {
                                                    class: "btn-link results-feedback-more",
                                                    r#type: "button",
                                                    onclick: {
                                                        let comment = row.comment.clone();
                                                        move |_| on_preview.call(comment.clone())
                                                    },
                                                    "View"
                                                }
                                            }
                                        }
                                    }
                                },
                                RowVm::Error(row) => rsx! {
                                    tr { class: "results-row results-row--error",
                                        td { colspan: "6", dangerous_inner_html: "{row.text}" }
                                    }
                                },
                            }
                        }
                    }
                }
                div { id: "grade-results-end" }
            }
            button {
                class: "btn processing-cancel",
                r#type: "button",
                onclick: move |_| on_cancel.call(()),
                "Cancel batch"
            }
        }
    }
}
