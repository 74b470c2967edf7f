use dioxus::prelude::*;

/// Completion panel: export links and the reset control.
///
/// Downloads open through the platform opener rather than in-app navigation,
/// so finished exports land in the user's browser session.
#[component]
pub fn DownloadPanel(
    total: u32,
    csv_url: String,
    excel_url: String,
    csv_filename: Option<String>,
    excel_filename: Option<String>,
    on_open: Callback<String>,
    on_reset: Callback<()>,
) -> Element {
    rsx! {
        section { class: "panel download-panel",
            h2 { class: "download-title", "Grading complete" }
            p { class: "download-summary", "{total} submissions processed." }
            div { class: "download-actions",
                button {
                    class: "btn btn-primary download-csv",
                    r#type: "button",
                    title: csv_filename.unwrap_or_default(),
                    onclick: {
                        let url = csv_url.clone();
                        move |_| on_open.call(url.clone())
                    },
                    "Download CSV"
                }
                button {
                    class: "btn btn-primary download-excel",
                    r#type: "button",
                    title: excel_filename.unwrap_or_default(),
                    onclick: {
                        let url = excel_url.clone();
                        move |_| on_open.call(url.clone())
                    },
                    "Download Excel"
                }
            }
            button {
                class: "btn download-reset",
                r#type: "button",
                onclick: move |_| on_reset.call(()),
                "Grade another batch"
            }
        }
    }
}
