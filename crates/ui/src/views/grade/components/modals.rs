use dioxus::prelude::*;

/// Full feedback text for one row, shown over the results table.
///
/// `text` arrives pre-escaped from the row projection. Clicking the overlay
/// closes the modal; clicks inside it stay inside it.
#[component]
pub fn FeedbackModal(text: String, on_close: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal feedback-modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Feedback" }
                p { class: "modal-body feedback-modal-text",
                    dangerous_inner_html: "{text}",
                }
                div { class: "modal-actions",
                    button {
                        class: "btn modal-close",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
