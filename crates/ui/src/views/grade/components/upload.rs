use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use tracing::warn;

use grade_core::TaskType;
use services::UploadFile;

/// The upload form: task picker, two file slots, and the submit button.
///
/// The button only arms once both files are picked; while a submission is in
/// flight everything is disabled so the form cannot change under it.
#[component]
pub fn UploadPanel(
    mut task_type: Signal<TaskType>,
    mut archive: Signal<Option<UploadFile>>,
    mut roster: Signal<Option<UploadFile>>,
    submitting: bool,
    on_submit: Callback<()>,
) -> Element {
    let ready = archive.read().is_some() && roster.read().is_some() && !submitting;
    let archive_name = archive.read().as_ref().map(|file| file.file_name.clone());
    let roster_name = roster.read().as_ref().map(|file| file.file_name.clone());
    let selected_task = *task_type.read();

    rsx! {
        section { class: "panel upload-panel",
            div { class: "upload-task",
                label { class: "upload-task-label", r#for: "task-type-select", "Task type" }
                select {
                    id: "task-type-select",
                    class: "upload-task-select",
                    disabled: submitting,
                    value: "{selected_task.as_str()}",
                    onchange: move |evt| {
                        if let Ok(parsed) = evt.value().parse::<TaskType>() {
                            task_type.set(parsed);
                        }
                    },
                    for choice in TaskType::ALL {
                        option {
                            value: "{choice.as_str()}",
                            selected: selected_task == choice,
                            "{choice.label()}"
                        }
                    }
                }
            }
            div { class: "upload-slots",
                FileSlot {
                    label: "Submissions archive",
                    prompt: "Drop a .zip here or click to choose",
                    accept: ".zip",
                    input_id: "archive-input",
                    selected_name: archive_name,
                    disabled: submitting,
                    on_selected: move |file| archive.set(Some(file)),
                    on_cleared: move |()| archive.set(None),
                }
                FileSlot {
                    label: "Student roster",
                    prompt: "Drop a .csv here or click to choose",
                    accept: ".csv",
                    input_id: "roster-input",
                    selected_name: roster_name,
                    disabled: submitting,
                    on_selected: move |file| roster.set(Some(file)),
                    on_cleared: move |()| roster.set(None),
                }
            }
            button {
                class: "btn btn-primary upload-submit",
                r#type: "button",
                disabled: !ready,
                onclick: move |_| on_submit.call(()),
                if submitting { "Uploading..." } else { "Start grading" }
            }
        }
    }
}

/// One drop zone backed by a hidden file input. The picker and the drop path
/// feed the same reader, so they cannot drift apart.
#[component]
fn FileSlot(
    label: &'static str,
    prompt: &'static str,
    accept: &'static str,
    input_id: &'static str,
    selected_name: Option<String>,
    disabled: bool,
    on_selected: Callback<UploadFile>,
    on_cleared: Callback<()>,
) -> Element {
    let mut hovered = use_signal(|| false);

    let read_selection = move |files: Vec<FileData>| {
        let Some(file) = files.into_iter().next() else {
            // Cancelling the picker clears the slot.
            on_cleared.call(());
            return;
        };
        spawn(async move {
            let name = file.name();
            match file.read_bytes().await {
                Ok(bytes) => on_selected.call(UploadFile::new(name, bytes.to_vec())),
                Err(error) => warn!(%error, file_name = %name, "could not read picked file"),
            }
        });
    };

    let zone_class = if *hovered.read() {
        "file-slot file-slot--hover"
    } else if selected_name.is_some() {
        "file-slot file-slot--filled"
    } else {
        "file-slot"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                hovered.set(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                hovered.set(false);
            },
            ondrop: move |evt| {
                evt.prevent_default();
                hovered.set(false);
                if !disabled {
                    read_selection(evt.files());
                }
            },
            label { class: "file-slot-title", r#for: "{input_id}", "{label}" }
            input {
                id: "{input_id}",
                class: "file-slot-input",
                r#type: "file",
                accept: "{accept}",
                disabled,
                onchange: move |evt| read_selection(evt.files()),
            }
            if let Some(name) = selected_name {
                p { class: "file-slot-name", "{name}" }
            } else {
                p { class: "file-slot-prompt", "{prompt}" }
            }
        }
    }
}
