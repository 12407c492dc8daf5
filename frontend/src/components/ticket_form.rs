use gloo_timers::callback::Interval;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::HtmlInputElement;

use crate::models::CreateTicketRequest;
use crate::state::AppState;
use crate::storage::{self, TicketDraft, TICKET_DRAFT_KEY};
use crate::utils;

/// Drafts persist to local storage this often while the form is open.
const AUTOSAVE_INTERVAL_MS: u32 = 30_000;

/// Create-ticket form: restores any saved draft on mount, auto-saves while
/// open, validates required fields on submit, and clears the draft once the
/// ticket is accepted.
#[component]
pub fn TicketForm() -> impl IntoView {
    let state = expect_context::<AppState>();

    let draft = storage::load_draft(TICKET_DRAFT_KEY).unwrap_or_default();
    let (title, set_title) = signal(draft.title);
    let (description, set_description) = signal(draft.description);
    let (category, set_category) = signal(if draft.category.is_empty() {
        "other".to_string()
    } else {
        draft.category
    });
    let (priority, set_priority) = signal(if draft.priority.is_empty() {
        "medium".to_string()
    } else {
        draft.priority
    });
    let (deadline, set_deadline) = signal(draft.deadline);
    let (title_invalid, set_title_invalid) = signal(false);
    let (description_invalid, set_description_invalid) = signal(false);

    let autosave = StoredValue::new_local(Some(Interval::new(AUTOSAVE_INTERVAL_MS, move || {
        let draft = TicketDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked(),
            priority: priority.get_untracked(),
            deadline: deadline.get_untracked(),
        };
        storage::save_draft(TICKET_DRAFT_KEY, &draft);
    })));
    on_cleanup(move || {
        autosave.update_value(|timer| {
            timer.take();
        });
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let title_value = title.get_untracked();
        let description_value = description.get_untracked();
        let title_ok = !title_value.trim().is_empty();
        let description_ok = !description_value.trim().is_empty();
        set_title_invalid.set(!title_ok);
        set_description_invalid.set(!description_ok);
        if !(title_ok && description_ok) {
            return;
        }

        let deadline_value = deadline.get_untracked();
        let request = CreateTicketRequest {
            title: title_value.trim().to_string(),
            description: description_value.trim().to_string(),
            category: category.get_untracked(),
            priority: priority.get_untracked(),
            deadline: if deadline_value.is_empty() {
                None
            } else {
                Some(deadline_value)
            },
        };
        state.create_ticket(request, move || {
            set_title.set(String::new());
            set_description.set(String::new());
            set_category.set("other".to_string());
            set_priority.set("medium".to_string());
            set_deadline.set(String::new());
        });
    };

    view! {
        <section class="ticket-form-page">
            <form id="create-ticket-form" class="ticket-form" on:submit=on_submit>
                <h2>"Create Support Ticket"</h2>

                <label for="ticket-title">"Title"</label>
                <input
                    id="ticket-title"
                    type="text"
                    placeholder="Brief description of the issue"
                    class=("is-invalid", move || title_invalid.get())
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />

                <label for="ticket-description">"Description"</label>
                <textarea
                    id="ticket-description"
                    rows="5"
                    placeholder="Detailed description of the problem"
                    class=("is-invalid", move || description_invalid.get())
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>

                <div class="ticket-form-row">
                    <div>
                        <label for="ticket-category">"Category"</label>
                        <select
                            id="ticket-category"
                            prop:value=move || category.get()
                            on:change=move |ev| set_category.set(event_target_value(&ev))
                        >
                            <option value="hardware">"Hardware"</option>
                            <option value="software">"Software"</option>
                            <option value="network">"Network"</option>
                            <option value="access">"Access Issue"</option>
                            <option value="other">"Other"</option>
                        </select>
                    </div>
                    <div>
                        <label for="ticket-priority">"Priority"</label>
                        <select
                            id="ticket-priority"
                            prop:value=move || priority.get()
                            on:change=move |ev| set_priority.set(event_target_value(&ev))
                        >
                            <option value="low">"Low"</option>
                            <option value="medium">"Medium"</option>
                            <option value="high">"High"</option>
                            <option value="urgent">"Urgent"</option>
                        </select>
                    </div>
                    <div>
                        <label for="ticket-deadline">"Deadline (optional)"</label>
                        <input
                            id="ticket-deadline"
                            type="date"
                            prop:value=move || deadline.get()
                            on:input=move |ev| set_deadline.set(event_target_value(&ev))
                        />
                    </div>
                </div>

                <FileDropArea />

                <button type="submit" class="send-btn">
                    "Submit Ticket"
                </button>
            </form>
        </section>
    }
}

/// Drag-and-drop replacement for the native file input. Selected files are
/// listed as name + size; upload itself stays with the ticket detail flow.
#[component]
fn FileDropArea() -> impl IntoView {
    let (drag_active, set_drag_active) = signal(false);
    let (files, set_files) = signal(Vec::<(String, u64)>::new());
    let file_input_ref: NodeRef<html::Input> = NodeRef::new();

    let read_file_list = move |list: Option<web_sys::FileList>| {
        let Some(list) = list else { return };
        let mut selected = Vec::new();
        for i in 0..list.length() {
            if let Some(file) = list.get(i) {
                selected.push((file.name(), file.size() as u64));
            }
        }
        if !selected.is_empty() {
            set_files.set(selected);
        }
    };

    view! {
        <div
            class="file-upload-area"
            class:dragover=move || drag_active.get()
            on:click=move |_| {
                if let Some(input) = file_input_ref.get() {
                    input.click();
                }
            }
            on:dragover=move |ev: ev::DragEvent| {
                ev.prevent_default();
                set_drag_active.set(true);
            }
            on:dragleave=move |_| set_drag_active.set(false)
            on:drop=move |ev: ev::DragEvent| {
                ev.prevent_default();
                set_drag_active.set(false);
                read_file_list(ev.data_transfer().and_then(|dt| dt.files()));
            }
        >
            {move || {
                let selected = files.get();
                if selected.is_empty() {
                    view! {
                        <p>"Drag and drop files here or click to browse"</p>
                        <small>"Max 10MB per file"</small>
                    }
                    .into_any()
                } else {
                    view! {
                        <p>{format!("Selected {} file(s)", selected.len())}</p>
                        <div class="file-list">
                            {selected
                                .iter()
                                .map(|(name, size)| {
                                    view! {
                                        <span class="file-badge">
                                            {format!("{name} ({})", utils::format_file_size(*size))}
                                        </span>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <small>"Click to change files"</small>
                    }
                    .into_any()
                }
            }}
        </div>
        // Kept as a sibling so the synthetic click cannot re-enter the
        // drop area's own click handler.
        <input
            type="file"
            multiple=true
            style="display:none"
            node_ref=file_input_ref
            on:change=move |ev| {
                let input = event_target::<HtmlInputElement>(&ev);
                read_file_list(input.files());
            }
        />
    }
}
