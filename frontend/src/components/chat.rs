use gloo_timers::callback::Interval;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;

use crate::models::{ChatMessage, ChatUser};
use crate::state::{AppState, POLL_INTERVAL_MS};
use crate::utils;

/// One-to-one chat view: correspondent picker, polled message list, input.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    // Auto-refresh while the view is mounted. Polling is the only way the
    // other side's messages arrive; ticks with no selection fetch nothing.
    // The timer handle is parked in a stored value so unmount cancels it.
    let poll_timer =
        StoredValue::new_local(Some(Interval::new(POLL_INTERVAL_MS, move || state.poll())));
    on_cleanup(move || {
        poll_timer.update_value(|timer| {
            timer.take();
        });
    });

    // Keep the newest message in view whenever the list is replaced.
    let messages_ref: NodeRef<html::Div> = NodeRef::new();
    Effect::new(move |_| {
        state.messages.track();
        if let Some(container) = messages_ref.get() {
            container.set_scroll_top(container.scroll_height());
        }
    });

    let on_keydown = move |ev: ev::KeyboardEvent| {
        // Enter sends; Shift+Enter keeps the newline.
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.send_message();
        }
    };

    view! {
        <section class="chat-container" id="chat-container">
            <div class="chat-header">
                <select
                    id="user-select"
                    class="user-select"
                    prop:value=move || state.selected_user.get().unwrap_or_default()
                    on:change=move |ev| state.select_correspondent(event_target_value(&ev))
                >
                    <option value="">"Select a user to chat with"</option>
                    <For
                        each=move || state.chat_users.get()
                        key=|u| u.id.clone()
                        let:user
                    >
                        <option value=user.id.clone()>{correspondent_label(&user)}</option>
                    </For>
                </select>
            </div>

            {move || {
                if state.selected_user.get().is_none() {
                    view! {
                        <div class="empty-state">
                            "Select a user to start chatting"
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="messages-container" id="messages-container" node_ref=messages_ref>
                            <For
                                each=move || state.messages.get()
                                key=|m| m.id.clone()
                                let:msg
                            >
                                <MessageBubble message=msg />
                            </For>
                        </div>

                        <div class="chat-input-row">
                            <textarea
                                id="message-input"
                                rows="1"
                                placeholder="Type a message… (Enter to send, Shift+Enter for newline)"
                                prop:value=move || state.message_input.get()
                                on:input=move |ev| state.set_message_input.set(event_target_value(&ev))
                                on:keydown=on_keydown
                            ></textarea>
                            <button
                                id="send-button"
                                class="send-btn"
                                on:click=move |_| state.send_message()
                                disabled=move || state.sending.get()
                            >
                                {move || if state.sending.get() { "Sending…" } else { "Send" }}
                            </button>
                        </div>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

/// A single message bubble. The body is interpolated as a text node, so
/// whatever the server relays displays literally and never runs as markup.
#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let row_class = if message.is_sender {
        "message-row sent"
    } else {
        "message-row received"
    };
    let time = utils::format_timestamp(&message.timestamp);

    view! {
        <div class=row_class>
            <div class=bubble_class(message.is_sender)>
                <div class="message-content">{message.message.clone()}</div>
                <div class="message-time">{time}</div>
            </div>
        </div>
    }
}

fn bubble_class(is_sender: bool) -> &'static str {
    if is_sender {
        "chat-message sent"
    } else {
        "chat-message received"
    }
}

/// Picker label: preferred name plus department when known.
fn correspondent_label(user: &ChatUser) -> String {
    let name = if user.full_name.is_empty() {
        user.username.as_str()
    } else {
        user.full_name.as_str()
    };
    match user.department.as_deref() {
        Some(dept) if !dept.is_empty() => format!("{name} ({dept})"),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bubbles_are_classed_by_the_server_side_flag() {
        assert_eq!(bubble_class(true), "chat-message sent");
        assert_eq!(bubble_class(false), "chat-message received");
    }

    #[test]
    fn correspondent_labels_prefer_full_name_and_department() {
        let user = ChatUser {
            id: "u1".into(),
            username: "jdoe".into(),
            full_name: "John Doe".into(),
            department: Some("Accounting".into()),
            is_it_staff: false,
            dark_mode: false,
        };
        assert_eq!(correspondent_label(&user), "John Doe (Accounting)");

        let bare = ChatUser {
            full_name: String::new(),
            department: None,
            ..user
        };
        assert_eq!(correspondent_label(&bare), "jdoe");
    }
}
