use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::models::Ticket;
use crate::state::AppState;
use crate::utils;

/// Search auto-fires this long after typing pauses.
const SEARCH_DEBOUNCE_MS: u32 = 500;

/// Filterable ticket listing with debounced search.
#[component]
pub fn TicketList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (search, set_search) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let (priority, set_priority) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let debounce = StoredValue::new_local(None::<Timeout>);

    let reload = move || {
        state.load_tickets(
            search.get_untracked(),
            status.get_untracked(),
            priority.get_untracked(),
            category.get_untracked(),
        );
    };
    reload();

    on_cleanup(move || {
        debounce.update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
        });
    });

    let on_search_input = move |ev| {
        set_search.set(event_target_value(&ev));
        debounce.update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.cancel();
            }
            *slot = Some(Timeout::new(SEARCH_DEBOUNCE_MS, move || {
                if utils::should_auto_search(&search.get_untracked()) {
                    reload();
                }
            }));
        });
    };

    view! {
        <section class="ticket-list">
            <div class="ticket-filters">
                <input
                    type="text"
                    name="search"
                    class="ticket-search"
                    placeholder="Search by ticket ID, title, or description..."
                    prop:value=move || search.get()
                    on:input=on_search_input
                />
                <select on:change=move |ev| {
                    set_status.set(event_target_value(&ev));
                    reload();
                }>
                    <option value="">"All Statuses"</option>
                    <option value="open">"Open"</option>
                    <option value="in_progress">"In Progress"</option>
                    <option value="resolved">"Resolved"</option>
                    <option value="closed">"Closed"</option>
                    <option value="escalated">"Escalated"</option>
                </select>
                <select on:change=move |ev| {
                    set_priority.set(event_target_value(&ev));
                    reload();
                }>
                    <option value="">"All Priorities"</option>
                    <option value="low">"Low"</option>
                    <option value="medium">"Medium"</option>
                    <option value="high">"High"</option>
                    <option value="urgent">"Urgent"</option>
                </select>
                <select on:change=move |ev| {
                    set_category.set(event_target_value(&ev));
                    reload();
                }>
                    <option value="">"All Categories"</option>
                    <option value="hardware">"Hardware"</option>
                    <option value="software">"Software"</option>
                    <option value="network">"Network"</option>
                    <option value="access">"Access Issue"</option>
                    <option value="other">"Other"</option>
                </select>
            </div>

            {move || {
                if state.tickets.get().is_empty() {
                    view! { <div class="empty-state">"No tickets found"</div> }.into_any()
                } else {
                    view! {
                        <For
                            each=move || state.tickets.get()
                            key=|t| t.id.clone()
                            let:ticket
                        >
                            <TicketRow ticket=ticket />
                        </For>
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn TicketRow(ticket: Ticket) -> impl IntoView {
    let state = expect_context::<AppState>();
    let display_id = ticket.ticket_id.clone();
    let on_copy = move |_| {
        utils::copy_to_clipboard(display_id.clone(), move || {
            state.show_success("Copied to clipboard!");
        });
    };

    view! {
        <article class="ticket-card">
            <header class="ticket-card-header">
                <span class="ticket-id" title="Click to copy" on:click=on_copy>
                    {ticket.ticket_id.clone()}
                </span>
                <span class=format!("badge priority-{}", ticket.priority)>
                    {choice_label(&ticket.priority)}
                </span>
                <span class=format!("badge status-{}", ticket.status)>
                    {choice_label(&ticket.status)}
                </span>
            </header>
            <h3 class="ticket-title">{ticket.title.clone()}</h3>
            <p class="ticket-desc">{ticket.description.clone()}</p>
            {ticket
                .deadline
                .clone()
                .map(|d| view! { <div class="ticket-deadline">{format!("Due {d}")}</div> })}
        </article>
    }
}

/// Display name for a stored choice value (`in_progress` → `In Progress`,
/// `access` → `Access Issue`).
fn choice_label(value: &str) -> &'static str {
    match value {
        "open" => "Open",
        "in_progress" => "In Progress",
        "resolved" => "Resolved",
        "closed" => "Closed",
        "escalated" => "Escalated",
        "low" => "Low",
        "medium" => "Medium",
        "high" => "High",
        "urgent" => "Urgent",
        "hardware" => "Hardware",
        "software" => "Software",
        "network" => "Network",
        "access" => "Access Issue",
        "other" => "Other",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_choice_values_map_to_display_names() {
        assert_eq!(choice_label("in_progress"), "In Progress");
        assert_eq!(choice_label("access"), "Access Issue");
        assert_eq!(choice_label("urgent"), "Urgent");
        assert_eq!(choice_label("???"), "Unknown");
    }
}
