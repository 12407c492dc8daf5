use leptos::prelude::*;

use crate::state::{AppState, View};

/// Top navigation: view switcher, dark-mode toggle, session controls.
#[component]
pub fn Navbar() -> impl IntoView {
    let state = expect_context::<AppState>();

    let nav_button = move |label: &'static str, view: View| {
        view! {
            <button
                class="nav-link"
                class:active=move || state.active_view.get() == view
                on:click=move |_| state.set_active_view.set(view)
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="navbar">
            <span class="brand">"IT Helpdesk"</span>
            <div class="nav-links">
                {nav_button("Chat", View::Chat)}
                {nav_button("Tickets", View::Tickets)}
                {nav_button("New Ticket", View::NewTicket)}
            </div>
            <div class="nav-actions">
                <button class="nav-link" on:click=move |_| state.toggle_dark_mode()>
                    <span id="dark-mode-icon">
                        {move || if state.dark_mode.get() { "☀ " } else { "☾ " }}
                    </span>
                    <span id="dark-mode-text">
                        {move || if state.dark_mode.get() { "Light Mode" } else { "Dark Mode" }}
                    </span>
                </button>
                <span class="nav-user">
                    {move || {
                        state
                            .current_user
                            .get()
                            .map(|u| u.username)
                            .unwrap_or_default()
                    }}
                </span>
                <button class="nav-link" on:click=move |_| state.logout()>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
