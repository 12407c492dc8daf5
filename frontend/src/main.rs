mod api;
mod components;
mod models;
mod state;
mod storage;
mod utils;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatPanel;
use components::login::LoginPage;
use components::nav::Navbar;
use components::ticket_form::TicketForm;
use components::ticket_list::TicketList;
use components::toast::Toast;
use state::{AppState, View};

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    // Resume the session (and the theme that goes with it) on mount
    state.init();

    view! {
        <Toast />
        {move || {
            if state.booting.get() {
                view! { <div class="boot-screen">"Loading…"</div> }.into_any()
            } else if state.current_user.get().is_none() {
                view! { <LoginPage /> }.into_any()
            } else {
                view! {
                    <div class="app-container">
                        <Navbar />
                        <main class="view-container">
                            {move || match state.active_view.get() {
                                View::Chat => view! { <ChatPanel /> }.into_any(),
                                View::Tickets => view! { <TicketList /> }.into_any(),
                                View::NewTicket => view! { <TicketForm /> }.into_any(),
                            }}
                        </main>
                    </div>
                }
                .into_any()
            }
        }}
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
