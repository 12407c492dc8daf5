use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{ChatMessage, ChatUser, CreateTicketRequest, Ticket};
use crate::storage;
use crate::utils;

/// Message list refresh cadence. Polling is the only way messages from the
/// other side ever arrive; the server offers no push channel.
pub const POLL_INTERVAL_MS: u32 = 5_000;

/// How long success/error banners stay up before auto-dismissing.
pub const ALERT_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Chat,
    Tickets,
    NewTicket,
}

/// Shared application state, provided via Leptos context.
///
/// The chat fields form one explicit session object: the selection, the
/// pending-send flag, the selection epoch and the rendered list all live
/// here rather than in ambient globals, and the poll interval that drives
/// them is owned by the chat view and cancelled on unmount.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub booting: ReadSignal<bool>,
    pub current_user: ReadSignal<Option<ChatUser>>,
    pub active_view: ReadSignal<View>,
    pub chat_users: ReadSignal<Vec<ChatUser>>,
    pub selected_user: ReadSignal<Option<String>>,
    pub messages: ReadSignal<Vec<ChatMessage>>,
    pub message_input: ReadSignal<String>,
    pub sending: ReadSignal<bool>,
    pub dark_mode: ReadSignal<bool>,
    pub tickets: ReadSignal<Vec<Ticket>>,
    pub error: ReadSignal<Option<String>>,
    pub success: ReadSignal<Option<String>>,

    // --- Write signals (for mutating state) ---
    pub set_booting: WriteSignal<bool>,
    pub set_current_user: WriteSignal<Option<ChatUser>>,
    pub set_active_view: WriteSignal<View>,
    pub set_chat_users: WriteSignal<Vec<ChatUser>>,
    pub set_selected_user: WriteSignal<Option<String>>,
    pub set_messages: WriteSignal<Vec<ChatMessage>>,
    pub set_message_input: WriteSignal<String>,
    pub set_sending: WriteSignal<bool>,
    pub set_dark_mode: WriteSignal<bool>,
    pub set_tickets: WriteSignal<Vec<Ticket>>,
    pub set_error: WriteSignal<Option<String>>,
    pub set_success: WriteSignal<Option<String>>,

    /// Bumped on every selection change; read responses dispatched under an
    /// older value are discarded at completion time.
    load_epoch: StoredValue<u64>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let (booting, set_booting) = signal(true);
        let (current_user, set_current_user) = signal(None::<ChatUser>);
        let (active_view, set_active_view) = signal(View::Chat);
        let (chat_users, set_chat_users) = signal(Vec::<ChatUser>::new());
        let (selected_user, set_selected_user) = signal(None::<String>);
        let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
        let (message_input, set_message_input) = signal(String::new());
        let (sending, set_sending) = signal(false);
        let (dark_mode, set_dark_mode) = signal(false);
        let (tickets, set_tickets) = signal(Vec::<Ticket>::new());
        let (error, set_error) = signal(None::<String>);
        let (success, set_success) = signal(None::<String>);

        let state = Self {
            booting,
            current_user,
            active_view,
            chat_users,
            selected_user,
            messages,
            message_input,
            sending,
            dark_mode,
            tickets,
            error,
            success,
            set_booting,
            set_current_user,
            set_active_view,
            set_chat_users,
            set_selected_user,
            set_messages,
            set_message_input,
            set_sending,
            set_dark_mode,
            set_tickets,
            set_error,
            set_success,
            load_epoch: StoredValue::new(0),
        };

        provide_context(state);
        state
    }

    /// Resume an existing session on startup, if the cookie still resolves.
    pub fn init(&self) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_me().await {
                Ok(resp) if resp.success => {
                    if let Some(user) = resp.user {
                        state.enter_session(user);
                    }
                }
                Ok(_) => {}
                Err(e) => log::debug!("No live session: {e}"),
            }
            state.set_booting.set(false);
        });
    }

    pub fn login(&self, username: String, password: String) {
        let state = *self;
        spawn_local(async move {
            match api::login(&username, &password).await {
                Ok(resp) if resp.success => {
                    if let Some(user) = resp.user {
                        let name = user.username.clone();
                        state.enter_session(user);
                        state.show_success(&format!("Welcome back, {name}!"));
                    }
                }
                Ok(resp) => {
                    state.show_error(&resp.error.unwrap_or_else(|| "Login failed".to_string()));
                }
                Err(e) => {
                    log::error!("Login failed: {e}");
                    state.show_error("Login failed");
                }
            }
        });
    }

    pub fn logout(&self) {
        let state = *self;
        spawn_local(async move {
            if let Err(e) = api::logout().await {
                log::error!("Logout failed: {e}");
            }
            state.set_current_user.set(None);
            state.set_selected_user.set(None);
            state.set_messages.set(Vec::new());
            state.set_message_input.set(String::new());
            state.set_active_view.set(View::Chat);
        });
    }

    fn enter_session(&self, user: ChatUser) {
        self.set_dark_mode.set(user.dark_mode);
        utils::apply_theme(user.dark_mode);
        self.set_current_user.set(Some(user));
        self.load_chat_users();
    }

    pub fn load_chat_users(&self) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_chat_users().await {
                Ok(resp) if resp.success => state.set_chat_users.set(resp.users),
                Ok(resp) => {
                    log::error!(
                        "Failed to fetch chat users: {}",
                        resp.error.unwrap_or_default()
                    );
                }
                Err(e) => log::error!("Failed to fetch chat users: {e}"),
            }
        });
    }

    /// Switch the conversation. An empty id is a no-op and leaves the current
    /// display untouched.
    pub fn select_correspondent(&self, id: String) {
        if id.is_empty() {
            return;
        }
        self.load_epoch.update_value(|e| *e += 1);
        self.set_selected_user.set(Some(id.clone()));
        self.load_messages(id);
    }

    /// Fetch and replace the rendered conversation. The request is tagged
    /// with the selection epoch current at dispatch; if the selection has
    /// moved on by the time the response lands, the response is dropped so a
    /// slow fetch can never clobber a newer conversation. Read failures of
    /// either kind are logged and leave the previous list in place.
    pub fn load_messages(&self, user_id: String) {
        let state = *self;
        let dispatched = self.load_epoch.get_value();
        spawn_local(async move {
            match api::fetch_messages(&user_id).await {
                Ok(resp) if resp.success => {
                    if is_current_fetch(dispatched, state.load_epoch.get_value()) {
                        state.set_messages.set(resp.messages);
                    } else {
                        log::debug!("Discarding stale message fetch for {user_id}");
                    }
                }
                Ok(resp) => {
                    log::error!(
                        "Error loading messages: {}",
                        resp.error.unwrap_or_default()
                    );
                }
                Err(e) => log::error!("Error loading messages: {e}"),
            }
        });
    }

    /// One poll tick: refresh the open conversation, if any.
    pub fn poll(&self) {
        if let Some(id) = self.selected_user.get_untracked() {
            self.load_messages(id);
        }
    }

    /// Send the drafted message. Silent no-op unless the trimmed input is
    /// non-empty, a correspondent is selected and no send is already in
    /// flight. On success the input clears and the conversation re-fetches
    /// (the sent message only appears once the server returns it); on any
    /// failure the input is kept so nothing is lost. The pending-send flag
    /// is restored on every path.
    pub fn send_message(&self) {
        let input = self.message_input.get_untracked();
        let selected = self.selected_user.get_untracked();
        if !can_send(&input, selected.as_deref(), self.sending.get_untracked()) {
            return;
        }
        let text = input.trim().to_string();
        let receiver = selected.unwrap_or_default();

        self.set_sending.set(true);
        let state = *self;
        spawn_local(async move {
            match api::send_message(&receiver, &text).await {
                Ok(resp) if resp.success => {
                    state.set_message_input.set(String::new());
                    state.load_messages(receiver.clone());
                }
                Ok(resp) => {
                    let reason = resp.error.unwrap_or_else(|| "Unknown error".to_string());
                    state.show_error(&format!("Error sending message: {reason}"));
                }
                Err(e) => {
                    log::error!("Error: {e}");
                    state.show_error("Error sending message");
                }
            }
            // The control always comes back, whatever the outcome.
            state.set_sending.set(false);
        });
    }

    /// Flip the stored theme preference and restyle the page on success.
    /// Failures are logged only, leaving the current theme alone.
    pub fn toggle_dark_mode(&self) {
        let state = *self;
        spawn_local(async move {
            match api::toggle_dark_mode().await {
                Ok(resp) if resp.success => {
                    state.set_dark_mode.set(resp.dark_mode);
                    utils::apply_theme(resp.dark_mode);
                }
                Ok(resp) => {
                    log::error!(
                        "Error toggling dark mode: {}",
                        resp.error.unwrap_or_default()
                    );
                }
                Err(e) => log::error!("Error toggling dark mode: {e}"),
            }
        });
    }

    pub fn load_tickets(&self, search: String, status: String, priority: String, category: String) {
        let state = *self;
        spawn_local(async move {
            match api::fetch_tickets(&search, &status, &priority, &category).await {
                Ok(resp) if resp.success => state.set_tickets.set(resp.tickets),
                Ok(resp) => {
                    state.show_error(&resp.error.unwrap_or_else(|| "Failed to load tickets".into()));
                }
                Err(e) => {
                    log::error!("Failed to load tickets: {e}");
                    state.show_error("Failed to load tickets");
                }
            }
        });
    }

    /// Submit a new ticket. `on_created` runs only on success, after the
    /// saved draft has been cleared.
    pub fn create_ticket(&self, request: CreateTicketRequest, on_created: impl FnOnce() + 'static) {
        let state = *self;
        spawn_local(async move {
            match api::create_ticket(&request).await {
                Ok(resp) if resp.success => {
                    storage::clear_draft(storage::TICKET_DRAFT_KEY);
                    let display_id = resp
                        .ticket
                        .map(|t| t.ticket_id)
                        .unwrap_or_else(|| "ticket".to_string());
                    state.show_success(&format!("Ticket {display_id} created successfully!"));
                    on_created();
                    state.set_active_view.set(View::Tickets);
                }
                Ok(resp) => {
                    state.show_error(
                        &resp.error.unwrap_or_else(|| "Failed to create ticket".into()),
                    );
                }
                Err(e) => {
                    log::error!("Failed to create ticket: {e}");
                    state.show_error("Failed to create ticket");
                }
            }
        });
    }

    /// Show a success banner that dismisses itself.
    pub fn show_success(&self, message: &str) {
        self.set_success.set(Some(message.to_string()));
        let set_success = self.set_success;
        Timeout::new(ALERT_DISMISS_MS, move || set_success.set(None)).forget();
    }

    /// Show an error banner that dismisses itself.
    pub fn show_error(&self, message: &str) {
        self.set_error.set(Some(message.to_string()));
        let set_error = self.set_error;
        Timeout::new(ALERT_DISMISS_MS, move || set_error.set(None)).forget();
    }
}

/// Send gating: a trimmed-non-empty draft, a selected correspondent, and no
/// send already in flight.
pub fn can_send(input: &str, selected: Option<&str>, sending: bool) -> bool {
    !input.trim().is_empty() && selected.is_some_and(|s| !s.is_empty()) && !sending
}

/// A fetch may only be applied if the selection epoch has not moved since it
/// was dispatched.
fn is_current_fetch(dispatched: u64, current: u64) -> bool {
    dispatched == current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_requires_text_and_a_correspondent() {
        assert!(can_send("hello", Some("user-1"), false));
        assert!(can_send("  hello  ", Some("user-1"), false));
        assert!(!can_send("", Some("user-1"), false));
        assert!(!can_send("   \n", Some("user-1"), false));
        assert!(!can_send("hello", None, false));
        assert!(!can_send("hello", Some(""), false));
        assert!(!can_send("hello", Some("user-1"), true));
    }

    #[test]
    fn superseded_fetches_are_discarded() {
        // Select A (epoch 1), dispatch a fetch, then select B (epoch 2):
        // A's late completion must not be applied, B's must.
        let fetch_for_a = 1;
        let fetch_for_b = 2;
        let current = 2;
        assert!(!is_current_fetch(fetch_for_a, current));
        assert!(is_current_fetch(fetch_for_b, current));
    }

    #[test]
    fn repeat_polls_for_one_selection_share_an_epoch() {
        // Poll ticks do not bump the epoch, so overlapping reads for the same
        // correspondent all stay applicable in completion order.
        let dispatched = 7;
        assert!(is_current_fetch(dispatched, 7));
    }
}
