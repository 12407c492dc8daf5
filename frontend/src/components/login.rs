use leptos::ev;
use leptos::prelude::*;

use crate::state::AppState;

/// Username/password form driving `POST /api/login/`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (username_invalid, set_username_invalid) = signal(false);
    let (password_invalid, set_password_invalid) = signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let user = username.get_untracked();
        let pass = password.get_untracked();
        let user_ok = !user.trim().is_empty();
        let pass_ok = !pass.is_empty();
        set_username_invalid.set(!user_ok);
        set_password_invalid.set(!pass_ok);
        if user_ok && pass_ok {
            state.login(user.trim().to_string(), pass);
        }
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=on_submit>
                <h1>"IT Helpdesk"</h1>
                <label for="login-username">"Username"</label>
                <input
                    id="login-username"
                    type="text"
                    autocomplete="username"
                    class=("is-invalid", move || username_invalid.get())
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <label for="login-password">"Password"</label>
                <input
                    id="login-password"
                    type="password"
                    autocomplete="current-password"
                    class=("is-invalid", move || password_invalid.get())
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="send-btn">
                    "Sign in"
                </button>
            </form>
        </div>
    }
}
