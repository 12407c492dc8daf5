use leptos::prelude::*;

use crate::state::AppState;

/// Floating success/error banners; the state layer auto-dismisses them.
#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="toast-container">
            {move || {
                state.success.get().map(|msg| {
                    view! { <div class="toast toast-success">{msg}</div> }
                })
            }}
            {move || {
                state.error.get().map(|msg| {
                    view! { <div class="toast toast-error">{msg}</div> }
                })
            }}
        </div>
    }
}
