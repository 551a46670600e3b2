use leptos::prelude::*;

use super::context::{load_session, use_auth, AuthState};

/// Renders `children` only while a session exists.
#[component]
pub fn RequireSession(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.session.is_some())
            fallback=move || view! { <SessionMissing set_auth_state=set_auth_state /> }
        >
            {children()}
        </Show>
    }
}

#[component]
fn SessionMissing(set_auth_state: WriteSignal<AuthState>) -> impl IntoView {
    let retry = move |_| {
        let session = load_session();
        if session.is_some() {
            log::info!("Session token found");
        }
        set_auth_state.set(AuthState { session });
    };

    view! {
        <div class="page page--centered">
            <div class="warning-box">
                <span class="warning-box__icon">"⚠"</span>
                <span class="warning-box__text">
                    "You are not signed in. Sign in to the console, then retry."
                </span>
            </div>
            <button class="button button--primary" on:click=retry>"Retry"</button>
        </div>
    }
}
