use contracts::system::auth::Session;
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub session: Option<Session>,
}

/// Read the stored token once; the session is passed on explicitly from here.
pub fn load_session() -> Option<Session> {
    storage::get_token().and_then(Session::new)
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let session = load_session();
    if session.is_none() {
        log::warn!("No session token in localStorage");
    }
    let (auth_state, set_auth_state) = signal(AuthState { session });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}
