use crate::app::use_config;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::Tabs;
use crate::layout::Shell;
use crate::shared::api_utils::ApiClient;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireSession;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (auth_state, _) = use_auth();

    // Rendered only under RequireSession, so the session is present here.
    if let Some(session) = auth_state.get_untracked().session {
        provide_context(ApiClient::new(use_config(), session));
    }

    tabs_store.init_router_integration();

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <RequireSession>
            <MainLayout />
        </RequireSession>
    }
}
