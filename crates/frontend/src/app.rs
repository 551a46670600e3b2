use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use contracts::shared::config::ConsoleConfig;
use leptos::prelude::*;
use std::sync::Arc;

/// Resolved configuration, shared read-only through context.
#[derive(Clone)]
pub struct AppConfig(pub Arc<ConsoleConfig>);

pub fn use_config() -> Arc<ConsoleConfig> {
    use_context::<AppConfig>()
        .expect("AppConfig not found in context")
        .0
}

#[component]
pub fn App(config: ConsoleConfig) -> impl IntoView {
    provide_context(AppConfig(Arc::new(config)));

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
