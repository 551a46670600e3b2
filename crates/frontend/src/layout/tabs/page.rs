use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use leptos::prelude::*;

/// One open tab. Content is built once when the tab opens and stays
/// mounted while hidden, so list state survives switching tabs.
#[component]
pub fn TabPage(tab: TabData, tabs_store: AppGlobalContext) -> impl IntoView {
    let tab_key = tab.key.clone();
    let tab_key_for_active_check = tab_key.clone();

    let is_active = move || {
        tabs_store
            .active
            .with(|active| active.as_ref() == Some(&tab_key_for_active_check))
    };

    log::debug!("TabPage created for '{}'", tab_key);
    let tab_key_for_cleanup = tab_key.clone();
    on_cleanup(move || {
        log::debug!("TabPage destroyed for '{}'", tab_key_for_cleanup);
    });

    let content = render_tab_content(&tab_key, tabs_store);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_active()
            data-tab-key=tab_key
        >
            {content}
        </div>
    }
}
