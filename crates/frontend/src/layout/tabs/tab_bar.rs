use super::page::TabPage;
use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
fn TabHandle(tab: TabData) -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active =
        Memo::new(move |_| tabs_store.active.get().as_deref() == Some(key.get_value().as_str()));

    // titles can change after the page loads its record
    let title = move || {
        tabs_store.opened.with(|tabs| {
            tabs.iter()
                .find(|t| t.key == key.get_value())
                .map(|t| t.title.clone())
                .unwrap_or_default()
        })
    };

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    view! {
        <div
            class="tab"
            class:tab--active=is_active
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span class="tab__title">{title}</span>
            <button class="tab__close" title="Close" on:click=on_close>
                {icon("x")}
            </button>
        </div>
    }
}

#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabHandle tab=tab /> }
                />
            </div>
            <div class="tab-content">
                <Show when=move || tabs_store.opened.with(|tabs| tabs.is_empty())>
                    <div class="placeholder">"Choose a section from the menu."</div>
                </Show>
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                />
            </div>
        </div>
    }
}
