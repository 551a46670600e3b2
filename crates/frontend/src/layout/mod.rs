pub mod global_context;
pub mod left;
pub mod tabs;

use crate::shared::icons::icon;
use global_context::AppGlobalContext;
use leptos::prelude::*;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |  TopBar (menu toggle, title)             |
/// +------------------------------------------+
/// |  Sidebar  |  Tabs                        |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<L, C>(left: L, center: C) -> impl IntoView
where
    L: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <TopBar />
            <div class="app-body">
                <left::Left>{left()}</left::Left>
                <main data-zone="center" class="app-main">
                    {center()}
                </main>
            </div>
        </div>
    }
}

#[component]
fn TopBar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <header class="top-header">
            <button
                class="button button--icon"
                title="Toggle menu"
                on:click=move |_| ctx.toggle_left()
            >
                {icon("menu")}
            </button>
            <span class="top-header__title">"Insurance Console"</span>
        </header>
    }
}
