//! Generic list table for one entity type, driven by [`ListState`].
//!
//! Each row carries a contextual menu with the caller's actions plus edit
//! and delete when the entity supports them. Create and edit open the
//! built-in [`FormModal`] unless the caller handles create itself.

use crate::shared::api_utils::{use_api, ApiClient};
use crate::shared::form_modal::FormModal;
use crate::shared::icons::icon;
use contracts::shared::descriptor::EntityDescriptor;
use contracts::shared::form_state::{FormModalState, SAVE_FAILED};
use contracts::shared::list_state::{
    CommandOutcome, ListCommand, ListItem, ListState,
};
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

/// Extra entry of the row menu.
#[derive(Clone)]
pub struct RowAction {
    pub label: &'static str,
    pub icon: &'static str,
    /// Whether the entry applies to this row
    pub visible: fn(&ListItem) -> bool,
    pub on_select: Callback<ListItem>,
}

impl RowAction {
    pub fn new(label: &'static str, icon: &'static str, on_select: Callback<ListItem>) -> Self {
        Self {
            label,
            icon,
            visible: |_| true,
            on_select,
        }
    }

    pub fn when(self, visible: fn(&ListItem) -> bool) -> Self {
        Self { visible, ..self }
    }
}

/// Run a list command and whatever follow-up it produces.
fn dispatch(
    api: ApiClient,
    descriptor: &'static EntityDescriptor,
    scope: Vec<String>,
    state: RwSignal<ListState>,
    command: ListCommand,
) {
    spawn_local(async move {
        let scope: Vec<&str> = scope.iter().map(String::as_str).collect();
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let outcome = match command {
                ListCommand::Fetch(ticket) => {
                    let result = api.fetch_list(descriptor, &scope).await;
                    if let Err(err) = &result {
                        log::error!("Failed to load {}: {}", descriptor.key, err);
                    }
                    if state.try_with_untracked(|s| s.is_current(ticket)) == Some(false) {
                        log::debug!("Dropped stale {} response", descriptor.key);
                    }
                    CommandOutcome::Fetched { ticket, result }
                }
                ListCommand::Delete { id } => {
                    let result = match descriptor.delete_path(&scope, &id) {
                        Ok(path) => api.delete(&path).await,
                        Err(err) => Err(err),
                    };
                    match &result {
                        Ok(()) => log::info!("Deleted {} {}", descriptor.key, id),
                        Err(err) => {
                            log::error!("Failed to delete {} {}: {}", descriptor.key, id, err)
                        }
                    }
                    CommandOutcome::Deleted(result)
                }
            };
            next = state.try_update(|s| s.settle(outcome)).flatten();
        }
    });
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn EntityList(
    descriptor: &'static EntityDescriptor,
    /// Parent ids filling the entity's paths
    #[prop(optional)]
    scope: Vec<String>,
    #[prop(optional)] actions: Vec<RowAction>,
    /// Bumped by the owner to force a reload
    #[prop(optional)]
    refresh: Option<RwSignal<u32>>,
    /// Replaces the built-in create modal
    #[prop(optional)]
    on_create: Option<Callback<()>>,
    #[prop(optional)] empty_text: Option<&'static str>,
    #[prop(default = SAVE_FAILED)] failure_text: &'static str,
) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let scope = StoredValue::new(scope);
    let actions = StoredValue::new(actions);
    let state = RwSignal::new(ListState::new());
    let form = RwSignal::new(FormModalState::new(descriptor.form));
    let empty_text = empty_text.unwrap_or("No records found.");

    let run = move |command: ListCommand| {
        dispatch(api.get_value(), descriptor, scope.get_value(), state, command);
    };

    // A click anywhere outside a row menu closes it.
    let outside_click = StoredValue::new_local(Closure::<dyn FnMut(web_sys::Event)>::new(
        move |_: web_sys::Event| {
            if state.with_untracked(|s| s.open_menu_id().is_some()) {
                state.update(|s| s.close_menu());
            }
        },
    ));
    if let Some(window) = web_sys::window() {
        outside_click.with_value(|closure| {
            let _ = window
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        });
    }
    on_cleanup(move || {
        if let Some(window) = web_sys::window() {
            outside_click.try_with_value(|closure| {
                let _ = window.remove_event_listener_with_callback(
                    "click",
                    closure.as_ref().unchecked_ref(),
                );
            });
        }
    });

    Effect::new(move |_| {
        if let Some(refresh) = refresh {
            refresh.track();
        }
        if let Some(command) = state.try_update(|s| s.begin_fetch()) {
            run(command);
        }
    });

    let items = Memo::new(move |_| state.with(|s| s.items().to_vec()));

    let on_saved = Callback::new(move |_: ()| {
        form.update(|f| {
            f.close();
        });
        if let Some(command) = state.try_update(|s| s.on_saved()) {
            run(command);
        }
    });

    let add = move |_| match on_create {
        Some(cb) => cb.run(()),
        None => form.update(|f| f.open_create()),
    };
    let can_add = on_create.is_some() || descriptor.can_create();

    let delete = move |id: String| {
        state.update(|s| s.request_delete(&id));
        let confirmed = confirm(descriptor.delete_prompt);
        if let Some(command) = state.try_update(|s| s.resolve_delete(confirmed)).flatten() {
            run(command);
        }
    };

    let render_row = move |item: ListItem| {
        let id = item.row.id.clone();
        let id_for_toggle = id.clone();
        let id_for_open = id.clone();
        let id_for_delete = id.clone();
        let menu_open = move || state.with(|s| s.open_menu_id() == Some(id_for_open.as_str()));
        let item = StoredValue::new(item);

        let cells = descriptor
            .columns
            .iter()
            .map(|col| {
                let (text, linked) = item.with_value(|item| {
                    let cell = item.row.get(col.field);
                    (item.row.text(col.field), cell.is_some_and(|c| !c.is_na()))
                });
                let content = if col.link && linked {
                    view! { <a href=text target="_blank" rel="noopener">"View"</a> }.into_any()
                } else {
                    text.into_any()
                };
                view! { <td>{content}</td> }
            })
            .collect_view();

        let menu = move || {
            let custom = actions.with_value(|actions| {
                actions
                    .iter()
                    .filter(|a| item.with_value(|i| (a.visible)(i)))
                    .cloned()
                    .collect::<Vec<_>>()
            });
            let id_for_delete = id_for_delete.clone();
            view! {
                <div class="row-menu" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                    {custom
                        .into_iter()
                        .map(|RowAction { label, icon: icon_name, on_select, .. }| {
                            view! {
                                <button
                                    class="row-menu__item"
                                    on:click=move |_| {
                                        state.update(|s| s.close_menu());
                                        on_select.run(item.get_value());
                                    }
                                >
                                    {icon(icon_name)}
                                    <span>{label}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                    {descriptor.can_edit().then(|| view! {
                        <button
                            class="row-menu__item"
                            on:click=move |_| {
                                state.update(|s| s.close_menu());
                                item.with_value(|i| {
                                    form.update(|f| f.open_edit(i.row.id.clone(), &i.record))
                                });
                            }
                        >
                            {icon("edit")}
                            <span>"Edit"</span>
                        </button>
                    })}
                    {descriptor.can_delete().then(|| view! {
                        <button
                            class="row-menu__item row-menu__item--danger"
                            on:click=move |_| delete(id_for_delete.clone())
                        >
                            {icon("trash")}
                            <span>"Delete"</span>
                        </button>
                    })}
                </div>
            }
        };

        view! {
            <tr data-id=id>
                {cells}
                <td class="table__actions">
                    <button
                        class="button button--icon"
                        title="Actions"
                        on:click=move |ev: ev::MouseEvent| {
                            ev.stop_propagation();
                            state.update(|s| s.toggle_menu(&id_for_toggle));
                        }
                    >
                        {icon("more-vertical")}
                    </button>
                    <Show when=menu_open>{menu.clone()}</Show>
                </td>
            </tr>
        }
    };

    view! {
        <div class="entity-list">
            <div class="header">
                <h2 class="header__title">{descriptor.title}</h2>
                {can_add.then(|| view! {
                    <button class="button button--primary" on:click=add>
                        {icon("plus")}
                        <span>{descriptor.add_label}</span>
                    </button>
                })}
            </div>

            {move || state.with(|s| s.error().map(str::to_string)).map(|message| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{message}</span>
                </div>
            })}

            <Show
                when=move || !state.with(|s| s.is_loading() && s.items().is_empty())
                fallback=|| view! { <div class="loading">"Loading..."</div> }
            >
                <Show
                    when=move || !state.with(|s| s.is_empty())
                    fallback=move || view! { <div class="empty-state">{empty_text}</div> }
                >
                    <table class="table__data">
                        <thead>
                            <tr>
                                {descriptor
                                    .columns
                                    .iter()
                                    .map(|col| view! { <th>{col.header}</th> })
                                    .collect_view()}
                                <th class="table__actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || items.get().into_iter().map(render_row).collect_view()}
                        </tbody>
                    </table>
                </Show>
            </Show>

            <FormModal
                descriptor=descriptor
                form=form
                scope=Signal::derive(move || scope.get_value())
                on_saved=on_saved
                failure_text=failure_text
            />
        </div>
    }
}
