//! Sidebar with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::tabs::tab_labels::{
    AHLIA_REPORTS, COMPANIES, CUSTOMERS, MASHREQ_REPORTS, PALESTINE_REPORTS, TRUST_REPORTS,
};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    /// (tab key, icon); an empty list makes the group itself a link
    items: Vec<(&'static str, &'static str)>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: CUSTOMERS,
            label: "Customers",
            icon: "customers",
            items: vec![],
        },
        MenuGroup {
            id: COMPANIES,
            label: "Insurance Companies",
            icon: "building",
            items: vec![],
        },
        MenuGroup {
            id: "reports",
            label: "Accident Reports",
            icon: "file-text",
            items: vec![
                (AHLIA_REPORTS, "file-text"),
                (MASHREQ_REPORTS, "file-text"),
                (PALESTINE_REPORTS, "file-text"),
                (TRUST_REPORTS, "file-text"),
            ],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let expanded_groups = RwSignal::new(vec!["reports".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups()
                .into_iter()
                .map(|group| {
                    let group_id = group.id;
                    let has_children = !group.items.is_empty();
                    let items = StoredValue::new(group.items);

                    view! {
                        <div>
                            <div
                                class="app-sidebar__item"
                                class:app-sidebar__item--active=move || {
                                    !has_children && ctx.active.get().as_deref() == Some(group_id)
                                }
                                on:click=move |_| {
                                    if has_children {
                                        expanded_groups.update(|ids| {
                                            match ids.iter().position(|x| x == group_id) {
                                                Some(pos) => {
                                                    ids.remove(pos);
                                                }
                                                None => ids.push(group_id.to_string()),
                                            }
                                        });
                                    } else {
                                        ctx.open_tab(group_id, &tab_label_for_key(group_id));
                                    }
                                }
                            >
                                <div class="app-sidebar__item-content">
                                    {icon(group.icon)}
                                    <span>{group.label}</span>
                                </div>
                                {has_children.then(|| view! {
                                    <div
                                        class="app-sidebar__chevron"
                                        class:app-sidebar__chevron--expanded=move || {
                                            expanded_groups
                                                .with(|ids| ids.iter().any(|x| x == group_id))
                                        }
                                    >
                                        {icon("chevron-right")}
                                    </div>
                                })}
                            </div>

                            {has_children.then(|| view! {
                                <Show when=move || {
                                    expanded_groups.with(|ids| ids.iter().any(|x| x == group_id))
                                }>
                                    <div class="app-sidebar__children">
                                        {items.get_value().into_iter().map(|(key, icon_name)| {
                                            let label = tab_label_for_key(key);
                                            let label_for_click = label.clone();
                                            view! {
                                                <div
                                                    class="app-sidebar__item"
                                                    class:app-sidebar__item--active=move || {
                                                        ctx.active.get().as_deref() == Some(key)
                                                    }
                                                    on:click=move |_| {
                                                        ctx.open_tab(key, &label_for_click)
                                                    }
                                                >
                                                    <div class="app-sidebar__item-content">
                                                        {icon(icon_name)}
                                                        <span>{label}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()}
                                    </div>
                                </Show>
                            })}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
