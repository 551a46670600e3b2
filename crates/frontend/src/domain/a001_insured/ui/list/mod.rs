use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::CUSTOMER_DETAILS;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::entity_list::{EntityList, RowAction};
use contracts::domain::a001_insured::aggregate::DESCRIPTOR;
use contracts::shared::list_state::ListItem;
use leptos::prelude::*;

#[component]
pub fn InsuredList() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let open_details = Callback::new(move |item: ListItem| {
        let key = detail_key(CUSTOMER_DETAILS, &[item.row.id.as_str()]);
        tabs_store.open_tab(&key, &detail_tab_label("Customer", &item.row.text("name")));
    });

    view! {
        <div class="page">
            <EntityList
                descriptor=&DESCRIPTOR
                actions=vec![RowAction::new("Details", "eye", open_details)]
                empty_text="No customers found."
            />
        </div>
    }
}
