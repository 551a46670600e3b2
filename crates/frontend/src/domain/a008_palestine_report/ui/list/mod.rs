use crate::shared::entity_list::EntityList;
use contracts::domain::a008_palestine_report::aggregate::DESCRIPTOR;
use leptos::prelude::*;

#[component]
pub fn PalestineReportList() -> impl IntoView {
    view! {
        <div class="page">
            <EntityList
                descriptor=&DESCRIPTOR
                empty_text="No Palestine Insurance accident reports found."
            />
        </div>
    }
}
