use crate::shared::entity_list::EntityList;
use contracts::domain::a006_ahlia_report::aggregate::DESCRIPTOR;
use leptos::prelude::*;

#[component]
pub fn AhliaReportList() -> impl IntoView {
    view! {
        <div class="page">
            <EntityList descriptor=&DESCRIPTOR empty_text="No Ahlia accident reports found." />
        </div>
    }
}
