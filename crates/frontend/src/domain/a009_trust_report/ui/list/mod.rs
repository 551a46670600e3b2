use crate::shared::entity_list::EntityList;
use contracts::domain::a009_trust_report::aggregate::DESCRIPTOR;
use leptos::prelude::*;

#[component]
pub fn TrustReportList() -> impl IntoView {
    view! {
        <div class="page">
            <EntityList descriptor=&DESCRIPTOR empty_text="No Trust accident reports found." />
        </div>
    }
}
