use crate::shared::entity_list::EntityList;
use contracts::domain::a007_mashreq_report::aggregate::DESCRIPTOR;
use leptos::prelude::*;

#[component]
pub fn MashreqReportList() -> impl IntoView {
    view! {
        <div class="page">
            <EntityList descriptor=&DESCRIPTOR empty_text="No Al-Mashreq accident reports found." />
        </div>
    }
}
