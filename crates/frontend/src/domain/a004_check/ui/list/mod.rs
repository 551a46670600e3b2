use crate::shared::entity_list::EntityList;
use contracts::domain::a004_check::aggregate::{DESCRIPTOR, SUBMIT_FAILED};
use leptos::prelude::*;

/// Checks paid against one insurance policy.
#[component]
pub fn CheckList(insured_id: String, vehicle_id: String, insurance_id: String) -> impl IntoView {
    view! {
        <div class="page">
            <EntityList
                descriptor=&DESCRIPTOR
                scope=vec![insured_id, vehicle_id, insurance_id]
                empty_text="No checks found for this insurance."
                failure_text=SUBMIT_FAILED
            />
        </div>
    }
}
