//! Insurances of one vehicle, with the customer and vehicle cards above.

use crate::domain::a001_insured::ui::details::fetch_customer;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::CHECKS;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::api_utils::use_api;
use crate::shared::detail_card::DetailCard;
use crate::shared::entity_list::{EntityList, RowAction};
use crate::shared::form_modal::FormModal;
use contracts::domain::a001_insured::aggregate::INFO_COLUMNS;
use contracts::domain::a002_vehicle::aggregate::{find_in_customer, DETAIL_COLUMNS, PLATE_FIELD};
use contracts::domain::a003_insurance::aggregate::{paid_by_check, DESCRIPTOR};
use contracts::domain::a004_check;
use contracts::shared::form_state::FormModalState;
use contracts::shared::list_state::{ListItem, FETCH_FAILED};
use contracts::shared::normalizer::text_at;
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn InsuranceList(
    insured_id: String,
    vehicle_id: String,
    tab_key: String,
    tabs_store: AppGlobalContext,
) -> impl IntoView {
    let api = use_api();
    let opts = StoredValue::new(api.normalize_options());
    let customer = RwSignal::new(None::<Value>);
    let error = RwSignal::new(None::<String>);
    let check_form = RwSignal::new(FormModalState::new(a004_check::aggregate::DESCRIPTOR.form));
    let check_scope = RwSignal::new(Vec::<String>::new());

    {
        let insured_id = insured_id.clone();
        let vehicle_id = vehicle_id.clone();
        spawn_local(async move {
            match fetch_customer(&api, &insured_id).await {
                Ok(doc) => {
                    let plate = find_in_customer(&doc, &vehicle_id)
                        .and_then(|v| text_at(v, PLATE_FIELD));
                    if let Some(plate) = plate {
                        let title = detail_tab_label("Insurances", &plate);
                        tabs_store.update_tab_title(&tab_key, &title);
                    }
                    customer.try_set(Some(doc));
                }
                Err(e) => {
                    log::error!("Failed to load customer {}: {}", insured_id, e);
                    error.try_set(Some(e.user_message(FETCH_FAILED)));
                }
            }
        });
    }

    let scope_ids = StoredValue::new((insured_id.clone(), vehicle_id.clone()));

    let open_checks = Callback::new(move |item: ListItem| {
        let (insured_id, vehicle_id) = scope_ids.get_value();
        let ids = [insured_id.as_str(), vehicle_id.as_str(), item.row.id.as_str()];
        let key = detail_key(CHECKS, &ids);
        tabs_store.open_tab(&key, &detail_tab_label("Checks", &item.row.text("startDate")));
    });

    let add_check = Callback::new(move |item: ListItem| {
        let (insured_id, vehicle_id) = scope_ids.get_value();
        check_scope.set(vec![insured_id, vehicle_id, item.row.id]);
        check_form.update(|f| f.open_create());
    });

    let by_check = |item: &ListItem| paid_by_check(&item.row);

    let vehicle_id_for_card = vehicle_id.clone();
    let vehicle = move || {
        customer.with(|doc| {
            doc.as_ref()
                .and_then(|doc| find_in_customer(doc, &vehicle_id_for_card).cloned())
        })
    };

    view! {
        <div class="page">
            {move || error.get().map(|message| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{message}</span>
                </div>
            })}
            <div class="cards-row">
                {move || customer.get().map(|doc| view! {
                    <DetailCard
                        title="Customer"
                        columns=INFO_COLUMNS
                        record=doc
                        opts=opts.get_value()
                    />
                })}
                {move || vehicle().map(|doc| view! {
                    <DetailCard
                        title="Vehicle"
                        columns=DETAIL_COLUMNS
                        record=doc
                        opts=opts.get_value()
                    />
                })}
            </div>

            <EntityList
                descriptor=&DESCRIPTOR
                scope=vec![insured_id, vehicle_id]
                actions=vec![
                    RowAction::new("Checks", "receipt", open_checks).when(by_check),
                    RowAction::new("Add Check", "plus", add_check).when(by_check),
                ]
                empty_text="No insurances for this vehicle."
            />

            <FormModal
                descriptor=&a004_check::aggregate::DESCRIPTOR
                form=check_form
                scope=check_scope
                on_saved=Callback::new(move |_| check_form.update(|f| {
                    f.close();
                }))
                failure_text=a004_check::aggregate::SUBMIT_FAILED
            />
        </div>
    }
}
