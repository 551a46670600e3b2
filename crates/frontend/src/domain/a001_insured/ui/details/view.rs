use super::view_model::InsuredDetailsViewModel;
use crate::domain::a002_vehicle::ui::form::VehicleForm;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::INSURANCES;
use crate::layout::tabs::{detail_key, detail_tab_label};
use crate::shared::api_utils::use_api;
use crate::shared::detail_card::DetailCard;
use crate::shared::entity_list::{EntityList, RowAction};
use crate::shared::form_modal::FormModal;
use contracts::domain::a001_insured::aggregate::INFO_COLUMNS;
use contracts::domain::{a002_vehicle, a003_insurance};
use contracts::shared::list_state::ListItem;
use contracts::shared::normalizer::normalize;
use leptos::prelude::*;
use serde_json::Value;

#[component]
pub fn InsuredDetails(
    insured_id: String,
    tab_key: String,
    tabs_store: AppGlobalContext,
) -> impl IntoView {
    let api = use_api();
    let opts = api.normalize_options();
    let vm = InsuredDetailsViewModel::new();

    let opts_for_title = opts.clone();
    let on_loaded = Callback::new(move |customer: Value| {
        let row = normalize(&customer, "_id", INFO_COLUMNS, &opts_for_title);
        tabs_store.update_tab_title(&tab_key, &detail_tab_label("Customer", &row.text("name")));
    });
    vm.load(api, insured_id.clone(), on_loaded);

    let insured_for_tab = insured_id.clone();
    let open_insurances = Callback::new(move |item: ListItem| {
        let key = detail_key(INSURANCES, &[insured_for_tab.as_str(), item.row.id.as_str()]);
        let plate = item.row.text(a002_vehicle::aggregate::PLATE_FIELD);
        tabs_store.open_tab(&key, &detail_tab_label("Insurances", &plate));
    });

    let insured_for_form = insured_id.clone();
    let add_insurance = Callback::new(move |item: ListItem| {
        vm.open_insurance_form(&insured_for_form, &item.row.id);
    });

    let opts = StoredValue::new(opts);

    view! {
        <div class="page">
            <Show when=move || vm.loading.get() && vm.customer.with(Option::is_none)>
                <div class="loading">"Loading..."</div>
            </Show>
            {move || vm.error.get().map(|message| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{message}</span>
                </div>
            })}
            {move || vm.customer.get().map(|customer| view! {
                <DetailCard
                    title="Customer Information"
                    columns=INFO_COLUMNS
                    record=customer
                    opts=opts.get_value()
                />
            })}

            <EntityList
                descriptor=&a002_vehicle::aggregate::DESCRIPTOR
                scope=vec![insured_id.clone()]
                refresh=vm.vehicles_refresh
                on_create=Callback::new(move |_| vm.open_vehicle_form())
                actions=vec![
                    RowAction::new("Insurances", "shield", open_insurances),
                    RowAction::new("Add Insurance", "plus", add_insurance),
                ]
                empty_text="No vehicles registered for this customer."
            />

            <VehicleForm
                insured_id=insured_id
                form=vm.vehicle_form
                on_saved=Callback::new(move |_| vm.vehicle_saved())
            />
            <FormModal
                descriptor=&a003_insurance::aggregate::DESCRIPTOR
                form=vm.insurance_form
                scope=vm.insurance_scope
                on_saved=Callback::new(move |_| vm.insurance_saved())
            />
        </div>
    }
}
