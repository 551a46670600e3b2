use crate::domain::a005_insurance_company::ui::rates_editor::{
    attach_rates, RateInputs, RatesEditor,
};
use crate::shared::entity_list::EntityList;
use crate::shared::form_modal::FormModal;
use contracts::domain::a005_insurance_company::aggregate::DESCRIPTOR;
use contracts::domain::a005_insurance_company::rates::carries_rates;
use contracts::shared::form_state::FormModalState;
use leptos::prelude::*;
use serde_json::Value;

/// Companies list. Creating a company goes through a dedicated modal that
/// also collects per-category rates; editing uses the list's own modal.
#[component]
pub fn InsuranceCompanyList() -> impl IntoView {
    let create_form = RwSignal::new(FormModalState::new(DESCRIPTOR.form));
    let rates = RwSignal::new(RateInputs::new());
    let refresh = RwSignal::new(0u32);

    let open_create = Callback::new(move |_: ()| {
        rates.set(RateInputs::new());
        create_form.update(|f| f.open_create());
    });

    let on_saved = Callback::new(move |_: ()| {
        create_form.update(|f| {
            f.close();
        });
        rates.set(RateInputs::new());
        refresh.update(|n| *n += 1);
    });

    let augment = Callback::new(move |mut body: Value| -> Result<Value, String> {
        rates
            .with_untracked(|inputs| attach_rates(inputs, &mut body))
            .map_err(|e| e.to_string())?;
        Ok(body)
    });

    let shows_rates = move || create_form.with(|f| carries_rates(f.value("insuranceType")));

    view! {
        <div class="page">
            <EntityList
                descriptor=&DESCRIPTOR
                refresh=refresh
                on_create=open_create
                empty_text="No insurance companies found."
            />
            <FormModal
                descriptor=&DESCRIPTOR
                form=create_form
                scope={Vec::<String>::new()}
                on_saved=on_saved
                augment=augment
                extra=std::sync::Arc::new(move || {
                    view! {
                        <Show when=shows_rates>
                            <RatesEditor inputs=rates />
                        </Show>
                    }
                    .into_any()
                })
            />
        </div>
    }
}
