//! Add-vehicle modal with registry pre-fill.

mod model;

use crate::app::use_config;
use crate::shared::form_modal::FormModal;
use contracts::domain::a002_vehicle::aggregate::{DESCRIPTOR, PLATE_FIELD};
use contracts::domain::a002_vehicle::registry::{RegistryQuery, LOOKING_UP, NOT_FOUND};
use contracts::shared::form_state::FormModalState;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn VehicleForm(
    insured_id: String,
    form: RwSignal<FormModalState>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let config = use_config();
    let notice = RwSignal::new(None::<String>);
    // only the latest lookup may touch the form
    let generation = StoredValue::new(0u64);

    Effect::new(move |_| {
        if !form.with(|f| f.is_open()) {
            notice.set(None);
        }
    });

    let on_blur = Callback::new(move |(path, plate): (&'static str, String)| {
        if path != PLATE_FIELD || plate.trim().is_empty() {
            return;
        }
        let registry = &config.vehicle_registry;
        let url = match RegistryQuery::new(&registry.resource_id, &plate).url(&registry.url) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Registry query for '{}' failed: {}", plate, e);
                return;
            }
        };

        generation.update_value(|g| *g += 1);
        let issued = generation.get_value();
        notice.set(Some(LOOKING_UP.to_string()));

        spawn_local(async move {
            let outcome = model::lookup_registry(&url).await;
            if generation.try_get_value() != Some(issued) {
                return;
            }
            match outcome {
                Ok(Some(values)) => {
                    let applied = form.try_update(|f| f.apply_prefill(&values));
                    log::debug!("Registry pre-filled {:?} fields", applied);
                    notice.try_set(None);
                }
                Ok(None) => {
                    notice.try_set(Some(NOT_FOUND.to_string()));
                }
                Err(e) => {
                    log::warn!("Registry lookup failed: {}", e);
                    notice.try_set(Some(NOT_FOUND.to_string()));
                }
            }
        });
    });

    view! {
        <FormModal
            descriptor=&DESCRIPTOR
            form=form
            scope=vec![insured_id]
            on_saved=on_saved
            on_blur=on_blur
            notice=notice
        />
    }
}
