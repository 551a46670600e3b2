use super::model;
use crate::shared::api_utils::ApiClient;
use contracts::domain::{a002_vehicle, a003_insurance};
use contracts::shared::form_state::FormModalState;
use contracts::shared::list_state::FETCH_FAILED;
use leptos::prelude::*;
use serde_json::Value;

/// State of the customer page: the customer document, the vehicle list
/// reload trigger, and the two nested create forms.
#[derive(Clone, Copy)]
pub struct InsuredDetailsViewModel {
    pub customer: RwSignal<Option<Value>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub vehicles_refresh: RwSignal<u32>,
    pub vehicle_form: RwSignal<FormModalState>,
    pub insurance_form: RwSignal<FormModalState>,
    /// `[insured_id, vehicle_id]` of the vehicle getting a new insurance
    pub insurance_scope: RwSignal<Vec<String>>,
}

impl InsuredDetailsViewModel {
    pub fn new() -> Self {
        Self {
            customer: RwSignal::new(None),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            vehicles_refresh: RwSignal::new(0),
            vehicle_form: RwSignal::new(FormModalState::new(
                a002_vehicle::aggregate::DESCRIPTOR.form,
            )),
            insurance_form: RwSignal::new(FormModalState::new(
                a003_insurance::aggregate::DESCRIPTOR.form,
            )),
            insurance_scope: RwSignal::new(vec![]),
        }
    }

    pub fn load(&self, api: ApiClient, insured_id: String, on_loaded: Callback<Value>) {
        let this = *self;
        this.loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match model::fetch_customer(&api, &insured_id).await {
                Ok(customer) => {
                    on_loaded.run(customer.clone());
                    this.customer.try_set(Some(customer));
                    this.error.try_set(None);
                }
                Err(e) => {
                    log::error!("Failed to load customer {}: {}", insured_id, e);
                    this.error.try_set(Some(e.user_message(FETCH_FAILED)));
                }
            }
            this.loading.try_set(false);
        });
    }

    pub fn open_vehicle_form(&self) {
        self.vehicle_form.update(|f| f.open_create());
    }

    /// A vehicle was added: close the form and reload the vehicle list.
    pub fn vehicle_saved(&self) {
        self.vehicle_form.update(|f| {
            f.close();
        });
        self.vehicles_refresh.update(|n| *n += 1);
    }

    pub fn open_insurance_form(&self, insured_id: &str, vehicle_id: &str) {
        self.insurance_scope
            .set(vec![insured_id.to_string(), vehicle_id.to_string()]);
        self.insurance_form.update(|f| f.open_create());
    }

    pub fn insurance_saved(&self) {
        self.insurance_form.update(|f| {
            f.close();
        });
    }
}

impl Default for InsuredDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}
