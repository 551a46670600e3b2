use contracts::domain::a005_insurance_company::rates::{
    carries_rates, RateTable, CATEGORIES, MANDATORY, RATE_FIELDS,
};
use contracts::shared::form_state::FormError;
use leptos::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw rate inputs keyed by `(category, field)`.
pub type RateInputs = BTreeMap<(&'static str, &'static str), String>;

pub fn parse_rates(inputs: &RateInputs) -> Result<RateTable, FormError> {
    let mut table = RateTable::new();
    for ((category, field), raw) in inputs {
        table.set(category, field, raw)?;
    }
    Ok(table)
}

/// Add `rates` to a company create body. The inputs are only read when the
/// selected type carries rates; for a mandatory company the grid is hidden.
pub fn attach_rates(inputs: &RateInputs, body: &mut Value) -> Result<(), FormError> {
    let insurance_type = body
        .get("insuranceType")
        .and_then(Value::as_str)
        .unwrap_or(MANDATORY);
    let table = if carries_rates(insurance_type) {
        parse_rates(inputs)?
    } else {
        RateTable::new()
    };
    table.attach(body);
    Ok(())
}

/// Grid of rate inputs, one row per vehicle category.
#[component]
pub fn RatesEditor(inputs: RwSignal<RateInputs>) -> impl IntoView {
    view! {
        <fieldset class="rates">
            <legend>"Rates"</legend>
            <table class="table__data rates__table">
                <thead>
                    <tr>
                        <th></th>
                        {RATE_FIELDS.iter().map(|f| view! { <th>{f.label}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {CATEGORIES
                        .iter()
                        .map(|category| {
                            let cat = category.key;
                            view! {
                                <tr>
                                    <th>{category.label}</th>
                                    {RATE_FIELDS
                                        .iter()
                                        .map(|rate| {
                                            let key = (cat, rate.key);
                                            let value = move || {
                                                inputs.with(|m| {
                                                    m.get(&key).cloned().unwrap_or_default()
                                                })
                                            };
                                            view! {
                                                <td>
                                                    <input
                                                        class="form__input"
                                                        type="number"
                                                        step="any"
                                                        min="0"
                                                        placeholder="0"
                                                        prop:value=value
                                                        on:input=move |ev| {
                                                            let raw = event_target_value(&ev);
                                                            inputs.update(|m| {
                                                                m.insert(key, raw);
                                                            });
                                                        }
                                                    />
                                                </td>
                                            }
                                        })
                                        .collect_view()}
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </fieldset>
    }
}
