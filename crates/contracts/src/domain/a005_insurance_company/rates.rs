//! Per-vehicle-category premium rates of a non-mandatory insurance company.

use crate::shared::form_state::FormError;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Mandatory insurance type; companies of this type carry no rates.
pub const MANDATORY: &str = "الزامي";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateCategory {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateField {
    pub key: &'static str,
    pub label: &'static str,
}

pub const CATEGORIES: &[RateCategory] = &[
    RateCategory { key: "private_car", label: "Private Car" },
    RateCategory { key: "commercial_car", label: "Commercial Car" },
    RateCategory { key: "motorcycle", label: "Motorcycle" },
];

pub const RATE_FIELDS: &[RateField] = &[
    RateField { key: "تحت_24", label: "Price for drivers under 24" },
    RateField { key: "فوق_24", label: "Price for drivers over 24" },
    RateField { key: "مبلغ_العرض", label: "Offer amount" },
    RateField { key: "الحد_الأدنى_لـ_60_ألف", label: "Minimum for 60K" },
];

pub fn carries_rates(insurance_type: &str) -> bool {
    insurance_type != MANDATORY
}

/// Rates by category key, then by rate field key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    values: BTreeMap<&'static str, BTreeMap<&'static str, f64>>,
}

fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9e15 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::from(0))
    }
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &str, field: &str) -> f64 {
        self.values
            .get(category)
            .and_then(|rates| rates.get(field))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set one rate from user input; an empty input counts as 0.
    pub fn set(&mut self, category: &str, field: &str, raw: &str) -> Result<(), FormError> {
        let Some(cat) = CATEGORIES.iter().find(|c| c.key == category) else {
            return Ok(());
        };
        let Some(rate) = RATE_FIELDS.iter().find(|r| r.key == field) else {
            return Ok(());
        };
        let raw = raw.trim();
        let value = if raw.is_empty() {
            0.0
        } else {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or(FormError::InvalidNumber(rate.label))?
        };
        self.values.entry(cat.key).or_default().insert(rate.key, value);
        Ok(())
    }

    /// `rates` payload: every category with every rate for a non-mandatory
    /// type, an empty object otherwise.
    pub fn to_json(&self, insurance_type: &str) -> Value {
        let mut rates = Map::new();
        if carries_rates(insurance_type) {
            for category in CATEGORIES {
                let fields: Map<String, Value> = RATE_FIELDS
                    .iter()
                    .map(|f| (f.key.to_string(), number(self.get(category.key, f.key))))
                    .collect();
                rates.insert(category.key.to_string(), Value::Object(fields));
            }
        }
        Value::Object(rates)
    }

    /// Add the `rates` object to a company create body.
    pub fn attach(&self, body: &mut Value) {
        let insurance_type = body
            .get("insuranceType")
            .and_then(Value::as_str)
            .unwrap_or(MANDATORY)
            .to_string();
        if let Value::Object(map) = body {
            map.insert("rates".to_string(), self.to_json(&insurance_type));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mandatory_company_sends_empty_rates() {
        let mut table = RateTable::new();
        table.set("private_car", "تحت_24", "1500").unwrap();
        let mut body = json!({ "name": "Ahlia", "insuranceType": MANDATORY });
        table.attach(&mut body);
        assert_eq!(body["rates"], json!({}));
    }

    #[test]
    fn other_types_send_every_category() {
        let mut table = RateTable::new();
        table.set("private_car", "تحت_24", "1500").unwrap();
        table.set("motorcycle", "مبلغ_العرض", "99.5").unwrap();
        table.set("private_car", "فوق_24", "").unwrap();
        let rates = table.to_json("شامل");

        assert_eq!(rates["private_car"]["تحت_24"], json!(1500));
        assert_eq!(rates["private_car"]["فوق_24"], json!(0));
        assert_eq!(rates["motorcycle"]["مبلغ_العرض"], json!(99.5));
        assert_eq!(rates["commercial_car"]["الحد_الأدنى_لـ_60_ألف"], json!(0));
        assert_eq!(rates.as_object().unwrap().len(), 3);
    }

    #[test]
    fn invalid_rate_is_rejected() {
        let mut table = RateTable::new();
        assert_eq!(
            table.set("private_car", "تحت_24", "abc"),
            Err(FormError::InvalidNumber("Price for drivers under 24"))
        );
        assert_eq!(table.get("private_car", "تحت_24"), 0.0);
        // unknown keys are ignored
        assert!(table.set("truck", "تحت_24", "5").is_ok());
        assert_eq!(table, RateTable::new());
    }

    #[test]
    fn later_input_replaces_earlier_one() {
        let mut table = RateTable::new();
        table.set("commercial_car", "فوق_24", "800").unwrap();
        table.set("commercial_car", "فوق_24", "950").unwrap();
        table.set("commercial_car", "تحت_24", "1100").unwrap();
        assert_eq!(table.get("commercial_car", "فوق_24"), 950.0);
        assert_eq!(table.get("commercial_car", "تحت_24"), 1100.0);
        assert_eq!(table.get("private_car", "فوق_24"), 0.0);
    }
}
