//! Public vehicle registry lookup (`datastore_search`), used to pre-fill
//! the vehicle form from a plate number.

use crate::shared::error::ApiError;
use crate::shared::format::iso_date;
use crate::shared::normalizer::{lookup, text_at};
use serde::Serialize;
use serde_json::Value;

pub const LOOKING_UP: &str = "Looking up vehicle data...";
pub const NOT_FOUND: &str =
    "Vehicle not found in the registry. Please fill in the details manually.";

#[derive(Debug, Serialize)]
pub struct RegistryQuery<'a> {
    pub resource_id: &'a str,
    pub q: &'a str,
}

impl<'a> RegistryQuery<'a> {
    pub fn new(resource_id: &'a str, plate: &'a str) -> Self {
        Self {
            resource_id,
            q: plate.trim(),
        }
    }

    pub fn url(&self, endpoint: &str) -> Result<String, ApiError> {
        let qs = serde_qs::to_string(self).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(format!("{endpoint}?{qs}"))
    }
}

/// Registry field to vehicle form field.
const PREFILL: &[(&str, &str)] = &[
    ("tozeret_nm", "model"),
    ("degem_cd", "modelNumber"),
    ("tokef_dt", "licenseExpiry"),
    ("mivchan_acharon_dt", "lastTest"),
    ("tzeva_rechev", "color"),
    ("sug_rechev", "type"),
    ("baalut", "ownership"),
];

const DATE_FIELDS: &[&str] = &["licenseExpiry", "lastTest"];

pub fn first_record(body: &Value) -> Option<&Value> {
    lookup(body, "result.records.0").filter(|r| r.is_object())
}

/// Form values taken from one registry record. Every mapped field is
/// returned, empty when the registry has no value for it.
pub fn prefill(record: &Value) -> Vec<(&'static str, String)> {
    PREFILL
        .iter()
        .map(|(source, target)| {
            let raw = text_at(record, source).unwrap_or_default();
            let raw = raw.trim().to_string();
            let value = if DATE_FIELDS.contains(target) {
                iso_date(&raw).unwrap_or(raw)
            } else {
                raw
            };
            (*target, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_string() {
        let query = RegistryQuery::new("053cea08", " 1234567 ");
        assert_eq!(
            query.url("https://data.gov.il/api/3/action/datastore_search").unwrap(),
            "https://data.gov.il/api/3/action/datastore_search?resource_id=053cea08&q=1234567"
        );
    }

    #[test]
    fn prefill_maps_registry_fields() {
        let body = json!({
            "success": true,
            "result": {
                "records": [{
                    "mispar_rechev": 1234567,
                    "tozeret_nm": "HYUNDAI",
                    "degem_cd": 151,
                    "tokef_dt": "2025-06-30",
                    "tzeva_rechev": "לבן",
                    "baalut": "פרטי"
                }]
            }
        });
        let record = first_record(&body).unwrap();
        let values = prefill(record);
        let get = |k: &str| values.iter().find(|(f, _)| *f == k).map(|(_, v)| v.as_str());
        assert_eq!(get("model"), Some("HYUNDAI"));
        assert_eq!(get("modelNumber"), Some("151"));
        assert_eq!(get("licenseExpiry"), Some("2025-06-30"));
        assert_eq!(get("lastTest"), Some(""));
        assert_eq!(get("ownership"), Some("פרטי"));
        assert_eq!(values.len(), 7);
    }

    #[test]
    fn no_record() {
        assert!(first_record(&json!({ "result": { "records": [] } })).is_none());
        assert!(first_record(&json!({ "success": false })).is_none());
    }
}
