use crate::shared::descriptor::{Attachment, EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{lookup, Column, FieldRule};
use crate::shared::path::PathTemplate;
use serde_json::Value;

pub const COLUMNS: &[Column] = &[
    Column::new("plateNumber", "Vehicle Number", FieldRule::Text("plateNumber")),
    Column::new("model", "Vehicle Name", FieldRule::Text("model")),
    Column::new("type", "Vehicle Type", FieldRule::Text("type")),
    Column::new("ownership", "Ownership", FieldRule::Text("ownership")),
    Column::new("color", "Color", FieldRule::Text("color")),
    Column::new("price", "Price", FieldRule::Money("price")),
    Column::new("licenseExpiry", "License Expiry", FieldRule::Date("licenseExpiry")),
    Column::new("lastTest", "Last Test", FieldRule::Date("lastTest")),
];

/// Vehicle card on the insurance page
pub const DETAIL_COLUMNS: &[Column] = &[
    Column::new("plateNumber", "Vehicle Number", FieldRule::Text("plateNumber")),
    Column::new("model", "Vehicle Name", FieldRule::Text("model")),
    Column::new("modelNumber", "Chassis Number", FieldRule::Text("modelNumber")),
    Column::new("type", "Vehicle Type", FieldRule::Text("type")),
    Column::new("ownership", "Ownership", FieldRule::Text("ownership")),
    Column::new("color", "Color", FieldRule::Text("color")),
    Column::new("price", "Price", FieldRule::Money("price")),
    Column::new("licenseExpiry", "License Expiry", FieldRule::Date("licenseExpiry")),
    Column::new("lastTest", "Last Test Date", FieldRule::Date("lastTest")),
    Column::new("image", "Image", FieldRule::Text("image")).as_link(),
];

/// Form field that triggers the registry lookup when it loses focus.
pub const PLATE_FIELD: &str = "plateNumber";

const FIELDS: &[FormField] = &[
    FormField::new("plateNumber", "Vehicle Number", FieldKind::Text).required(),
    FormField::new("model", "Vehicle Name", FieldKind::Text),
    FormField::new("modelNumber", "Vehicle Chassis Number", FieldKind::Text),
    FormField::new("type", "Vehicle Type", FieldKind::Text),
    FormField::new("ownership", "Ownership", FieldKind::Text),
    FormField::new("licenseExpiry", "License Expiry", FieldKind::Date),
    FormField::new("lastTest", "Last Test Date", FieldKind::Date),
    FormField::new("color", "Vehicle Color", FieldKind::Text),
    FormField::new("price", "Vehicle Price", FieldKind::Number),
];

/// Vehicles of one customer. Scope: `[insured_id]`.
pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "vehicle",
    title: "Vehicles",
    add_label: "Add Vehicle",
    list: PathTemplate("/insured/allVec/{}"),
    list_shape: ListShape::Key("vehicles"),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/insured/addCar/{}")),
    update: None,
    delete: None,
    form: FormSpec {
        fields: FIELDS,
        attachment: Some(Attachment {
            field: "image",
            label: "Vehicle Image (Optional)",
        }),
    },
    delete_prompt: "Are you sure you want to delete this vehicle?",
};

/// Pick one vehicle out of a customer document's `vehicles` array.
pub fn find_in_customer<'a>(customer: &'a Value, vehicle_id: &str) -> Option<&'a Value> {
    lookup(customer, "vehicles")?
        .as_array()?
        .iter()
        .find(|v| v.get("_id").and_then(Value::as_str) == Some(vehicle_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizer::{normalize, NormalizeOptions};
    use serde_json::json;

    #[test]
    fn vehicle_row() {
        let record = json!({
            "_id": "v1",
            "plateNumber": "12-345-67",
            "model": "KIA",
            "price": "45000",
            "licenseExpiry": "2025-09-01T00:00:00.000Z",
            "image": "https://cdn.example.org/v1.jpg"
        });
        let row = normalize(&record, "_id", DETAIL_COLUMNS, &NormalizeOptions::default());
        assert_eq!(row.text("price"), "₪45,000.00");
        assert_eq!(row.text("licenseExpiry"), "01/09/2025");
        assert_eq!(row.text("lastTest"), "N/A");
        assert_eq!(row.text("image"), "https://cdn.example.org/v1.jpg");
    }

    #[test]
    fn scoped_create_path() {
        assert_eq!(DESCRIPTOR.list_path(&["c1"]).unwrap(), "/insured/allVec/c1");
        assert_eq!(DESCRIPTOR.create_path(&["c1"]).unwrap(), "/insured/addCar/c1");
        assert!(DESCRIPTOR.create_path(&[]).is_err());
        assert!(!DESCRIPTOR.can_delete());
        assert_eq!(DESCRIPTOR.form.attachment.map(|a| a.field), Some("image"));
    }

    #[test]
    fn vehicle_lookup_in_customer() {
        let customer = json!({
            "_id": "c1",
            "vehicles": [{ "_id": "v1", "model": "KIA" }, { "_id": "v2", "model": "Seat" }]
        });
        assert_eq!(find_in_customer(&customer, "v2").unwrap()["model"], "Seat");
        assert!(find_in_customer(&customer, "v9").is_none());
        assert!(find_in_customer(&json!({ "_id": "c2" }), "v1").is_none());
    }
}
