use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

pub const COLUMNS: &[Column] = &[
    Column::new("reportNumber", "Report No.", FieldRule::Text("reportNumber")),
    Column::new("accidentDate", "Accident Date", FieldRule::Date("accidentDetails.accidentDate")),
    Column::new("accidentLocation", "Location", FieldRule::Text("accidentDetails.location")),
    Column::new("documentNumber", "Doc. Number", FieldRule::Text("agentInfo.documentNumber")),
    Column::new("ownerName", "Owner Name", FieldRule::Text("vehicleInfo.ownerName")),
    Column::new("driverName", "Driver Name", FieldRule::Text("driverInfo.name")),
    Column::new("vehicleNumber", "Vehicle Number", FieldRule::Text("vehicleInfo.vehicleNumber")),
];

const FIELDS: &[FormField] = &[
    FormField::new("reportNumber", "Report No.", FieldKind::Text).required(),
    FormField::new("accidentDetails.accidentDate", "Accident Date", FieldKind::Date).required(),
    FormField::new("accidentDetails.location", "Location", FieldKind::Text),
    FormField::new("accidentDetails.description", "Description", FieldKind::TextArea),
    FormField::new("agentInfo.documentNumber", "Doc. Number", FieldKind::Text),
    FormField::new("vehicleInfo.ownerName", "Owner Name", FieldKind::Text),
    FormField::new("vehicleInfo.vehicleNumber", "Vehicle Number", FieldKind::Text),
    FormField::new("driverInfo.name", "Driver Name", FieldKind::Text),
];

pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "palestine_report",
    title: "Palestine Insurance Accident Reports",
    add_label: "Add Report",
    list: PathTemplate("/PlestineAccidentReport/all"),
    list_shape: ListShape::Probe(&["findAll", "data"]),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/PlestineAccidentReport/add")),
    update: None,
    delete: Some(PathTemplate("/PlestineAccidentReport/delete/{}")),
    form: FormSpec {
        fields: FIELDS,
        attachment: None,
    },
    delete_prompt: "Are you sure you want to delete this report?",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::normalizer::{normalize, NormalizeOptions};
    use serde_json::json;

    #[test]
    fn palestine_row() {
        let record = json!({
            "_id": "p1",
            "reportNumber": 5512,
            "accidentDetails": { "accidentDate": "2023-12-31", "location": null },
            "vehicleInfo": { "ownerName": "Nour", "vehicleNumber": "9-876-54" }
        });
        let row = normalize(&record, "_id", COLUMNS, &NormalizeOptions::default());
        assert_eq!(row.text("reportNumber"), "5512");
        assert_eq!(row.text("accidentDate"), "31/12/2023");
        assert_eq!(row.text("accidentLocation"), "N/A");
        assert_eq!(row.text("ownerName"), "Nour");
        assert_eq!(row.text("documentNumber"), "N/A");
    }

    #[test]
    fn no_edit_endpoint() {
        assert!(!DESCRIPTOR.can_edit());
        assert!(DESCRIPTOR.update_path(&[], "p1").is_err());
        assert_eq!(
            DESCRIPTOR.delete_path(&[], "p1").unwrap(),
            "/PlestineAccidentReport/delete/p1"
        );
    }
}
