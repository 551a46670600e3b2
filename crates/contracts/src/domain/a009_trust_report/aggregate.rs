use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

const INSURED_NAME: FieldRule = FieldRule::Fallback(
    &FieldRule::FullName {
        first: "insuredId.first_name",
        last: "insuredId.last_name",
    },
    &FieldRule::Text("insuredId.name"),
);

pub const COLUMNS: &[Column] = &[
    Column::new(
        "reportIdDisplay",
        "Report ID",
        FieldRule::IdSuffix {
            path: "_id",
            len: 6,
            uppercase: true,
        },
    ),
    Column::new("accidentDate", "Accident Date", FieldRule::Date("accidentDetails.date")),
    Column::new("accidentLocation", "Location", FieldRule::Text("accidentDetails.location")),
    Column::new("policyNumber", "Policy No.", FieldRule::Text("insuredVehicle.policyNumber")),
    Column::new("insuredName", "Insured Name", INSURED_NAME),
    Column::new("driverName", "Driver Name", FieldRule::Text("driverDetails.name")),
    Column::new(
        "vehiclePlateNumber",
        "Plate Number",
        FieldRule::Text("insuredVehicle.plateNumber"),
    ),
];

const FIELDS: &[FormField] = &[
    FormField::new("accidentDetails.date", "Accident Date", FieldKind::Date).required(),
    FormField::new("accidentDetails.location", "Location", FieldKind::Text).required(),
    FormField::new("accidentDetails.description", "Description", FieldKind::TextArea),
    FormField::new("insuredVehicle.policyNumber", "Policy No.", FieldKind::Text),
    FormField::new("insuredVehicle.plateNumber", "Plate Number", FieldKind::Text),
    FormField::new("driverDetails.name", "Driver Name", FieldKind::Text),
];

pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "trust_report",
    title: "Trust Accident Reports",
    add_label: "Add Report",
    list: PathTemplate("/TrustAccidentReport/all"),
    list_shape: ListShape::Probe(&["findAll", "data"]),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/TrustAccidentReport/add")),
    update: None,
    delete: Some(PathTemplate("/TrustAccidentReport/delete/{}")),
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
    fn trust_row() {
        let opts = NormalizeOptions::default();
        let record = json!({
            "_id": "65f0c1d2e3a4b5c6d7e8abcd",
            "insuredId": { "name": "Legacy Name" },
            "insuredVehicle": { "plateNumber": "55-123-01" }
        });
        let row = normalize(&record, "_id", COLUMNS, &opts);
        assert_eq!(row.text("reportIdDisplay"), "E8ABCD");
        assert_eq!(row.text("insuredName"), "Legacy Name");
        assert_eq!(row.text("vehiclePlateNumber"), "55-123-01");
        assert_eq!(row.text("policyNumber"), "N/A");

        let record = json!({
            "_id": "ab",
            "insuredId": { "first_name": "Maya", "last_name": "Saleh" }
        });
        let row = normalize(&record, "_id", COLUMNS, &opts);
        assert_eq!(row.text("reportIdDisplay"), "AB");
        assert_eq!(row.text("insuredName"), "Maya Saleh");
    }
}
