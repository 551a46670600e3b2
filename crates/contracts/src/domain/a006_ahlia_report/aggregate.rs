use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

const INSURED_NAME: FieldRule = FieldRule::Fallback(
    &FieldRule::Text("insuredPerson.name"),
    &FieldRule::FullName {
        first: "insuredId.first_name",
        last: "insuredId.last_name",
    },
);

pub const COLUMNS: &[Column] = &[
    Column::new("reportNumber", "Report No.", FieldRule::Text("reportNumber")),
    Column::new("accidentDate", "Accident Date", FieldRule::Date("accidentDate")),
    Column::new("accidentLocation", "Location", FieldRule::Text("accidentDetails.location")),
    Column::new("policyNumber", "Policy No.", FieldRule::Text("policyInfo.policyNumber")),
    Column::new("insuredName", "Insured Name", INSURED_NAME),
    Column::new("driverName", "Driver Name", FieldRule::Text("driverInfo.name")),
    Column::new(
        "vehicleRegNo",
        "Vehicle Reg. No.",
        FieldRule::Text("vehicleInfo.registrationNumber"),
    ),
];

const FIELDS: &[FormField] = &[
    FormField::new("reportNumber", "Report No.", FieldKind::Text).required(),
    FormField::new("accidentDate", "Accident Date", FieldKind::Date).required(),
    FormField::new("accidentDetails.location", "Location", FieldKind::Text),
    FormField::new("accidentDetails.description", "Description", FieldKind::TextArea),
    FormField::new("policyInfo.policyNumber", "Policy No.", FieldKind::Text),
    FormField::new("insuredPerson.name", "Insured Name", FieldKind::Text),
    FormField::new("driverInfo.name", "Driver Name", FieldKind::Text),
    FormField::new("driverInfo.licenseNumber", "Driver License No.", FieldKind::Text),
    FormField::new("vehicleInfo.registrationNumber", "Vehicle Reg. No.", FieldKind::Text),
];

pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "ahlia_report",
    title: "Ahlia Accident Reports",
    add_label: "Add Report",
    list: PathTemplate("/AhliaAccidentReport/all"),
    list_shape: ListShape::Probe(&["findAll", "data"]),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/AhliaAccidentReport/add")),
    update: Some(PathTemplate("/AhliaAccidentReport/update/{}")),
    delete: Some(PathTemplate("/AhliaAccidentReport/delete/{}")),
    form: FormSpec {
        fields: FIELDS,
        attachment: None,
    },
    delete_prompt: "Are you sure you want to delete this report?",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::envelope::decode_list;
    use crate::shared::normalizer::{normalize, NormalizeOptions};
    use serde_json::json;

    #[test]
    fn report_without_number() {
        let record = json!({ "_id": "r1", "accidentDetails": { "location": "Haifa" } });
        let row = normalize(&record, "_id", COLUMNS, &NormalizeOptions::default());
        assert_eq!(row.id, "r1");
        assert_eq!(row.text("reportNumber"), "N/A");
        assert_eq!(row.text("accidentLocation"), "Haifa");
        assert_eq!(row.text("accidentDate"), "N/A");
        assert_eq!(row.text("insuredName"), "N/A");
    }

    #[test]
    fn insured_name_falls_back_to_linked_customer() {
        let opts = NormalizeOptions::default();
        let record = json!({ "insuredId": { "first_name": "Rami", "last_name": "Khalil" } });
        assert_eq!(normalize(&record, "_id", COLUMNS, &opts).text("insuredName"), "Rami Khalil");

        let record = json!({
            "insuredPerson": { "name": "Direct Name" },
            "insuredId": { "first_name": "Rami", "last_name": "Khalil" }
        });
        assert_eq!(normalize(&record, "_id", COLUMNS, &opts).text("insuredName"), "Direct Name");
    }

    #[test]
    fn list_probe_order() {
        let body = json!({ "data": [{ "_id": "r1" }] });
        let records = decode_list("/AhliaAccidentReport/all", body, DESCRIPTOR.list_shape).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            DESCRIPTOR.update_path(&[], "r1").unwrap(),
            "/AhliaAccidentReport/update/r1"
        );
    }
}
