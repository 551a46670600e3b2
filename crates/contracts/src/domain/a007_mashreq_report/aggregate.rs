use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

// Mashreq reports have no report number of their own
const REPORT_IDENTIFIER: FieldRule = FieldRule::Fallback(
    &FieldRule::Text("insurancePolicy.number"),
    &FieldRule::IdSuffix {
        path: "_id",
        len: 6,
        uppercase: false,
    },
);

const INSURED_NAME: FieldRule = FieldRule::Fallback(
    &FieldRule::Text("insuredPerson.name"),
    &FieldRule::FullName {
        first: "insuredId.first_name",
        last: "insuredId.last_name",
    },
);

pub const COLUMNS: &[Column] = &[
    Column::new("reportIdentifier", "Report/Policy No.", REPORT_IDENTIFIER),
    Column::new("accidentDate", "Accident Date", FieldRule::Date("accident.date")),
    Column::new("accidentLocation", "Location", FieldRule::Text("accident.accidentLocation")),
    Column::new("insuredName", "Insured Name", INSURED_NAME),
    Column::new("driverName", "Driver Name", FieldRule::Text("driver.name")),
    Column::new("vehicleRegNo", "Vehicle Reg. No.", FieldRule::Text("vehicle.registrationNumber")),
    Column::new("branchOffice", "Branch Office", FieldRule::Text("branchOffice")),
];

const FIELDS: &[FormField] = &[
    FormField::new("branchOffice", "Branch Office", FieldKind::Text).required(),
    FormField::new("insurancePolicy.number", "Policy No.", FieldKind::Text),
    FormField::new("accident.date", "Accident Date", FieldKind::Date).required(),
    FormField::new("accident.accidentLocation", "Location", FieldKind::Text),
    FormField::new("accident.description", "Description", FieldKind::TextArea),
    FormField::new("insuredPerson.name", "Insured Name", FieldKind::Text),
    FormField::new("driver.name", "Driver Name", FieldKind::Text),
    FormField::new("vehicle.registrationNumber", "Vehicle Reg. No.", FieldKind::Text),
];

pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "mashreq_report",
    title: "Al-Mashreq Accident Reports",
    add_label: "Add Report",
    list: PathTemplate("/Al_MashreqAccidentReport/all"),
    list_shape: ListShape::Probe(&["findAll", "reports"]),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/Al_MashreqAccidentReport/add")),
    update: Some(PathTemplate("/Al_MashreqAccidentReport/update/{}")),
    delete: Some(PathTemplate("/Al_MashreqAccidentReport/delete/{}")),
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
    use crate::shared::normalizer::NormalizeOptions;
    use serde_json::json;

    #[test]
    fn identifier_prefers_policy_number() {
        let body = json!({
            "reports": [
                { "_id": "65f0c1d2e3a4b5c6d7e8f901", "insurancePolicy": { "number": "POL-77" } },
                { "_id": "65f0c1d2e3a4b5c6d7e8f902", "branchOffice": "Jenin" }
            ]
        });
        let records =
            decode_list("/Al_MashreqAccidentReport/all", body, DESCRIPTOR.list_shape).unwrap();
        let items = DESCRIPTOR.to_items(records, &NormalizeOptions::default());
        assert_eq!(items[0].row.text("reportIdentifier"), "POL-77");
        assert_eq!(items[1].row.text("reportIdentifier"), "e8f902");
        assert_eq!(items[1].row.text("branchOffice"), "Jenin");
        assert_eq!(items[0].row.text("branchOffice"), "N/A");
    }

    #[test]
    fn accident_fields_are_nested() {
        let body = json!({
            "findAll": [{
                "_id": "m1",
                "accident": { "date": "2024-04-02T10:00:00.000Z", "accidentLocation": "Tulkarm" },
                "driver": { "name": "Hadi" }
            }]
        });
        let records =
            decode_list("/Al_MashreqAccidentReport/all", body, DESCRIPTOR.list_shape).unwrap();
        let items = DESCRIPTOR.to_items(records, &NormalizeOptions::default());
        let row = &items[0].row;
        assert_eq!(row.text("accidentDate"), "02/04/2024");
        assert_eq!(row.text("accidentLocation"), "Tulkarm");
        assert_eq!(row.text("driverName"), "Hadi");
        assert_eq!(row.text("vehicleRegNo"), "N/A");
    }
}
