use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

// ============================================================================
// Endpoints
// ============================================================================

/// Single customer, wrapped under [`FIND_KEY`]; includes the `vehicles` array.
pub const FIND: PathTemplate = PathTemplate("/insured/findInsured/{}");
pub const FIND_KEY: &str = "insured";

const FULL_NAME: FieldRule = FieldRule::FullName {
    first: "first_name",
    last: "last_name",
};

// ============================================================================
// Columns
// ============================================================================

pub const COLUMNS: &[Column] = &[
    Column::new("name", "Name", FULL_NAME),
    Column::new("mobile", "Mobile", FieldRule::Text("phone_number")),
    Column::new("address", "Address", FieldRule::Text("city")),
    Column::new("identity", "Identity", FieldRule::Text("id_Number")),
    Column::new("email", "Email", FieldRule::Text("email")),
    Column::new("agent", "Agent", FieldRule::Text("agentsName")),
];

/// Customer detail card
pub const INFO_COLUMNS: &[Column] = &[
    Column::new("name", "Name", FULL_NAME),
    Column::new("identity", "Identity Number", FieldRule::Text("id_Number")),
    Column::new("mobile", "Mobile", FieldRule::Text("phone_number")),
    Column::new("email", "Email", FieldRule::Text("email")),
    Column::new("city", "City", FieldRule::Text("city")),
    Column::new("birthDate", "Birth Date", FieldRule::Date("birth_date")),
    Column::new("joiningDate", "Joining Date", FieldRule::Date("joining_date")),
    Column::new("agent", "Agent", FieldRule::Text("agentsName")),
    Column::new("notes", "Notes", FieldRule::Text("notes")),
];

// ============================================================================
// Form
// ============================================================================

const FIELDS: &[FormField] = &[
    FormField::new("first_name", "First Name", FieldKind::Text).required(),
    FormField::new("last_name", "Last Name", FieldKind::Text).required(),
    FormField::new("id_Number", "Identity Number", FieldKind::Text).required(),
    FormField::new("phone_number", "Mobile", FieldKind::Text),
    FormField::new("joining_date", "Joining Date", FieldKind::Date),
    FormField::new("birth_date", "Birth Date", FieldKind::Date),
    FormField::new("city", "City", FieldKind::Text),
    FormField::new("notes", "Notes", FieldKind::TextArea),
];

pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "insured",
    title: "Customers",
    add_label: "Add Customer",
    list: PathTemplate("/insured/allInsured"),
    list_shape: ListShape::Key("insuredList"),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/insured/addInsured")),
    update: Some(PathTemplate("/insured/updateInsured/{}")),
    delete: Some(PathTemplate("/insured/deleteInsured/{}")),
    form: FormSpec {
        fields: FIELDS,
        attachment: None,
    },
    delete_prompt: "Are you sure you want to delete this customer?",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::envelope::decode_list;
    use crate::shared::normalizer::{normalize, NormalizeOptions};
    use serde_json::json;

    #[test]
    fn customer_rows_from_list_envelope() {
        let body = json!({
            "insuredList": [
                {
                    "_id": "c1",
                    "first_name": "Omar",
                    "last_name": "Haddad",
                    "phone_number": "0599123456",
                    "city": "Ramallah",
                    "id_Number": "401234567",
                    "agentsName": "Sami"
                },
                { "_id": "c2", "last_name": "NoFirst" }
            ]
        });
        let records = decode_list("/insured/allInsured", body, DESCRIPTOR.list_shape).unwrap();
        let items = DESCRIPTOR.to_items(records, &NormalizeOptions::default());

        assert_eq!(items[0].row.id, "c1");
        assert_eq!(items[0].row.text("name"), "Omar Haddad");
        assert_eq!(items[0].row.text("address"), "Ramallah");
        assert_eq!(items[0].row.text("email"), "N/A");
        assert_eq!(items[1].row.text("name"), "N/A");
        assert_eq!(items[1].row.text("mobile"), "N/A");
    }

    #[test]
    fn info_card_formats_dates() {
        let record = json!({
            "first_name": "Lina",
            "birth_date": "1990-05-20T00:00:00.000Z",
            "joining_date": null
        });
        let row = normalize(&record, "_id", INFO_COLUMNS, &NormalizeOptions::default());
        assert_eq!(row.text("birthDate"), "20/05/1990");
        assert_eq!(row.text("joiningDate"), "N/A");
        assert_eq!(row.text("name"), "Lina");
    }

    #[test]
    fn endpoints() {
        assert_eq!(DESCRIPTOR.list_path(&[]).unwrap(), "/insured/allInsured");
        assert_eq!(
            DESCRIPTOR.update_path(&[], "c1").unwrap(),
            "/insured/updateInsured/c1"
        );
        assert_eq!(
            DESCRIPTOR.delete_path(&[], "c1").unwrap(),
            "/insured/deleteInsured/c1"
        );
        assert_eq!(FIND.fill(&["c1"]).unwrap(), "/insured/findInsured/c1");
    }
}
