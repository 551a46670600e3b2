use crate::shared::descriptor::{Attachment, EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

pub const SUBMIT_FAILED: &str = "Failed to add check. Please try again.";

pub const COLUMNS: &[Column] = &[
    Column::new("checkNumber", "Check No", FieldRule::Text("checkNumber")),
    Column::new("checkDueDate", "Due Date", FieldRule::Date("checkDueDate")),
    Column::new("checkAmount", "Amount", FieldRule::Money("checkAmount")),
    Column::new(
        "isReturned",
        "Returned",
        FieldRule::Bool {
            path: "isReturned",
            yes: "Yes",
            no: "No",
        },
    ),
    Column::new("checkImage", "Check Image", FieldRule::Text("checkImage")).as_link(),
];

const FIELDS: &[FormField] = &[
    FormField::new("checkNumber", "Check Number", FieldKind::Text).required(),
    FormField::new("checkDueDate", "Due Date", FieldKind::Date).required(),
    FormField::new("checkAmount", "Amount", FieldKind::Number).required(),
    FormField::new("isReturned", "Returned", FieldKind::Bool).with_default("false"),
];

/// Checks of one policy. Scope: `[insured_id, vehicle_id, insurance_id]`.
pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "check",
    title: "Checks",
    add_label: "Add Check",
    list: PathTemplate("/insured/getCheck/{}/{}/{}"),
    list_shape: ListShape::Key("checks"),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/insured/add/{}/{}/{}")),
    update: None,
    delete: None,
    form: FormSpec {
        fields: FIELDS,
        attachment: Some(Attachment {
            field: "checkImage",
            label: "Check Image",
        }),
    },
    delete_prompt: "Are you sure you want to delete this check?",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_state::{FormModalState, MultipartBody, StagedFile, SubmitBody};
    use crate::shared::normalizer::{normalize, NormalizeOptions};
    use serde_json::json;

    #[test]
    fn check_row_rendering() {
        let record = json!({
            "_id": "k1",
            "checkNumber": "889",
            "checkDueDate": "2024-07-15",
            "checkAmount": "abc",
            "isReturned": true
        });
        let row = normalize(&record, "_id", COLUMNS, &NormalizeOptions::default());
        assert_eq!(row.text("checkAmount"), "N/A");
        assert_eq!(row.text("checkDueDate"), "15/07/2024");
        assert_eq!(row.text("isReturned"), "Yes");
        assert_eq!(row.text("checkImage"), "N/A");

        let paid = json!({ "checkAmount": 1500, "isReturned": false });
        let row = normalize(&paid, "_id", COLUMNS, &NormalizeOptions::default());
        assert_eq!(row.text("checkAmount"), "₪1,500.00");
        assert_eq!(row.text("isReturned"), "No");
    }

    #[test]
    fn check_form_submits_multipart_with_image() {
        let mut form = FormModalState::new(DESCRIPTOR.form);
        form.open_create();
        form.set_field("checkNumber", "889");
        form.set_field("checkDueDate", "2024-07-15");
        form.set_field("checkAmount", "1500");
        form.stage_file(StagedFile {
            name: "check.png".into(),
            size: 4096,
        });
        let submission = form.begin_submit().unwrap();
        assert_eq!(
            submission.body,
            SubmitBody::Multipart(MultipartBody {
                fields: vec![
                    ("checkNumber".into(), "889".into()),
                    ("checkDueDate".into(), "2024-07-15".into()),
                    ("checkAmount".into(), "1500".into()),
                    ("isReturned".into(), "false".into()),
                ],
                file_field: Some("checkImage"),
            })
        );
        assert_eq!(
            DESCRIPTOR.create_path(&["c1", "v1", "p1"]).unwrap(),
            "/insured/add/c1/v1/p1"
        );
    }
}
