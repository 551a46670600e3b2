use super::rates::MANDATORY;
use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule};
use crate::shared::path::PathTemplate;

pub const INSURANCE_TYPES: &[&str] = &[
    MANDATORY,
    "ثالث شامل",
    "شامل",
    "طرف ثالث",
];

pub const COLUMNS: &[Column] = &[
    Column::new("name", "Company Name", FieldRule::Text("name")),
    Column::new("contact", "Contact Info", FieldRule::Text("contact")),
    Column::new("address", "Address", FieldRule::Text("address")),
    Column::new("insuranceType", "Insurance Type", FieldRule::Text("insuranceType")),
];

const FIELDS: &[FormField] = &[
    FormField::new("name", "Company Name", FieldKind::Text).required(),
    FormField::new("insuranceType", "Insurance Type", FieldKind::Select(INSURANCE_TYPES))
        .required()
        .with_default(MANDATORY),
    FormField::new("contact", "Contact Info", FieldKind::Text).required(),
    FormField::new("address", "Address", FieldKind::Text).required(),
];

pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "company",
    title: "Insurance Companies",
    add_label: "Add Company",
    list: PathTemplate("/company/all"),
    list_shape: ListShape::Bare,
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/company/addInsuranceCompany")),
    update: Some(PathTemplate("/company/updateInsuranceCompany/{}")),
    delete: Some(PathTemplate("/company/delete/{}")),
    form: FormSpec {
        fields: FIELDS,
        attachment: None,
    },
    delete_prompt: "Are you sure you want to delete this company?",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::envelope::decode_list;
    use crate::shared::form_state::{FormError, FormModalState};
    use crate::shared::normalizer::NormalizeOptions;
    use serde_json::json;

    #[test]
    fn companies_come_as_bare_array() {
        let body = json!([
            {
                "_id": "co1",
                "name": "Trust",
                "contact": "02-555",
                "address": "Ramallah",
                "insuranceType": "شامل"
            },
            { "_id": "co2", "name": "Ahlia" }
        ]);
        let records = decode_list("/company/all", body, DESCRIPTOR.list_shape).unwrap();
        let items = DESCRIPTOR.to_items(records, &NormalizeOptions::default());
        assert_eq!(items[0].row.text("insuranceType"), "شامل");
        assert_eq!(items[1].row.text("contact"), "N/A");
    }

    #[test]
    fn name_contact_address_required() {
        let mut form = FormModalState::new(DESCRIPTOR.form);
        form.open_create();
        assert_eq!(form.value("insuranceType"), MANDATORY);
        form.set_field("name", "Trust");
        assert_eq!(
            form.begin_submit().unwrap_err(),
            FormError::MissingRequired(vec!["Contact Info", "Address"])
        );
    }
}
