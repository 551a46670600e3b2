use crate::shared::descriptor::{EntityDescriptor, FieldKind, FormField, FormSpec};
use crate::shared::envelope::ListShape;
use crate::shared::normalizer::{Column, FieldRule, Row};
use crate::shared::path::PathTemplate;

/// Payment method value for policies paid by check. Only those rows get
/// the check actions.
pub const CHECK_PAYMENT: &str = "شيك";

pub const PAYMENT_METHODS: &[&str] = &["نقدا", CHECK_PAYMENT, "فيزا"];

pub const COLUMNS: &[Column] = &[
    Column::new("startDate", "Start Date", FieldRule::Date("insuranceStartDate")),
    Column::new("endDate", "End Date", FieldRule::Date("insuranceEndDate")),
    Column::new("insuranceAmount", "Insurance Amount", FieldRule::Number("insuranceAmount")),
    Column::new("paidAmount", "Paid Amount", FieldRule::Number("paidAmount")),
    Column::new(
        "remainingDebt",
        "Remaining Debt",
        FieldRule::Remaining {
            total: "insuranceAmount",
            paid: "paidAmount",
            remaining: "remainingDebt",
        },
    ),
    Column::new("insuranceType", "Insurance Type", FieldRule::Text("insuranceType")),
    Column::new("paymentMethod", "Payment Method", FieldRule::Text("paymentMethod")),
    Column::new("insuranceCompany", "Insurance Company", FieldRule::Text("insuranceCompany")),
];

const FIELDS: &[FormField] = &[
    FormField::new("insuranceCompany", "Insurance Company", FieldKind::Text).required(),
    FormField::new("insuranceType", "Insurance Type", FieldKind::Text).required(),
    FormField::new("insuranceStartDate", "Start Date", FieldKind::Date).required(),
    FormField::new("insuranceEndDate", "End Date", FieldKind::Date).required(),
    FormField::new("insuranceAmount", "Insurance Amount", FieldKind::Number).required(),
    FormField::new("paidAmount", "Paid Amount", FieldKind::Number),
    FormField::new("paymentMethod", "Payment Method", FieldKind::Select(PAYMENT_METHODS))
        .required(),
];

/// Policies of one vehicle. Scope: `[insured_id, vehicle_id]`.
pub const DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    key: "insurance",
    title: "Insurances",
    add_label: "Add Insurance",
    list: PathTemplate("/insured/get/{}/{}"),
    list_shape: ListShape::Key("insurances"),
    id_path: "_id",
    columns: COLUMNS,
    create: Some(PathTemplate("/insured/addInsurance/{}/{}")),
    update: None,
    delete: Some(PathTemplate("/insured/removeInsuranceFromVehicle/{}/{}/{}")),
    form: FormSpec {
        fields: FIELDS,
        attachment: None,
    },
    delete_prompt: "Are you sure you want to delete this insurance?",
};

pub fn paid_by_check(row: &Row) -> bool {
    row.text("paymentMethod") == CHECK_PAYMENT
}
