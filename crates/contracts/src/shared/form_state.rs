//! Form Modal state machine.
//!
//! ```text
//! closed -> idle(draft) -> submitting -> idle(success, create draft reset)
//!                                     -> idle(error shown, draft kept)
//! idle -> closed (cancel, or after the parent acknowledged a success)
//! ```
//!
//! The draft is keyed by the backend field names of the entity's
//! [`FormSpec`]; fields it does not declare never enter the draft.

use super::descriptor::{FieldKind, FormField, FormSpec};
use super::format::{format_plain_number, iso_date};
use super::normalizer::lookup;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Shown when a failed save carries no server message.
pub const SAVE_FAILED: &str = "Failed to save. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Metadata of the single file staged for upload. The browser file handle
/// itself stays with the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form is not open")]
    NotOpen,
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingRequired(Vec<&'static str>),
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartBody {
    /// Scalar parts in field order, every value as text
    pub fields: Vec<(String, String)>,
    /// Part name of the staged file, when one is staged
    pub file_field: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitBody {
    Json(Value),
    Multipart(MultipartBody),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub mode: FormMode,
    pub body: SubmitBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormModalState {
    spec: FormSpec,
    phase: FormPhase,
    mode: FormMode,
    draft: BTreeMap<&'static str, String>,
    staged: Option<StagedFile>,
    error: Option<String>,
}

fn fresh_draft(spec: &FormSpec) -> BTreeMap<&'static str, String> {
    spec.fields
        .iter()
        .map(|f| (f.path, f.default.to_string()))
        .collect()
}

fn seed_value(field: &FormField, record: &Value) -> String {
    match lookup(record, field.path) {
        Some(Value::String(s)) if field.kind == FieldKind::Date => {
            iso_date(s).unwrap_or_else(|| s.clone())
        }
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.as_f64().map(format_plain_number).unwrap_or_default(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => field.default.to_string(),
    }
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Value::from(i));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
        .map(Value::Number)
}

/// Insert `value` at a dotted path, creating intermediate objects.
pub fn insert_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = root;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => return,
        };
    }
}

fn build_json(
    spec: &FormSpec,
    draft: &BTreeMap<&'static str, String>,
    mode: &FormMode,
) -> Result<Value, FormError> {
    let mut root = Map::new();
    for field in spec.fields {
        let raw = draft.get(field.path).map(String::as_str).unwrap_or("");
        let trimmed = raw.trim();
        let editing = matches!(mode, FormMode::Edit { .. });
        let value = match field.kind {
            // an emptied number or date in edit mode clears the stored value
            FieldKind::Number | FieldKind::Date if trimmed.is_empty() => {
                editing.then_some(Value::Null)
            }
            FieldKind::Number => {
                let number = parse_number(trimmed).ok_or(FormError::InvalidNumber(field.label))?;
                Some(number)
            }
            FieldKind::Bool => Some(Value::Bool(trimmed == "true")),
            FieldKind::Date => Some(Value::String(trimmed.to_string())),
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => {
                match (raw.is_empty(), editing) {
                    (true, true) => Some(Value::String(String::new())),
                    (true, false) => None,
                    (false, _) => Some(Value::String(raw.to_string())),
                }
            }
        };
        if let Some(value) = value {
            insert_path(&mut root, field.path, value);
        }
    }
    Ok(Value::Object(root))
}

fn build_multipart(
    spec: &FormSpec,
    draft: &BTreeMap<&'static str, String>,
    has_file: bool,
) -> Result<MultipartBody, FormError> {
    let mut fields = Vec::with_capacity(spec.fields.len());
    for field in spec.fields {
        let raw = draft.get(field.path).map(String::as_str).unwrap_or("");
        let value = match field.kind {
            FieldKind::Bool => (raw.trim() == "true").to_string(),
            FieldKind::Number if !raw.trim().is_empty() => {
                parse_number(raw.trim()).ok_or(FormError::InvalidNumber(field.label))?;
                raw.trim().to_string()
            }
            _ => raw.to_string(),
        };
        fields.push((field.path.to_string(), value));
    }
    let file_field = spec.attachment.filter(|_| has_file).map(|a| a.field);
    Ok(MultipartBody { fields, file_field })
}

impl FormModalState {
    pub fn new(spec: FormSpec) -> Self {
        Self {
            spec,
            phase: FormPhase::Closed,
            mode: FormMode::Create,
            draft: BTreeMap::new(),
            staged: None,
            error: None,
        }
    }

    pub fn open_create(&mut self) {
        self.phase = FormPhase::Idle;
        self.mode = FormMode::Create;
        self.draft = fresh_draft(&self.spec);
        self.staged = None;
        self.error = None;
    }

    /// Open in edit mode, seeding every writable field from `record`.
    pub fn open_edit(&mut self, id: impl Into<String>, record: &Value) {
        self.phase = FormPhase::Idle;
        self.mode = FormMode::Edit { id: id.into() };
        self.draft = self
            .spec
            .fields
            .iter()
            .map(|f| (f.path, seed_value(f, record)))
            .collect();
        self.staged = None;
        self.error = None;
    }

    /// Cancel. Refused while a request is in flight.
    pub fn close(&mut self) -> bool {
        if self.phase == FormPhase::Submitting {
            return false;
        }
        self.phase = FormPhase::Closed;
        self.draft.clear();
        self.staged = None;
        self.error = None;
        true
    }

    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.phase != FormPhase::Closed
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit { .. })
    }

    pub fn value(&self, path: &str) -> &str {
        self.draft.get(path).map(String::as_str).unwrap_or("")
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Update one draft field. Unknown paths and a closed form are ignored.
    pub fn set_field(&mut self, path: &str, value: impl Into<String>) -> bool {
        if self.phase == FormPhase::Closed {
            return false;
        }
        match self.spec.field(path) {
            Some(field) => {
                self.draft.insert(field.path, value.into());
                true
            }
            None => false,
        }
    }

    /// Apply several values at once (registry lookups); returns how many landed.
    pub fn apply_prefill(&mut self, values: &[(&str, String)]) -> usize {
        values
            .iter()
            .filter(|(path, value)| self.set_field(path, value.clone()))
            .count()
    }

    /// Stage a file, replacing any earlier one.
    pub fn stage_file(&mut self, file: StagedFile) -> bool {
        if self.phase == FormPhase::Closed || self.spec.attachment.is_none() {
            return false;
        }
        self.staged = Some(file);
        true
    }

    pub fn clear_file(&mut self) {
        self.staged = None;
    }

    /// Validate and move to `submitting`, yielding the request to issue.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        match self.phase {
            FormPhase::Closed => return Err(FormError::NotOpen),
            FormPhase::Submitting => return Err(FormError::AlreadySubmitting),
            FormPhase::Idle => {}
        }

        let missing: Vec<&'static str> = self
            .spec
            .fields
            .iter()
            .filter(|f| f.required && self.value(f.path).trim().is_empty())
            .map(|f| f.label)
            .collect();
        if !missing.is_empty() {
            let err = FormError::MissingRequired(missing);
            self.error = Some(err.to_string());
            return Err(err);
        }

        let body = if self.spec.attachment.is_some() {
            build_multipart(&self.spec, &self.draft, self.staged.is_some())
                .map(SubmitBody::Multipart)
        } else {
            build_json(&self.spec, &self.draft, &self.mode).map(SubmitBody::Json)
        };
        let body = match body {
            Ok(body) => body,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.phase = FormPhase::Submitting;
        self.error = None;
        Ok(Submission {
            mode: self.mode.clone(),
            body,
        })
    }

    /// Request succeeded. A create form is reset for reuse.
    pub fn finish_success(&mut self) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        self.phase = FormPhase::Idle;
        self.error = None;
        if self.mode == FormMode::Create {
            self.draft = fresh_draft(&self.spec);
            self.staged = None;
        }
    }

    /// Request failed; the draft stays so the user can retry.
    pub fn finish_error(&mut self, message: impl Into<String>) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        self.phase = FormPhase::Idle;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::descriptor::Attachment;
    use serde_json::json;

    const REPORT_FORM: FormSpec = FormSpec {
        fields: &[
            FormField::new("reportNumber", "Report No.", FieldKind::Text).required(),
            FormField::new("accidentDate", "Accident Date", FieldKind::Date),
            FormField::new("accidentDetails.location", "Location", FieldKind::Text),
            FormField::new("insuredPerson.name", "Insured Name", FieldKind::Text),
        ],
        attachment: None,
    };

    const VEHICLE_FORM: FormSpec = FormSpec {
        fields: &[
            FormField::new("plateNumber", "Vehicle Number", FieldKind::Text).required(),
            FormField::new("model", "Vehicle Name", FieldKind::Text),
            FormField::new("price", "Vehicle Price", FieldKind::Number),
        ],
        attachment: Some(Attachment {
            field: "image",
            label: "Vehicle Image",
        }),
    };

    const CHECK_FORM: FormSpec = FormSpec {
        fields: &[
            FormField::new("checkNumber", "Check Number", FieldKind::Text).required(),
            FormField::new("checkAmount", "Amount", FieldKind::Number).required(),
            FormField::new("isReturned", "Returned", FieldKind::Bool).with_default("false"),
        ],
        attachment: None,
    };

    #[test]
    fn open_initializes_defaults_and_close_discards() {
        let mut form = FormModalState::new(CHECK_FORM);
        assert!(!form.is_open());
        form.open_create();
        assert_eq!(form.value("isReturned"), "false");
        assert_eq!(form.value("checkNumber"), "");
        assert!(form.set_field("checkNumber", "1001"));
        assert!(form.close());
        assert!(!form.is_open());
        assert!(form.draft.is_empty());
        // reopening starts from scratch
        form.open_create();
        assert_eq!(form.value("checkNumber"), "");
    }

    #[test]
    fn draft_only_accepts_declared_fields() {
        let mut form = FormModalState::new(REPORT_FORM);
        assert!(!form.set_field("reportNumber", "R-1"), "closed form takes no input");
        form.open_create();
        assert!(!form.set_field("isAdmin", "true"));
        assert!(form.draft.keys().all(|k| REPORT_FORM.field(k).is_some()));
    }

    #[test]
    fn required_fields_block_submission() {
        let mut form = FormModalState::new(REPORT_FORM);
        form.open_create();
        let err = form.begin_submit().unwrap_err();
        assert_eq!(err, FormError::MissingRequired(vec!["Report No."]));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(form.error().unwrap().contains("Report No."));
    }

    #[test]
    fn json_body_nests_dotted_paths() {
        let mut form = FormModalState::new(REPORT_FORM);
        form.open_create();
        form.set_field("reportNumber", "A-17");
        form.set_field("accidentDetails.location", "Haifa");
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.mode, FormMode::Create);
        assert_eq!(
            submission.body,
            SubmitBody::Json(json!({
                "reportNumber": "A-17",
                "accidentDetails": { "location": "Haifa" }
            }))
        );
        assert!(form.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected() {
        let mut form = FormModalState::new(REPORT_FORM);
        form.open_create();
        form.set_field("reportNumber", "A-1");
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit().unwrap_err(), FormError::AlreadySubmitting);
        assert!(!form.close(), "cannot cancel mid-request");
    }

    #[test]
    fn create_success_resets_draft_error_keeps_it() {
        let mut form = FormModalState::new(CHECK_FORM);
        form.open_create();
        form.set_field("checkNumber", "55");
        form.set_field("checkAmount", "200");

        form.begin_submit().unwrap();
        form.finish_error("Check number already used");
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.error(), Some("Check number already used"));
        assert_eq!(form.value("checkNumber"), "55");

        form.begin_submit().unwrap();
        form.finish_success();
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.error(), None);
        assert_eq!(form.value("checkNumber"), "");
        assert_eq!(form.value("isReturned"), "false");
    }

    #[test]
    fn numbers_and_bools_are_typed_in_json() {
        let mut form = FormModalState::new(CHECK_FORM);
        form.open_create();
        form.set_field("checkNumber", "77");
        form.set_field("checkAmount", "1250.5");
        form.set_field("isReturned", "true");
        let body = form.begin_submit().unwrap().body;
        assert_eq!(
            body,
            SubmitBody::Json(json!({
                "checkNumber": "77",
                "checkAmount": 1250.5,
                "isReturned": true
            }))
        );

        let mut bad = FormModalState::new(CHECK_FORM);
        bad.open_create();
        bad.set_field("checkNumber", "78");
        bad.set_field("checkAmount", "twelve");
        assert_eq!(bad.begin_submit().unwrap_err(), FormError::InvalidNumber("Amount"));
        assert_eq!(bad.phase(), FormPhase::Idle);
    }

    #[test]
    fn multipart_carries_scalars_and_file_part() {
        let mut form = FormModalState::new(VEHICLE_FORM);
        form.open_create();
        form.set_field("plateNumber", "12-345-67");
        form.set_field("model", "Kia Picanto");
        assert!(form.stage_file(StagedFile { name: "old.png".into(), size: 10 }));
        assert!(form.stage_file(StagedFile { name: "car.jpg".into(), size: 2048 }));
        assert_eq!(form.staged().map(|f| f.name.as_str()), Some("car.jpg"));

        let submission = form.begin_submit().unwrap();
        assert_eq!(
            submission.body,
            SubmitBody::Multipart(MultipartBody {
                fields: vec![
                    ("plateNumber".into(), "12-345-67".into()),
                    ("model".into(), "Kia Picanto".into()),
                    ("price".into(), "".into()),
                ],
                file_field: Some("image"),
            })
        );

        form.finish_success();
        assert!(form.staged().is_none());
    }

    #[test]
    fn multipart_without_file_has_no_file_part() {
        let mut form = FormModalState::new(VEHICLE_FORM);
        form.open_create();
        form.set_field("plateNumber", "1");
        match form.begin_submit().unwrap().body {
            SubmitBody::Multipart(body) => assert_eq!(body.file_field, None),
            other => panic!("unexpected body {other:?}"),
        }
        let mut no_attachment = FormModalState::new(REPORT_FORM);
        no_attachment.open_create();
        assert!(!no_attachment.stage_file(StagedFile { name: "x".into(), size: 1 }));
    }

    #[test]
    fn edit_seed_round_trips_writable_fields() {
        let record = json!({
            "_id": "r1",
            "reportNumber": "M-9",
            "accidentDate": "2024-02-10T00:00:00.000Z",
            "accidentDetails": { "location": "Nablus", "weather": "rain" },
            "insuredPerson": { "name": "Yousef" },
            "createdAt": "2024-02-11T08:00:00Z"
        });
        let mut form = FormModalState::new(REPORT_FORM);
        form.open_edit("r1", &record);
        assert!(form.is_edit());
        assert_eq!(form.value("accidentDate"), "2024-02-10");

        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.mode, FormMode::Edit { id: "r1".into() });
        assert_eq!(
            submission.body,
            SubmitBody::Json(json!({
                "reportNumber": "M-9",
                "accidentDate": "2024-02-10",
                "accidentDetails": { "location": "Nablus" },
                "insuredPerson": { "name": "Yousef" }
            }))
        );

        form.finish_success();
        assert_eq!(form.value("reportNumber"), "M-9", "edit drafts survive success");
    }

    #[test]
    fn emptied_number_and_date_clear_on_edit() {
        const POLICY_FORM: FormSpec = FormSpec {
            fields: &[
                FormField::new("insuranceAmount", "Amount", FieldKind::Number),
                FormField::new("insuranceEndDate", "End Date", FieldKind::Date),
                FormField::new("insuranceType", "Type", FieldKind::Text),
            ],
            attachment: None,
        };
        let record = json!({
            "insuranceAmount": 2400,
            "insuranceEndDate": "2025-01-31",
            "insuranceType": "شامل"
        });
        let mut form = FormModalState::new(POLICY_FORM);
        form.open_edit("p1", &record);
        form.set_field("insuranceAmount", "");
        form.set_field("insuranceEndDate", " ");
        assert_eq!(
            form.begin_submit().unwrap().body,
            SubmitBody::Json(json!({
                "insuranceAmount": null,
                "insuranceEndDate": null,
                "insuranceType": "شامل"
            }))
        );

        // a create form simply leaves them out
        let mut form = FormModalState::new(POLICY_FORM);
        form.open_create();
        assert_eq!(form.begin_submit().unwrap().body, SubmitBody::Json(json!({})));
    }

    #[test]
    fn prefill_ignores_unknown_fields() {
        let mut form = FormModalState::new(VEHICLE_FORM);
        form.open_create();
        let landed = form.apply_prefill(&[
            ("model", "Hyundai".to_string()),
            ("color", "white".to_string()),
        ]);
        assert_eq!(landed, 1);
        assert_eq!(form.value("model"), "Hyundai");
    }

    #[test]
    fn insert_path_replaces_scalars_on_the_way() {
        let mut root = Map::new();
        root.insert("a".into(), json!(1));
        insert_path(&mut root, "a.b", json!("x"));
        assert_eq!(Value::Object(root), json!({"a": {"b": "x"}}));
    }
}
