//! Static description of one entity type: where it lives on the backend,
//! how its list is wrapped, how rows are built, and which fields the
//! create/edit form writes.

use super::envelope::ListShape;
use super::error::ApiError;
use super::list_state::ListItem;
use super::normalizer::{normalize_all, Column, NormalizeOptions};
use super::path::PathTemplate;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Number,
    Bool,
    Select(&'static [&'static str]),
}

/// One writable field. `path` is the backend field name (dotted when nested).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub path: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Draft value on a fresh create form
    pub default: &'static str,
}

impl FormField {
    pub const fn new(path: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            path,
            label,
            kind,
            required: false,
            default: "",
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        Self { default, ..self }
    }
}

/// Single binary attachment sent as a multipart part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub field: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSpec {
    pub fields: &'static [FormField],
    pub attachment: Option<Attachment>,
}

impl FormSpec {
    pub fn field(&self, path: &str) -> Option<&'static FormField> {
        self.fields.iter().find(|f| f.path == path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub add_label: &'static str,
    pub list: PathTemplate,
    pub list_shape: ListShape,
    pub id_path: &'static str,
    pub columns: &'static [Column],
    pub create: Option<PathTemplate>,
    pub update: Option<PathTemplate>,
    pub delete: Option<PathTemplate>,
    pub form: FormSpec,
    pub delete_prompt: &'static str,
}

fn scoped<'a>(scope: &[&'a str], id: &'a str) -> Vec<&'a str> {
    let mut params = scope.to_vec();
    params.push(id);
    params
}

impl EntityDescriptor {
    pub fn list_path(&self, scope: &[&str]) -> Result<String, ApiError> {
        self.list.fill(scope)
    }

    pub fn create_path(&self, scope: &[&str]) -> Result<String, ApiError> {
        self.create
            .ok_or_else(|| self.unsupported("create"))?
            .fill(scope)
    }

    pub fn update_path(&self, scope: &[&str], id: &str) -> Result<String, ApiError> {
        self.update
            .ok_or_else(|| self.unsupported("update"))?
            .fill(&scoped(scope, id))
    }

    pub fn delete_path(&self, scope: &[&str], id: &str) -> Result<String, ApiError> {
        self.delete
            .ok_or_else(|| self.unsupported("delete"))?
            .fill(&scoped(scope, id))
    }

    pub fn can_create(&self) -> bool {
        self.create.is_some()
    }

    pub fn can_edit(&self) -> bool {
        self.update.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.delete.is_some()
    }

    /// Normalize fetched records, keeping each source document for edit flows.
    pub fn to_items(&self, records: Vec<Value>, opts: &NormalizeOptions) -> Vec<ListItem> {
        let rows = normalize_all(&records, self.id_path, self.columns, opts);
        rows.into_iter()
            .zip(records)
            .map(|(row, record)| ListItem { row, record })
            .collect()
    }

    fn unsupported(&self, op: &str) -> ApiError {
        ApiError::InvalidRequest(format!("{} does not support {op}", self.key))
    }
}
