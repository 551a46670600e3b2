//! Row Normalizer
//!
//! Flattens one backend document (arbitrary nesting, any field possibly
//! absent or `null`) into a display row through a static column table.
//! Lookups never fail: a missing, `null` or mistyped path becomes `"N/A"`.

use super::format::{
    coerce_number, format_currency, format_date, format_plain_number, iso_date, value_text,
    NOT_AVAILABLE,
};
use serde_json::Value;
use std::fmt;

/// How one output cell is read from a record. Paths are dot-separated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRule {
    /// Non-empty string or number
    Text(&'static str),
    /// Date rendered with the configured display pattern
    Date(&'static str),
    /// Date rendered as `YYYY-MM-DD`
    IsoDate(&'static str),
    /// Currency amount with the configured symbol
    Money(&'static str),
    /// Raw numeric cell
    Number(&'static str),
    /// `"<first> <last>"` when the first name is present
    FullName {
        first: &'static str,
        last: &'static str,
    },
    /// Trailing characters of an identifier
    IdSuffix {
        path: &'static str,
        len: usize,
        uppercase: bool,
    },
    Bool {
        path: &'static str,
        yes: &'static str,
        no: &'static str,
    },
    /// Stored remaining amount, or `total - paid` when it is zero or absent
    Remaining {
        total: &'static str,
        paid: &'static str,
        remaining: &'static str,
    },
    /// First rule that yields a value
    Fallback(&'static FieldRule, &'static FieldRule),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub field: &'static str,
    pub header: &'static str,
    pub rule: FieldRule,
    /// Render the cell as a link (attachment URLs)
    pub link: bool,
}

impl Column {
    pub const fn new(field: &'static str, header: &'static str, rule: FieldRule) -> Self {
        Self {
            field,
            header,
            rule,
            link: false,
        }
    }

    pub const fn as_link(self) -> Self {
        Self { link: true, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn na() -> Self {
        Cell::Text(NOT_AVAILABLE.to_string())
    }

    pub fn is_na(&self) -> bool {
        matches!(self, Cell::Text(t) if t == NOT_AVAILABLE)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(t) => f.write_str(t),
            Cell::Number(n) => f.write_str(&format_plain_number(*n)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub date_format: String,
    pub currency_symbol: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
            currency_symbol: "₪".to_string(),
        }
    }
}

/// Flat, display-ready projection of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    cells: Vec<(&'static str, Cell)>,
}

impl Row {
    pub fn new(id: impl Into<String>, cells: Vec<(&'static str, Cell)>) -> Self {
        Self {
            id: id.into(),
            cells,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Cell> {
        self.cells.iter().find(|(f, _)| *f == field).map(|(_, c)| c)
    }

    /// Display text of a cell; unknown fields read as `"N/A"`.
    pub fn text(&self, field: &str) -> String {
        self.get(field)
            .map(Cell::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'static str, &Cell)> {
        self.cells.iter().map(|(f, c)| (*f, c))
    }
}

/// Walk a dotted path. `null` counts as missing.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

pub fn text_at(record: &Value, path: &str) -> Option<String> {
    lookup(record, path).and_then(value_text)
}

fn evaluate(record: &Value, rule: &FieldRule, opts: &NormalizeOptions) -> Option<Cell> {
    match *rule {
        FieldRule::Text(path) => text_at(record, path).map(Cell::Text),
        FieldRule::Date(path) => lookup(record, path)
            .and_then(Value::as_str)
            .and_then(|s| format_date(s, &opts.date_format))
            .map(Cell::Text),
        FieldRule::IsoDate(path) => lookup(record, path)
            .and_then(Value::as_str)
            .and_then(iso_date)
            .map(Cell::Text),
        FieldRule::Money(path) => lookup(record, path)
            .and_then(|v| format_currency(v, &opts.currency_symbol))
            .map(Cell::Text),
        FieldRule::Number(path) => lookup(record, path)
            .and_then(coerce_number)
            .map(Cell::Number),
        FieldRule::FullName { first, last } => {
            let first = text_at(record, first)?;
            let last = text_at(record, last).unwrap_or_default();
            Some(Cell::Text(format!("{first} {last}").trim_end().to_string()))
        }
        FieldRule::IdSuffix {
            path,
            len,
            uppercase,
        } => {
            let id = text_at(record, path)?;
            let chars: Vec<char> = id.chars().collect();
            let suffix: String = chars[chars.len().saturating_sub(len)..].iter().collect();
            Some(Cell::Text(if uppercase {
                suffix.to_uppercase()
            } else {
                suffix
            }))
        }
        FieldRule::Bool { path, yes, no } => {
            let flag = match lookup(record, path)? {
                Value::Bool(b) => *b,
                Value::String(s) if s == "true" => true,
                Value::String(s) if s == "false" => false,
                _ => return None,
            };
            Some(Cell::Text(if flag { yes } else { no }.to_string()))
        }
        FieldRule::Remaining {
            total,
            paid,
            remaining,
        } => {
            let stored = lookup(record, remaining)
                .and_then(coerce_number)
                .filter(|n| *n != 0.0);
            if let Some(n) = stored {
                return Some(Cell::Number(n));
            }
            let total = lookup(record, total).and_then(coerce_number)?;
            let paid = lookup(record, paid).and_then(coerce_number).unwrap_or(0.0);
            Some(Cell::Number(total - paid))
        }
        FieldRule::Fallback(primary, secondary) => {
            evaluate(record, primary, opts).or_else(|| evaluate(record, secondary, opts))
        }
    }
}

/// Normalize one record. The row id is empty when the id path is missing.
pub fn normalize(
    record: &Value,
    id_path: &str,
    columns: &[Column],
    opts: &NormalizeOptions,
) -> Row {
    let cells = columns
        .iter()
        .map(|c| (c.field, evaluate(record, &c.rule, opts).unwrap_or_else(Cell::na)))
        .collect();
    Row {
        id: text_at(record, id_path).unwrap_or_default(),
        cells,
    }
}

/// Normalize a fetched list; records without an id are keyed by their
/// 1-based position.
pub fn normalize_all(
    records: &[Value],
    id_path: &str,
    columns: &[Column],
    opts: &NormalizeOptions,
) -> Vec<Row> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut row = normalize(record, id_path, columns, opts);
            if row.id.is_empty() {
                row.id = (index + 1).to_string();
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAME: FieldRule = FieldRule::FullName {
        first: "insuredId.first_name",
        last: "insuredId.last_name",
    };

    const COLUMNS: &[Column] = &[
        Column::new("location", "Location", FieldRule::Text("accidentDetails.location")),
        Column::new("date", "Date", FieldRule::Date("accidentDate")),
        Column::new("amount", "Amount", FieldRule::Money("amount")),
        Column::new(
            "insured",
            "Insured",
            FieldRule::Fallback(&FieldRule::Text("insuredPerson.name"), &NAME),
        ),
    ];

    #[test]
    fn missing_paths_become_na() {
        let opts = NormalizeOptions::default();
        let row = normalize(&json!({}), "_id", COLUMNS, &opts);
        assert_eq!(row.id, "");
        for (_, cell) in row.cells() {
            assert!(cell.is_na());
        }
    }

    #[test]
    fn null_and_mistyped_values_become_na() {
        let opts = NormalizeOptions::default();
        let record = json!({
            "_id": "x1",
            "accidentDetails": null,
            "accidentDate": 12345,
            "amount": "twelve",
            "insuredPerson": { "name": ["not", "a", "string"] }
        });
        let row = normalize(&record, "_id", COLUMNS, &opts);
        assert_eq!(row.id, "x1");
        assert_eq!(row.text("location"), "N/A");
        assert_eq!(row.text("date"), "N/A");
        assert_eq!(row.text("amount"), "N/A");
        assert_eq!(row.text("insured"), "N/A");
    }

    #[test]
    fn path_through_scalar_is_missing() {
        let record = json!({ "accidentDetails": "Haifa" });
        assert_eq!(lookup(&record, "accidentDetails.location"), None);
        assert_eq!(lookup(&json!({"a": [{"b": 1}]}), "a.0.b"), Some(&json!(1)));
    }

    #[test]
    fn composite_name_falls_back_in_order() {
        let opts = NormalizeOptions::default();
        let primary = json!({ "insuredPerson": { "name": "Sami" } });
        assert_eq!(normalize(&primary, "_id", COLUMNS, &opts).text("insured"), "Sami");

        let composite = json!({ "insuredId": { "first_name": "Lina", "last_name": "Haddad" } });
        assert_eq!(
            normalize(&composite, "_id", COLUMNS, &opts).text("insured"),
            "Lina Haddad"
        );

        let first_only = json!({ "insuredId": { "first_name": "Lina" } });
        assert_eq!(normalize(&first_only, "_id", COLUMNS, &opts).text("insured"), "Lina");

        let last_only = json!({ "insuredId": { "last_name": "Haddad" } });
        assert_eq!(normalize(&last_only, "_id", COLUMNS, &opts).text("insured"), "N/A");
    }

    #[test]
    fn idempotent() {
        let opts = NormalizeOptions::default();
        let record = json!({
            "_id": "r7",
            "accidentDetails": { "location": "Jenin" },
            "accidentDate": "2024-06-01T09:00:00Z",
            "amount": 1500
        });
        let a = normalize(&record, "_id", COLUMNS, &opts);
        let b = normalize(&record, "_id", COLUMNS, &opts);
        assert_eq!(a, b);
        assert_eq!(a.text("date"), "01/06/2024");
        assert_eq!(a.text("amount"), "₪1,500.00");
    }

    #[test]
    fn id_suffix_and_bool_rules() {
        let opts = NormalizeOptions::default();
        let cols = [
            Column::new(
                "short",
                "Id",
                FieldRule::IdSuffix {
                    path: "_id",
                    len: 6,
                    uppercase: true,
                },
            ),
            Column::new(
                "returned",
                "Returned",
                FieldRule::Bool {
                    path: "isReturned",
                    yes: "Yes",
                    no: "No",
                },
            ),
        ];
        let record = json!({"_id": "65fa0c1d9e2b4a", "isReturned": "true"});
        let row = normalize(&record, "_id", &cols, &opts);
        assert_eq!(row.text("short"), "9E2B4A");
        assert_eq!(row.text("returned"), "Yes");

        let short_id = normalize(&json!({"_id": "ab", "isReturned": false}), "_id", &cols, &opts);
        assert_eq!(short_id.text("short"), "AB");
        assert_eq!(short_id.text("returned"), "No");

        let odd = normalize(&json!({"isReturned": 1}), "_id", &cols, &opts);
        assert_eq!(odd.text("returned"), "N/A");
    }

    #[test]
    fn remaining_debt_prefers_stored_value() {
        let opts = NormalizeOptions::default();
        let cols = [Column::new(
            "remainingDebt",
            "Remaining",
            FieldRule::Remaining {
                total: "insuranceAmount",
                paid: "paidAmount",
                remaining: "remainingDebt",
            },
        )];
        let remaining = |record: Value| {
            normalize(&record, "_id", &cols, &opts)
                .get("remainingDebt")
                .cloned()
        };
        let stored = json!({"insuranceAmount": 3000, "paidAmount": 1000, "remainingDebt": 1500});
        assert_eq!(remaining(stored), Some(Cell::Number(1500.0)));

        let derived = json!({"insuranceAmount": 3000, "paidAmount": 1000, "remainingDebt": 0});
        assert_eq!(remaining(derived), Some(Cell::Number(2000.0)));

        let unpaid = json!({"insuranceAmount": "3000"});
        assert_eq!(remaining(unpaid), Some(Cell::Number(3000.0)));

        assert!(normalize(&json!({}), "_id", &cols, &opts).get("remainingDebt").unwrap().is_na());
    }

    #[test]
    fn list_ids_fall_back_to_position() {
        let opts = NormalizeOptions::default();
        let rows = normalize_all(&[json!({"_id": "a"}), json!({})], "_id", COLUMNS, &opts);
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[1].id, "2");
    }
}
