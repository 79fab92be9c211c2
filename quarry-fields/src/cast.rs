//! Runtime value casting and emptiness rules.
//!
//! Casting is total: whatever a client sends (or whatever shape legacy
//! content has drifted into), every field type maps it onto a canonical
//! value without erroring. Emptiness is defined on the casted value and
//! feeds only the `required` check.

use serde_json::{json, Value};
use ulid::Ulid;

use crate::types::{Field, FieldType};

impl Field {
    /// Cast a raw value to the canonical shape for this field's type.
    pub fn cast_value(&self, value: &Value) -> Value {
        match self.field_type {
            FieldType::Plain | FieldType::Select | FieldType::Editor => {
                Value::String(value.as_str().unwrap_or_default().to_string())
            }
            FieldType::Switch => Value::Bool(value.as_bool().unwrap_or(false)),
            FieldType::Date => cast_date(value),
            FieldType::Checklist => Value::Array(
                string_list(value)
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            ),
            FieldType::Media | FieldType::Relation => Value::Array(
                id_list(value)
                    .into_iter()
                    .map(|id| Value::String(id.to_string()))
                    .collect(),
            ),
        }
    }

    /// Whether the casted value counts as empty.
    ///
    /// Used solely to evaluate the `required` constraint: a required field
    /// can be present with an empty casted value, and that must still fail
    /// validation.
    pub fn is_empty_value(&self, value: &Value) -> bool {
        let casted = self.cast_value(value);
        match self.field_type {
            FieldType::Plain | FieldType::Select | FieldType::Editor => {
                casted.as_str().map(str::is_empty).unwrap_or(true)
            }
            FieldType::Date => casted.is_null() || casted.as_i64() == Some(0),
            FieldType::Checklist | FieldType::Media | FieldType::Relation => {
                casted.as_array().map(Vec::is_empty).unwrap_or(true)
            }
            // a switch always casts to a bool, false included
            FieldType::Switch => false,
        }
    }
}

/// Cast date input to an integer epoch, or null.
///
/// Non-empty strings parse as an integer (falling back to 0, which the
/// emptiness rule treats the same as null); zero numerics stay null.
fn cast_date(value: &Value) -> Value {
    match value {
        Value::String(s) if !s.is_empty() => json!(s.parse::<i64>().unwrap_or(0)),
        Value::Number(n) => {
            let epoch = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0);
            if epoch != 0 {
                json!(epoch)
            } else {
                Value::Null
            }
        }
        _ => Value::Null,
    }
}

/// Extract a de-duplicated list of object identifiers from a raw list
/// value, dropping anything that doesn't parse as one.
pub fn id_list(value: &Value) -> Vec<Ulid> {
    let mut ids = Vec::new();
    if let Value::Array(items) = value {
        for item in items {
            if let Some(raw) = item.as_str() {
                if let Ok(id) = Ulid::from_string(raw) {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
    }
    ids
}

/// Extract the non-empty strings from a raw list value.
pub fn string_list(value: &Value) -> Vec<String> {
    let mut items = Vec::new();
    if let Value::Array(values) = value {
        for value in values {
            if let Some(s) = value.as_str() {
                if !s.is_empty() {
                    items.push(s.to_string());
                }
            }
        }
    }
    items
}
