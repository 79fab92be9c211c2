//! Field definitions for collection schemas.
//!
//! A collection schema is an ordered list of [`Field`]s. Each field declares
//! a [`FieldType`] that picks its runtime semantics: how raw values are cast,
//! when a value counts as empty, and what shape its `meta` configuration
//! takes.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldError, Result};
use crate::meta::FieldMeta;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("static pattern"));

/// Upper bound for field keys and labels.
const MAX_NAME_LEN: usize = 255;

/// Check whether a string is identifier-safe (letters, digits, underscore).
pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER_RE.is_match(value)
}

/// The closed set of supported field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Plain,
    Switch,
    Checklist,
    Select,
    Date,
    Editor,
    Media,
    Relation,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Switch => "switch",
            Self::Checklist => "checklist",
            Self::Select => "select",
            Self::Date => "date",
            Self::Editor => "editor",
            Self::Media => "media",
            Self::Relation => "relation",
        };
        f.write_str(name)
    }
}

/// A single typed attribute in a collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Identifier-safe key, unique within one schema
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub multilingual: bool,
    /// Default value surfaced to editing clients; not applied during
    /// normalization.
    #[serde(default)]
    pub default: Value,
    /// Raw type-specific configuration; decoded on demand via [`Field::meta`].
    #[serde(default)]
    pub meta: Value,
}

impl Field {
    /// Create a new field with the given key, type and label
    pub fn new(key: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field_type,
            label: label.into(),
            required: false,
            unique: false,
            multilingual: false,
            default: Value::Null,
            meta: Value::Null,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field value as unique within its collection
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the field as translated per locale
    pub fn multilingual(mut self) -> Self {
        self.multilingual = true;
        self
    }

    /// Set the raw meta payload
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    /// Set the client-facing default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    /// Decode this field's raw meta payload into its typed form.
    pub fn meta(&self) -> Result<FieldMeta> {
        FieldMeta::decode(self.field_type, &self.meta)
    }

    /// Validate the field definition: key format, label length, and meta
    /// shape. Content values are never validated here — casting is total.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() || self.key.len() > MAX_NAME_LEN || !is_identifier(&self.key) {
            return Err(FieldError::InvalidKey {
                key: self.key.clone(),
            });
        }
        if self.label.is_empty() || self.label.len() > MAX_NAME_LEN {
            return Err(FieldError::InvalidLabel {
                key: self.key.clone(),
            });
        }
        self.meta()?.validate()
    }
}

/// Ensure field keys are pairwise unique within one schema.
///
/// The first duplicate found produces the error — schema validation reports
/// exactly one message per offending construct, not one per field.
pub fn ensure_unique_keys(fields: &[Field]) -> Result<()> {
    let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
    for field in fields {
        if seen.contains(&field.key.as_str()) {
            return Err(FieldError::DuplicateKey {
                key: field.key.clone(),
            });
        }
        seen.push(&field.key);
    }
    Ok(())
}
