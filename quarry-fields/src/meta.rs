//! Type-specific field configuration.
//!
//! Each configurable field type owns a meta struct; [`FieldMeta`] gathers
//! them into one tagged union selected by the field's declared type.
//! Decoding runs at schema-save time and is the only fallible step in the
//! registry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

use crate::error::{FieldError, Result};
use crate::types::FieldType;

/// One selectable option of a checklist or select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub name: String,
    pub value: String,
}

impl FieldOption {
    /// Create a new option
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Granularity of a date field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMode {
    Date,
    #[default]
    Datetime,
}

/// Editing surface of an editor field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Simple,
    Rich,
}

/// Meta for checklist fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistMeta {
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

/// Meta for select fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectMeta {
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

/// Meta for date fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateMeta {
    #[serde(default)]
    pub mode: DateMode,
}

/// Meta for editor fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorMeta {
    #[serde(default)]
    pub mode: EditorMode,
}

/// Meta for media fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMeta {
    /// Maximum number of attached media items; 0 means unbounded
    #[serde(default)]
    pub max: u8,
}

/// Meta for relation fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMeta {
    /// Maximum number of related entities; 0 means unbounded
    #[serde(default)]
    pub max: u8,
    /// Target collection — a relation field must name the collection its
    /// ids point into.
    #[serde(default)]
    pub collection_id: Option<Ulid>,
}

/// Typed meta configuration, one variant per field type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMeta {
    Plain,
    Switch,
    Checklist(ChecklistMeta),
    Select(SelectMeta),
    Date(DateMeta),
    Editor(EditorMeta),
    Media(MediaMeta),
    Relation(RelationMeta),
}

impl FieldMeta {
    /// Decode a raw meta payload into the typed shape for `field_type`.
    ///
    /// A null payload decodes to the type's defaults; anything else must
    /// deserialize into the type's meta struct.
    pub fn decode(field_type: FieldType, raw: &Value) -> Result<Self> {
        match field_type {
            FieldType::Plain => {
                ensure_configless(field_type, raw)?;
                Ok(Self::Plain)
            }
            FieldType::Switch => {
                ensure_configless(field_type, raw)?;
                Ok(Self::Switch)
            }
            FieldType::Checklist => Ok(Self::Checklist(decode_into(field_type, raw)?)),
            FieldType::Select => Ok(Self::Select(decode_into(field_type, raw)?)),
            FieldType::Date => Ok(Self::Date(decode_into(field_type, raw)?)),
            FieldType::Editor => Ok(Self::Editor(decode_into(field_type, raw)?)),
            FieldType::Media => Ok(Self::Media(decode_into(field_type, raw)?)),
            FieldType::Relation => Ok(Self::Relation(decode_into(field_type, raw)?)),
        }
    }

    /// Check the decoded meta's own invariants.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Checklist(meta) => validate_options(FieldType::Checklist, &meta.options),
            Self::Select(meta) => validate_options(FieldType::Select, &meta.options),
            Self::Relation(meta) if meta.collection_id.is_none() => Err(FieldError::meta_invalid(
                FieldType::Relation,
                "collection_id is required",
            )),
            _ => Ok(()),
        }
    }

    /// The `max` bound for media/relation meta; 0 for every other type.
    pub fn max(&self) -> u8 {
        match self {
            Self::Media(meta) => meta.max,
            Self::Relation(meta) => meta.max,
            _ => 0,
        }
    }
}

fn decode_into<T: DeserializeOwned + Default>(field_type: FieldType, raw: &Value) -> Result<T> {
    if raw.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(raw.clone())
        .map_err(|e| FieldError::meta_decode(field_type, e.to_string()))
}

/// plain/switch carry no configuration; only null or an (ignored) object
/// payload is accepted.
fn ensure_configless(field_type: FieldType, raw: &Value) -> Result<()> {
    if raw.is_null() || raw.is_object() {
        Ok(())
    } else {
        Err(FieldError::meta_decode(
            field_type,
            "expected an object or null",
        ))
    }
}

fn validate_options(field_type: FieldType, options: &[FieldOption]) -> Result<()> {
    if options.is_empty() {
        return Err(FieldError::meta_invalid(
            field_type,
            "options cannot be empty",
        ));
    }
    for option in options {
        if option.name.is_empty() || option.value.is_empty() {
            return Err(FieldError::meta_invalid(
                field_type,
                "option name and value are required",
            ));
        }
    }
    Ok(())
}
