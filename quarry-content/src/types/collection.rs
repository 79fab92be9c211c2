//! Collection type: an operator-defined content type

use quarry_fields::{ensure_unique_keys, is_identifier, Field};
use serde::{Deserialize, Serialize};
use url::Url;

use super::ids::CollectionId;
use super::now;
use crate::error::{ContentError, Result};

/// An operator-defined content type: an ordered list of typed fields plus
/// identity and lifecycle webhook URLs. A collection owns its field list by
/// value — fields are never shared between schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    /// Identifier-safe, globally unique
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_hook: Option<String>,
    pub created: i64,
    pub modified: i64,
}

impl Collection {
    /// Create a new collection with the given title, name and fields
    pub fn new(title: impl Into<String>, name: impl Into<String>, fields: Vec<Field>) -> Self {
        let timestamp = now();
        Self {
            id: CollectionId::new(),
            title: title.into(),
            name: name.into(),
            fields,
            create_hook: None,
            update_hook: None,
            delete_hook: None,
            created: timestamp,
            modified: timestamp,
        }
    }

    /// Look up a schema field by key
    pub fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Validate the schema definition.
    ///
    /// Per-field problems and duplicate keys surface as a single error
    /// each, unlike entity-data errors, which accumulate into a per-field
    /// map.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(ContentError::missing_field("title"));
        }
        if !is_identifier(&self.name) {
            return Err(ContentError::invalid_value(
                "name",
                "must contain only letters, digits and underscores",
            ));
        }
        if self.fields.is_empty() {
            return Err(ContentError::missing_field("fields"));
        }
        for field in &self.fields {
            field.validate()?;
        }
        ensure_unique_keys(&self.fields)?;

        for (key, hook) in [
            ("create_hook", &self.create_hook),
            ("update_hook", &self.update_hook),
            ("delete_hook", &self.delete_hook),
        ] {
            if let Some(url) = hook {
                if Url::parse(url).is_err() {
                    return Err(ContentError::invalid_value(key, "must be a valid URL"));
                }
            }
        }

        Ok(())
    }
}
