//! Language type: an active content-translation dimension

use quarry_fields::is_identifier;
use serde::{Deserialize, Serialize};

use super::ids::LanguageId;
use super::now;
use crate::error::{ContentError, Result};

/// An active locale. Every entity carries one data group per stored
/// language; language lifecycle changes cascade into entity data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    /// Identifier-safe locale code, globally unique
    pub locale: String,
    pub title: String,
    pub created: i64,
    pub modified: i64,
}

impl Language {
    /// Create a new language with the given locale code and title
    pub fn new(locale: impl Into<String>, title: impl Into<String>) -> Self {
        let timestamp = now();
        Self {
            id: LanguageId::new(),
            locale: locale.into(),
            title: title.into(),
            created: timestamp,
            modified: timestamp,
        }
    }

    /// Validate locale format and title presence
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.locale) {
            return Err(ContentError::invalid_value(
                "locale",
                "must contain only letters, digits and underscores",
            ));
        }
        if self.title.is_empty() {
            return Err(ContentError::missing_field("title"));
        }
        Ok(())
    }
}
