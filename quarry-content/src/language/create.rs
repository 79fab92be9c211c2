//! AddLanguage command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::language::clone_locale_data;
use crate::ops::{async_trait, Execute};
use crate::types::Language;

/// Register a new active locale.
///
/// Every entity's data is cloned from the longest-standing existing locale
/// into the new one, so fresh locales start from translated-from content
/// instead of empty groups.
#[derive(Debug, Deserialize)]
pub struct AddLanguage {
    /// Identifier-safe locale code, globally unique
    pub locale: String,
    /// Display title
    pub title: String,
}

impl AddLanguage {
    /// Create a new AddLanguage command
    pub fn new(locale: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for AddLanguage {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let language = Language::new(&self.locale, &self.title);
        language.validate()?;

        let existing = ctx.read_all_languages().await?;
        if existing.iter().any(|l| l.locale == language.locale) {
            return Err(ContentError::conflict("language", &language.locale));
        }

        ctx.write_language(&language).await?;

        // seed the new locale from the longest-standing one
        if let Some(source) = existing.first() {
            clone_locale_data(ctx, &source.locale, &language.locale).await;
        }

        Ok(serde_json::to_value(&language)?)
    }
}
