//! UpdateLanguage command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::language::rename_locale_data;
use crate::ops::{async_trait, Execute};
use crate::types::{now, LanguageId};

/// Update a language. Renaming the locale renames the corresponding data
/// key across all entities.
#[derive(Debug, Deserialize)]
pub struct UpdateLanguage {
    /// The language to update
    pub id: LanguageId,
    /// New locale code, if changing
    #[serde(default)]
    pub locale: Option<String>,
    /// New display title, if changing
    #[serde(default)]
    pub title: Option<String>,
}

impl UpdateLanguage {
    /// Create a new UpdateLanguage command
    pub fn new(id: LanguageId) -> Self {
        Self {
            id,
            locale: None,
            title: None,
        }
    }

    /// Rename the locale code
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set a new display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for UpdateLanguage {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut language = ctx.read_language(&self.id).await?;
        let old_locale = language.locale.clone();

        if let Some(locale) = &self.locale {
            language.locale = locale.clone();
        }
        if let Some(title) = &self.title {
            language.title = title.clone();
        }
        language.modified = now();
        language.validate()?;

        if language.locale != old_locale {
            let existing = ctx.read_all_languages().await?;
            if existing
                .iter()
                .any(|l| l.locale == language.locale && l.id != language.id)
            {
                return Err(ContentError::conflict("language", &language.locale));
            }
        }

        ctx.write_language(&language).await?;

        if language.locale != old_locale {
            rename_locale_data(ctx, &old_locale, &language.locale).await;
        }

        Ok(serde_json::to_value(&language)?)
    }
}
