//! DeleteLanguage command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::language::remove_locale_data;
use crate::ops::{async_trait, Execute};
use crate::types::LanguageId;

/// Deactivate a locale, removing its data group from every entity.
#[derive(Debug, Deserialize)]
pub struct DeleteLanguage {
    /// The language to delete
    pub id: LanguageId,
}

impl DeleteLanguage {
    /// Create a new DeleteLanguage command
    pub fn new(id: LanguageId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for DeleteLanguage {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let language = ctx.read_language(&self.id).await?;

        ctx.delete_language_file(&self.id).await?;
        remove_locale_data(ctx, &language.locale).await;

        Ok(serde_json::to_value(&language)?)
    }
}
