//! InitStore command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::Language;

/// Initialize a content store: create the directory tree and seed the
/// default language from configuration.
#[derive(Debug, Default, Deserialize)]
pub struct InitStore {
    /// Display title for the seeded default language; defaults to its locale
    #[serde(default)]
    pub language_title: Option<String>,
}

impl InitStore {
    /// Create a new InitStore command
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display title for the seeded default language
    pub fn with_language_title(mut self, title: impl Into<String>) -> Self {
        self.language_title = Some(title.into());
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for InitStore {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        if ctx.is_initialized() {
            return Err(ContentError::AlreadyInitialized {
                path: ctx.root().to_path_buf(),
            });
        }

        ctx.create_directories().await?;

        let locale = ctx.config().content.default_locale.clone();
        let title = self.language_title.clone().unwrap_or_else(|| locale.clone());
        let language = Language::new(locale, title);
        language.validate()?;
        ctx.write_language(&language).await?;

        Ok(serde_json::to_value(&language)?)
    }
}
