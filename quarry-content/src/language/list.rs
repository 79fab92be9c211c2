//! ListLanguages command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};

/// List all active languages, longest-standing first.
#[derive(Debug, Default, Deserialize)]
pub struct ListLanguages {}

impl ListLanguages {
    /// Create a new ListLanguages command
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for ListLanguages {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let languages = ctx.read_all_languages().await?;
        Ok(serde_json::to_value(&languages)?)
    }
}
