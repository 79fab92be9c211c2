//! UpdateMedia command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::{now, MediaId};

/// Update a media record's title or description.
#[derive(Debug, Deserialize)]
pub struct UpdateMedia {
    /// The media record to update
    pub id: MediaId,
    /// New display title, if changing
    #[serde(default)]
    pub title: Option<String>,
    /// New description, if changing
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateMedia {
    /// Create a new UpdateMedia command
    pub fn new(id: MediaId) -> Self {
        Self {
            id,
            title: None,
            description: None,
        }
    }

    /// Set a new display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for UpdateMedia {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut media = ctx.read_media(&self.id).await?;

        if let Some(title) = &self.title {
            media.title = title.clone();
        }
        if let Some(description) = &self.description {
            media.description = description.clone();
        }
        media.modified = now();
        media.validate()?;

        ctx.write_media(&media).await?;

        Ok(serde_json::to_value(
            media.into_public(&ctx.config().upload),
        )?)
    }
}
