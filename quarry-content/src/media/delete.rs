//! DeleteMedia command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::MediaId;

/// Delete a media record. Entities still referencing the id keep it; the
/// dangling reference simply stops resolving during enrichment.
#[derive(Debug, Deserialize)]
pub struct DeleteMedia {
    /// The media record to delete
    pub id: MediaId,
}

impl DeleteMedia {
    /// Create a new DeleteMedia command
    pub fn new(id: MediaId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for DeleteMedia {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let media = ctx.read_media(&self.id).await?;
        ctx.delete_media_file(&self.id).await?;
        Ok(serde_json::to_value(&media)?)
    }
}
