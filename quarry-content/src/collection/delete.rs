//! DeleteCollection command

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::collection::revoke_collection_group;
use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::hooks::{self, HookAction, HookResource};
use crate::ops::{async_trait, Execute};
use crate::types::CollectionId;

/// Delete a collection, its entities, and its permission group.
///
/// The cascades run after the primary delete and are best-effort: a failure
/// leaves orphans behind rather than blocking or rolling back.
#[derive(Debug, Deserialize)]
pub struct DeleteCollection {
    /// The collection to delete
    pub id: CollectionId,
}

impl DeleteCollection {
    /// Create a new DeleteCollection command
    pub fn new(id: CollectionId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for DeleteCollection {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let collection = ctx.read_collection(&self.id).await?;

        ctx.delete_collection_file(&self.id).await?;

        // cascade: owned entities go with their collection
        match ctx.read_collection_entities(&self.id).await {
            Ok(entities) => {
                for entity in entities {
                    if let Err(error) = ctx.delete_entity_file(&entity.id).await {
                        warn!(entity = %entity.id, %error, "failed to delete entity of removed collection");
                    }
                }
            }
            Err(error) => {
                warn!(collection = %self.id, %error, "could not enumerate entities of removed collection");
            }
        }

        revoke_collection_group(ctx, &self.id).await;

        let payload = serde_json::to_value(&collection)?;
        hooks::dispatch(
            collection.delete_hook.as_deref(),
            HookResource::Collection,
            HookAction::Delete,
            payload.clone(),
            ctx.config().hooks.timeout_secs,
        );

        Ok(payload)
    }
}
