//! DeleteEntity command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::entity::load_scoped;
use crate::error::{ContentError, Result};
use crate::hooks::{self, HookAction, HookResource};
use crate::ops::{async_trait, Execute};
use crate::types::EntityId;

/// Delete a content record.
#[derive(Debug, Deserialize)]
pub struct DeleteEntity {
    /// Owning collection, by id or name
    pub collection: String,
    /// The entity to delete
    pub id: EntityId,
}

impl DeleteEntity {
    /// Create a new DeleteEntity command
    pub fn new(collection: impl Into<String>, id: EntityId) -> Self {
        Self {
            collection: collection.into(),
            id,
        }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for DeleteEntity {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let (collection, entity) = load_scoped(ctx, &self.collection, &self.id).await?;

        ctx.delete_entity_file(&self.id).await?;

        let payload = serde_json::to_value(&entity)?;
        hooks::dispatch(
            collection.delete_hook.as_deref(),
            HookResource::Entity,
            HookAction::Delete,
            payload.clone(),
            ctx.config().hooks.timeout_secs,
        );

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CreateCollection;
    use crate::entity::CreateEntity;
    use crate::store::InitStore;
    use quarry_config::QuarryConfig;
    use quarry_fields::{Field, FieldType};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_delete_entity() {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        CreateCollection::new("Posts", "posts")
            .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
            .execute(&ctx)
            .await
            .unwrap();

        let created = CreateEntity::new("posts").execute(&ctx).await.unwrap();
        let id = EntityId::parse(created["id"].as_str().unwrap()).unwrap();

        DeleteEntity::new("posts", id).execute(&ctx).await.unwrap();
        assert!(ctx.read_entity(&id).await.is_err());

        // deleting again reads as not-found
        let result = DeleteEntity::new("posts", id).execute(&ctx).await;
        assert!(matches!(result, Err(ContentError::EntityNotFound { .. })));
    }
}
