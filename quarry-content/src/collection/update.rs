//! UpdateCollection command

use quarry_fields::Field;
use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::hooks::{self, HookAction, HookResource};
use crate::ops::{async_trait, Execute};
use crate::types::{now, CollectionId};

/// Replace an existing collection's definition.
///
/// The schema is fully re-validated; entities already stored under the old
/// schema are healed by normalize-on-write the next time they are saved.
#[derive(Debug, Deserialize)]
pub struct UpdateCollection {
    /// The collection to update
    pub id: CollectionId,
    pub title: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub create_hook: Option<String>,
    #[serde(default)]
    pub update_hook: Option<String>,
    #[serde(default)]
    pub delete_hook: Option<String>,
}

impl UpdateCollection {
    /// Create an UpdateCollection command carrying the full new definition
    pub fn new(id: CollectionId, title: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            name: name.into(),
            fields: Vec::new(),
            create_hook: None,
            update_hook: None,
            delete_hook: None,
        }
    }

    /// Set the field schema
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// Set the update webhook URL
    pub fn with_update_hook(mut self, url: impl Into<String>) -> Self {
        self.update_hook = Some(url.into());
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for UpdateCollection {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut collection = ctx.read_collection(&self.id).await?;

        collection.title = self.title.clone();
        collection.name = self.name.clone();
        collection.fields = self.fields.clone();
        collection.create_hook = self.create_hook.clone();
        collection.update_hook = self.update_hook.clone();
        collection.delete_hook = self.delete_hook.clone();
        collection.modified = now();
        collection.validate()?;

        let existing = ctx.read_all_collections().await?;
        if existing
            .iter()
            .any(|c| c.name == collection.name && c.id != collection.id)
        {
            return Err(ContentError::conflict("collection", &collection.name));
        }

        ctx.write_collection(&collection).await?;

        let payload = serde_json::to_value(&collection)?;
        hooks::dispatch(
            collection.update_hook.as_deref(),
            HookResource::Collection,
            HookAction::Update,
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
    use crate::store::InitStore;
    use quarry_config::QuarryConfig;
    use quarry_fields::FieldType;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, ContentContext, CollectionId) {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        let created = CreateCollection::new("Posts", "posts")
            .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
            .execute(&ctx)
            .await
            .unwrap();
        let id = CollectionId::parse(created["id"].as_str().unwrap()).unwrap();

        (temp, ctx, id)
    }

    #[tokio::test]
    async fn test_update_replaces_schema() {
        let (_temp, ctx, id) = setup().await;

        let result = UpdateCollection::new(id, "Articles", "articles")
            .with_fields(vec![
                Field::new("title", FieldType::Plain, "Title").required(),
                Field::new("body", FieldType::Editor, "Body"),
            ])
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["name"], "articles");
        assert_eq!(result["fields"].as_array().unwrap().len(), 2);

        let stored = ctx.read_collection(&id).await.unwrap();
        assert_eq!(stored.name, "articles");
        // the old name no longer resolves
        assert!(ctx.find_collection("posts").await.is_err());
    }

    #[tokio::test]
    async fn test_update_keeps_own_name_without_conflict() {
        let (_temp, ctx, id) = setup().await;

        UpdateCollection::new(id, "Posts", "posts")
            .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
            .execute(&ctx)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejects_taken_name() {
        let (_temp, ctx, id) = setup().await;

        CreateCollection::new("Pages", "pages")
            .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
            .execute(&ctx)
            .await
            .unwrap();

        let result = UpdateCollection::new(id, "Posts", "pages")
            .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(ContentError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_collection() {
        let (_temp, ctx, _id) = setup().await;

        let result = UpdateCollection::new(CollectionId::new(), "X", "x")
            .with_fields(vec![Field::new("title", FieldType::Plain, "Title")])
            .execute(&ctx)
            .await;
        assert!(matches!(
            result,
            Err(ContentError::CollectionNotFound { .. })
        ));
    }
}
