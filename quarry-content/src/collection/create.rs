//! CreateCollection command

use quarry_fields::Field;
use serde::Deserialize;
use serde_json::Value;

use crate::collection::grant_collection_group;
use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::hooks::{self, HookAction, HookResource};
use crate::ops::{async_trait, Execute};
use crate::types::Collection;

/// Define a new collection (content type)
#[derive(Debug, Deserialize)]
pub struct CreateCollection {
    /// Display title (required)
    pub title: String,
    /// Identifier-safe name, globally unique
    pub name: String,
    /// The ordered field schema
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Webhook URL notified after entity/collection creation
    #[serde(default)]
    pub create_hook: Option<String>,
    /// Webhook URL notified after updates
    #[serde(default)]
    pub update_hook: Option<String>,
    /// Webhook URL notified after deletion
    #[serde(default)]
    pub delete_hook: Option<String>,
}

impl CreateCollection {
    /// Create a new CreateCollection command
    pub fn new(title: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
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

    /// Set the create webhook URL
    pub fn with_create_hook(mut self, url: impl Into<String>) -> Self {
        self.create_hook = Some(url.into());
        self
    }

    /// Set the update webhook URL
    pub fn with_update_hook(mut self, url: impl Into<String>) -> Self {
        self.update_hook = Some(url.into());
        self
    }

    /// Set the delete webhook URL
    pub fn with_delete_hook(mut self, url: impl Into<String>) -> Self {
        self.delete_hook = Some(url.into());
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for CreateCollection {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut collection = Collection::new(&self.title, &self.name, self.fields.clone());
        collection.create_hook = self.create_hook.clone();
        collection.update_hook = self.update_hook.clone();
        collection.delete_hook = self.delete_hook.clone();
        collection.validate()?;

        // names are globally unique; a clash surfaces as a plain conflict
        let existing = ctx.read_all_collections().await?;
        if existing.iter().any(|c| c.name == collection.name) {
            return Err(ContentError::conflict("collection", &collection.name));
        }

        ctx.write_collection(&collection).await?;

        grant_collection_group(ctx, &collection.id).await;

        let payload = serde_json::to_value(&collection)?;
        hooks::dispatch(
            collection.create_hook.as_deref(),
            HookResource::Collection,
            HookAction::Create,
            payload.clone(),
            ctx.config().hooks.timeout_secs,
        );

        Ok(payload)
    }
}
