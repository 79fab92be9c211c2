//! CreateEntity command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::hooks::{self, HookAction, HookResource};
use crate::ops::{async_trait, Execute};
use crate::types::{Entity, EntityData, EntityStatus};
use crate::validate::validate_and_normalize;

/// Create a content record in a collection.
#[derive(Debug, Deserialize)]
pub struct CreateEntity {
    /// Owning collection, by id or name
    pub collection: String,
    /// Publication state; defaults to active
    #[serde(default)]
    pub status: EntityStatus,
    /// Candidate per-locale data; filtered, cast and validated against the
    /// current schema
    #[serde(default)]
    pub data: EntityData,
}

impl CreateEntity {
    /// Create a new CreateEntity command
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            status: EntityStatus::Active,
            data: EntityData::new(),
        }
    }

    /// Set the publication status
    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the candidate data map
    pub fn with_data(mut self, data: EntityData) -> Self {
        self.data = data;
        self
    }

    /// Set one field value under a locale
    pub fn with_value(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        value: Value,
    ) -> Self {
        self.data
            .entry(locale.into())
            .or_default()
            .insert(key.into(), value);
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for CreateEntity {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let collection = ctx.find_collection(&self.collection).await?;
        let languages = ctx.read_all_languages().await?;

        let mut entity = Entity::new(collection.id, self.status);
        entity.data = self.data.clone();

        validate_and_normalize(ctx, &mut entity, &collection, &languages).await?;
        ctx.write_entity(&entity).await?;

        let payload = serde_json::to_value(&entity)?;
        hooks::dispatch(
            collection.create_hook.as_deref(),
            HookResource::Entity,
            HookAction::Create,
            payload.clone(),
            ctx.config().hooks.timeout_secs,
        );

        Ok(payload)
    }
}
