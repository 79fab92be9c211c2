//! UpdateEntity command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::entity::load_scoped;
use crate::error::{ContentError, Result};
use crate::hooks::{self, HookAction, HookResource};
use crate::ops::{async_trait, Execute};
use crate::types::{now, EntityData, EntityId, EntityStatus};
use crate::validate::validate_and_normalize;

/// Update a content record.
///
/// Omitted fields keep their stored value, but the data map is still
/// re-normalized against the current schema and language list — an update is
/// how drifted entities heal.
#[derive(Debug, Deserialize)]
pub struct UpdateEntity {
    /// Owning collection, by id or name
    pub collection: String,
    /// The entity to update
    pub id: EntityId,
    /// New publication state, if changing
    #[serde(default)]
    pub status: Option<EntityStatus>,
    /// Replacement candidate data, if changing
    #[serde(default)]
    pub data: Option<EntityData>,
}

impl UpdateEntity {
    /// Create a new UpdateEntity command
    pub fn new(collection: impl Into<String>, id: EntityId) -> Self {
        Self {
            collection: collection.into(),
            id,
            status: None,
            data: None,
        }
    }

    /// Set a new publication status
    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replace the candidate data map
    pub fn with_data(mut self, data: EntityData) -> Self {
        self.data = Some(data);
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for UpdateEntity {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let (collection, mut entity) = load_scoped(ctx, &self.collection, &self.id).await?;
        let languages = ctx.read_all_languages().await?;

        if let Some(status) = self.status {
            entity.status = status;
        }
        if let Some(data) = &self.data {
            entity.data = data.clone();
        }
        entity.modified = now();

        validate_and_normalize(ctx, &mut entity, &collection, &languages).await?;
        ctx.write_entity(&entity).await?;

        let payload = serde_json::to_value(&entity)?;
        hooks::dispatch(
            collection.update_hook.as_deref(),
            HookResource::Entity,
            HookAction::Update,
            payload.clone(),
            ctx.config().hooks.timeout_secs,
        );

        Ok(payload)
    }
}
