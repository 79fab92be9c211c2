//! GetEntity command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::enrich::{enrich_entity, EnrichSettings};
use crate::entity::load_scoped;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::{EntityId, EntityStatus};

/// Fetch a single content record, optionally enriched.
#[derive(Debug, Deserialize)]
pub struct GetEntity {
    /// Owning collection, by id or name
    pub collection: String,
    /// The entity to fetch
    pub id: EntityId,
    /// Hide inactive entities (the non-privileged read path)
    #[serde(default)]
    pub active_only: bool,
    /// Enrichment settings derived from the caller's access table; raw id
    /// lists are returned when absent
    #[serde(default)]
    pub enrich: Option<EnrichSettings>,
}

impl GetEntity {
    /// Create a new GetEntity command
    pub fn new(collection: impl Into<String>, id: EntityId) -> Self {
        Self {
            collection: collection.into(),
            id,
            active_only: false,
            enrich: None,
        }
    }

    /// Hide inactive entities
    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// Enrich relation and media fields with the given settings
    pub fn with_enrich(mut self, settings: EnrichSettings) -> Self {
        self.enrich = Some(settings);
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for GetEntity {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let (collection, entity) = load_scoped(ctx, &self.collection, &self.id).await?;

        if self.active_only && entity.status != EntityStatus::Active {
            return Err(ContentError::EntityNotFound {
                id: self.id.to_string(),
            });
        }

        let entity = match &self.enrich {
            Some(settings) => enrich_entity(ctx, entity, &collection, settings).await,
            None => entity,
        };

        Ok(serde_json::to_value(&entity)?)
    }
}
