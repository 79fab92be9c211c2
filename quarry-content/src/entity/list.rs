//! ListEntities command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::enrich::{enrich_entities, EnrichSettings};
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::EntityStatus;

/// List a collection's content records, oldest first, optionally filtered,
/// windowed and enriched. Query-string parsing and pagination headers belong
/// to the HTTP layer; the engine only applies the resolved window.
#[derive(Debug, Deserialize)]
pub struct ListEntities {
    /// Owning collection, by id or name
    pub collection: String,
    /// Only entities with this status
    #[serde(default)]
    pub status: Option<EntityStatus>,
    /// Records to skip
    #[serde(default)]
    pub offset: Option<usize>,
    /// Maximum records to return
    #[serde(default)]
    pub limit: Option<usize>,
    /// Enrichment settings derived from the caller's access table
    #[serde(default)]
    pub enrich: Option<EnrichSettings>,
}

impl ListEntities {
    /// Create a new ListEntities command
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            status: None,
            offset: None,
            limit: None,
            enrich: None,
        }
    }

    /// Only entities with the given status
    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Apply an offset/limit window
    pub fn with_window(mut self, offset: usize, limit: usize) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    /// Enrich relation and media fields with the given settings
    pub fn with_enrich(mut self, settings: EnrichSettings) -> Self {
        self.enrich = Some(settings);
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for ListEntities {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let collection = ctx.find_collection(&self.collection).await?;

        let mut entities = ctx.read_collection_entities(&collection.id).await?;
        if let Some(status) = self.status {
            entities.retain(|e| e.status == status);
        }

        if let Some(offset) = self.offset {
            entities = entities.into_iter().skip(offset).collect();
        }
        if let Some(limit) = self.limit {
            entities.truncate(limit);
        }

        let entities = match &self.enrich {
            Some(settings) => enrich_entities(ctx, entities, &collection, settings).await,
            None => entities,
        };

        Ok(serde_json::to_value(&entities)?)
    }
}
