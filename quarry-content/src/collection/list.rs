//! ListCollections command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};

/// List all collections, oldest first.
#[derive(Debug, Default, Deserialize)]
pub struct ListCollections {}

impl ListCollections {
    /// Create a new ListCollections command
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for ListCollections {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let collections = ctx.read_all_collections().await?;
        Ok(serde_json::to_value(&collections)?)
    }
}
