//! GetCollection command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};

/// Fetch a single collection by id or name.
#[derive(Debug, Deserialize)]
pub struct GetCollection {
    /// Collection id (26-character string) or name
    pub identifier: String,
}

impl GetCollection {
    /// Create a new GetCollection command
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for GetCollection {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let collection = ctx.find_collection(&self.identifier).await?;
        Ok(serde_json::to_value(&collection)?)
    }
}
