//! ListKeys command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};

/// List all API keys, oldest first.
#[derive(Debug, Default, Deserialize)]
pub struct ListKeys {}

impl ListKeys {
    /// Create a new ListKeys command
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for ListKeys {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let keys = ctx.read_all_keys().await?;
        Ok(serde_json::to_value(&keys)?)
    }
}
