//! AddKey command

use serde::Deserialize;
use serde_json::Value;

use crate::access::AccessTable;
use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::ApiKey;

/// Register an API key with its permission table.
#[derive(Debug, Deserialize)]
pub struct AddKey {
    /// Display title (required)
    pub title: String,
    /// Permission table: group -> allowed actions
    #[serde(default)]
    pub access: AccessTable,
}

impl AddKey {
    /// Create a new AddKey command
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            access: AccessTable::new(),
        }
    }

    /// Set the permission table
    pub fn with_access(mut self, access: AccessTable) -> Self {
        self.access = access;
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for AddKey {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let key = ApiKey::new(&self.title, self.access.clone());
        key.validate()?;

        ctx.write_key(&key).await?;

        Ok(serde_json::to_value(&key)?)
    }
}
