//! UpdateKey command

use serde::Deserialize;
use serde_json::Value;

use crate::access::AccessTable;
use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::{now, KeyId};

/// Update an API key's title or access table. The access table is replaced
/// wholesale, not merged.
#[derive(Debug, Deserialize)]
pub struct UpdateKey {
    /// The key to update
    pub id: KeyId,
    /// New display title, if changing
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement permission table, if changing
    #[serde(default)]
    pub access: Option<AccessTable>,
}

impl UpdateKey {
    /// Create a new UpdateKey command
    pub fn new(id: KeyId) -> Self {
        Self {
            id,
            title: None,
            access: None,
        }
    }

    /// Set a new display title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the permission table
    pub fn with_access(mut self, access: AccessTable) -> Self {
        self.access = Some(access);
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for UpdateKey {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut key = ctx.read_key(&self.id).await?;

        if let Some(title) = &self.title {
            key.title = title.clone();
        }
        if let Some(access) = &self.access {
            key.access = access.clone();
        }
        key.modified = now();
        key.validate()?;

        ctx.write_key(&key).await?;

        Ok(serde_json::to_value(&key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::actions;
    use crate::key::AddKey;
    use crate::store::InitStore;
    use quarry_config::QuarryConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_update_key_replaces_access() {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        let added = AddKey::new("frontend")
            .with_access(AccessTable::new().grant("media", &[actions::VIEW]))
            .execute(&ctx)
            .await
            .unwrap();
        let id = KeyId::parse(added["id"].as_str().unwrap()).unwrap();

        UpdateKey::new(id)
            .with_access(AccessTable::new().grant("key", &[actions::INDEX]))
            .execute(&ctx)
            .await
            .unwrap();

        let stored = ctx.read_key(&id).await.unwrap();
        assert!(stored.access.can_access("key", actions::INDEX));
        // replaced wholesale: the old group is gone
        assert!(!stored.access.can_access("media", actions::VIEW));
    }
}
