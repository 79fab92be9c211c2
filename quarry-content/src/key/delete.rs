//! DeleteKey command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::KeyId;

/// Revoke an API key.
#[derive(Debug, Deserialize)]
pub struct DeleteKey {
    /// The key to delete
    pub id: KeyId,
}

impl DeleteKey {
    /// Create a new DeleteKey command
    pub fn new(id: KeyId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for DeleteKey {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let key = ctx.read_key(&self.id).await?;
        ctx.delete_key_file(&self.id).await?;
        Ok(serde_json::to_value(&key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::AddKey;
    use crate::store::InitStore;
    use quarry_config::QuarryConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_delete_key() {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        let added = AddKey::new("frontend").execute(&ctx).await.unwrap();
        let id = KeyId::parse(added["id"].as_str().unwrap()).unwrap();

        DeleteKey::new(id).execute(&ctx).await.unwrap();
        assert!(ctx.read_key(&id).await.is_err());

        let result = DeleteKey::new(id).execute(&ctx).await;
        assert!(matches!(result, Err(ContentError::KeyNotFound { .. })));
    }
}
