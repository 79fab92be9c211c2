//! AddMedia command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::{MediaFile, MediaType};

/// Register a media record for an already-stored file.
#[derive(Debug, Deserialize)]
pub struct AddMedia {
    /// Broad file classification
    pub media_type: MediaType,
    /// Display title (required)
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Path relative to the upload directory
    pub path: String,
}

impl AddMedia {
    /// Create a new AddMedia command
    pub fn new(
        media_type: MediaType,
        title: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            media_type,
            title: title.into(),
            description: String::new(),
            path: path.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for AddMedia {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut media = MediaFile::new(self.media_type, &self.title, &self.path);
        media.description = self.description.clone();
        media.validate()?;

        ctx.write_media(&media).await?;

        Ok(serde_json::to_value(
            media.into_public(&ctx.config().upload),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InitStore;
    use quarry_config::QuarryConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_add_media_returns_public_url() {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        let result = AddMedia::new(MediaType::Image, "Logo", "2024/logo.png")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(
            result["path"],
            "http://localhost:8090/uploads/2024/logo.png"
        );

        // the stored document keeps the relative path
        let stored = ctx.read_all_media().await.unwrap();
        assert_eq!(stored[0].path, "2024/logo.png");
    }

    #[tokio::test]
    async fn test_title_required() {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        let result = AddMedia::new(MediaType::Image, "", "logo.png")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(ContentError::MissingField { .. })));
    }
}
