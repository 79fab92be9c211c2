//! ListMedia command

use serde::Deserialize;
use serde_json::Value;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::ops::{async_trait, Execute};
use crate::types::MediaType;

/// List media records, oldest first, paths rewritten to public URLs.
#[derive(Debug, Default, Deserialize)]
pub struct ListMedia {
    /// Only records of this type
    #[serde(default)]
    pub media_type: Option<MediaType>,
}

impl ListMedia {
    /// Create a new ListMedia command
    pub fn new() -> Self {
        Self::default()
    }

    /// Only records of the given type
    pub fn with_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }
}

#[async_trait]
impl Execute<ContentContext, ContentError> for ListMedia {
    async fn execute(&self, ctx: &ContentContext) -> Result<Value> {
        let mut media = ctx.read_all_media().await?;
        if let Some(media_type) = self.media_type {
            media.retain(|m| m.media_type == media_type);
        }

        let public: Vec<_> = media
            .into_iter()
            .map(|m| m.into_public(&ctx.config().upload))
            .collect();

        Ok(serde_json::to_value(&public)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::AddMedia;
    use crate::store::InitStore;
    use quarry_config::QuarryConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_media_filters_and_rewrites_paths() {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        InitStore::new().execute(&ctx).await.unwrap();

        AddMedia::new(MediaType::Image, "Logo", "logo.png")
            .execute(&ctx)
            .await
            .unwrap();
        AddMedia::new(MediaType::Doc, "Spec", "spec.pdf")
            .execute(&ctx)
            .await
            .unwrap();

        let all = ListMedia::new().execute(&ctx).await.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 2);

        let images = ListMedia::new()
            .with_type(MediaType::Image)
            .execute(&ctx)
            .await
            .unwrap();
        let items = images.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["path"], "http://localhost:8090/uploads/logo.png");
    }
}
