//! Media record type
//!
//! Only the metadata document lives here — upload handling and thumbnail
//! generation belong to the file layer, not the content engine. Enrichment
//! and the read path rewrite stored paths into public absolute URLs.

use std::fmt;

use quarry_config::UploadConfig;
use serde::{Deserialize, Serialize};

use super::ids::MediaId;
use super::now;
use crate::error::{ContentError, Result};

/// Broad file classification of a media record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Doc,
    Audio,
    Video,
    Other,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Doc => "doc",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// A stored media record referenced from media fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: MediaId,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Path relative to the upload directory
    pub path: String,
    pub created: i64,
    pub modified: i64,
}

impl MediaFile {
    /// Create a new media record
    pub fn new(
        media_type: MediaType,
        title: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let timestamp = now();
        Self {
            id: MediaId::new(),
            media_type,
            title: title.into(),
            description: String::new(),
            path: path.into(),
            created: timestamp,
            modified: timestamp,
        }
    }

    /// Validate title and path presence
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(ContentError::missing_field("title"));
        }
        if self.path.is_empty() {
            return Err(ContentError::missing_field("path"));
        }
        Ok(())
    }

    /// Rewrite the stored relative path into its public absolute URL.
    pub fn into_public(mut self, upload: &UploadConfig) -> Self {
        self.path = format!(
            "{}/{}",
            upload.public_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(MediaFile::new(MediaType::Image, "Logo", "logo.png")
            .validate()
            .is_ok());
        assert!(MediaFile::new(MediaType::Image, "", "logo.png")
            .validate()
            .is_err());
        assert!(MediaFile::new(MediaType::Image, "Logo", "")
            .validate()
            .is_err());
    }

    #[test]
    fn test_into_public_joins_cleanly() {
        let upload = UploadConfig {
            dir: "uploads".into(),
            public_url: "https://cdn.example.com/files/".into(),
        };

        let media = MediaFile::new(MediaType::Image, "Logo", "/2024/logo.png");
        let public = media.into_public(&upload);
        assert_eq!(public.path, "https://cdn.example.com/files/2024/logo.png");
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let json = serde_json::to_value(MediaFile::new(MediaType::Doc, "Spec", "spec.pdf")).unwrap();
        assert_eq!(json["type"], "doc");
    }
}
