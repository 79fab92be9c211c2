//! ContentContext - I/O primitives for the document store
//!
//! The context provides access to storage, not business logic. Each document
//! kind lives in its own directory as one pretty-printed JSON file per
//! record; commands do all the work on top of these primitives.
//!
//! There is deliberately no locking and no versioning: concurrent writes to
//! the same document are resolved last-write-wins at the filesystem layer.

use std::path::{Path, PathBuf};

use quarry_config::QuarryConfig;
use tokio::fs;
use tracing::warn;

use crate::error::{ContentError, Result};
use crate::types::{
    ApiKey, Collection, CollectionId, Entity, EntityId, KeyId, Language, LanguageId, MediaFile,
    MediaId,
};

/// Context passed to every command - provides access, not logic
pub struct ContentContext {
    /// Root directory of the content store
    root: PathBuf,
    /// Process configuration, passed in explicitly
    config: QuarryConfig,
}

impl ContentContext {
    /// Create a new context for the given store root
    pub fn new(root: impl Into<PathBuf>, config: QuarryConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// The store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The process configuration
    pub fn config(&self) -> &QuarryConfig {
        &self.config
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Path to the collections directory
    pub fn collections_dir(&self) -> PathBuf {
        self.root.join("collections")
    }

    /// Path to a collection's JSON file
    pub fn collection_path(&self, id: &CollectionId) -> PathBuf {
        self.collections_dir().join(format!("{id}.json"))
    }

    /// Path to the entities directory
    pub fn entities_dir(&self) -> PathBuf {
        self.root.join("entities")
    }

    /// Path to an entity's JSON file
    pub fn entity_path(&self, id: &EntityId) -> PathBuf {
        self.entities_dir().join(format!("{id}.json"))
    }

    /// Path to the languages directory
    pub fn languages_dir(&self) -> PathBuf {
        self.root.join("languages")
    }

    /// Path to a language's JSON file
    pub fn language_path(&self, id: &LanguageId) -> PathBuf {
        self.languages_dir().join(format!("{id}.json"))
    }

    /// Path to the media directory
    pub fn media_dir(&self) -> PathBuf {
        self.root.join("media")
    }

    /// Path to a media record's JSON file
    pub fn media_path(&self, id: &MediaId) -> PathBuf {
        self.media_dir().join(format!("{id}.json"))
    }

    /// Path to the keys directory
    pub fn keys_dir(&self) -> PathBuf {
        self.root.join("keys")
    }

    /// Path to a key's JSON file
    pub fn key_path(&self, id: &KeyId) -> PathBuf {
        self.keys_dir().join(format!("{id}.json"))
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if all store directories exist
    pub fn is_initialized(&self) -> bool {
        self.root.exists()
            && self.collections_dir().exists()
            && self.entities_dir().exists()
            && self.languages_dir().exists()
            && self.media_dir().exists()
            && self.keys_dir().exists()
    }

    /// Create the store directory structure. Idempotent.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.collections_dir()).await?;
        fs::create_dir_all(self.entities_dir()).await?;
        fs::create_dir_all(self.languages_dir()).await?;
        fs::create_dir_all(self.media_dir()).await?;
        fs::create_dir_all(self.keys_dir()).await?;
        Ok(())
    }

    /// Ensure the directory structure exists, creating it if needed
    pub async fn ensure_directories(&self) -> Result<()> {
        if !self.is_initialized() {
            self.create_directories().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Collection I/O
    // =========================================================================

    /// Read a collection by id
    pub async fn read_collection(&self, id: &CollectionId) -> Result<Collection> {
        let path = self.collection_path(id);
        if !path.exists() {
            return Err(ContentError::CollectionNotFound {
                identifier: id.to_string(),
            });
        }

        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a collection (atomic write via temp file)
    pub async fn write_collection(&self, collection: &Collection) -> Result<()> {
        let content = serde_json::to_string_pretty(collection)?;
        atomic_write(&self.collection_path(&collection.id), content.as_bytes()).await
    }

    /// Delete a collection file
    pub async fn delete_collection_file(&self, id: &CollectionId) -> Result<()> {
        let path = self.collection_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// Read all collections, oldest first
    pub async fn read_all_collections(&self) -> Result<Vec<Collection>> {
        let mut collections: Vec<Collection> = self.read_dir_documents(&self.collections_dir()).await?;
        collections.sort_by(|a, b| (a.created, a.id).cmp(&(b.created, b.id)));
        Ok(collections)
    }

    /// Resolve a collection by id or by name
    pub async fn find_collection(&self, identifier: &str) -> Result<Collection> {
        if let Some(id) = CollectionId::parse(identifier) {
            return self.read_collection(&id).await;
        }

        self.read_all_collections()
            .await?
            .into_iter()
            .find(|c| c.name == identifier)
            .ok_or_else(|| ContentError::CollectionNotFound {
                identifier: identifier.to_string(),
            })
    }

    // =========================================================================
    // Entity I/O
    // =========================================================================

    /// Read an entity by id
    pub async fn read_entity(&self, id: &EntityId) -> Result<Entity> {
        let path = self.entity_path(id);
        if !path.exists() {
            return Err(ContentError::EntityNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write an entity (atomic write via temp file)
    pub async fn write_entity(&self, entity: &Entity) -> Result<()> {
        let content = serde_json::to_string_pretty(entity)?;
        atomic_write(&self.entity_path(&entity.id), content.as_bytes()).await
    }

    /// Delete an entity file
    pub async fn delete_entity_file(&self, id: &EntityId) -> Result<()> {
        let path = self.entity_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// Read all entities, oldest first
    pub async fn read_all_entities(&self) -> Result<Vec<Entity>> {
        let mut entities: Vec<Entity> = self.read_dir_documents(&self.entities_dir()).await?;
        entities.sort_by(|a, b| (a.created, a.id).cmp(&(b.created, b.id)));
        Ok(entities)
    }

    /// Read all entities belonging to one collection, oldest first
    pub async fn read_collection_entities(&self, collection_id: &CollectionId) -> Result<Vec<Entity>> {
        let mut entities = self.read_all_entities().await?;
        entities.retain(|e| e.collection_id == *collection_id);
        Ok(entities)
    }

    // =========================================================================
    // Language I/O
    // =========================================================================

    /// Read a language by id
    pub async fn read_language(&self, id: &LanguageId) -> Result<Language> {
        let path = self.language_path(id);
        if !path.exists() {
            return Err(ContentError::LanguageNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a language (atomic write via temp file)
    pub async fn write_language(&self, language: &Language) -> Result<()> {
        let content = serde_json::to_string_pretty(language)?;
        atomic_write(&self.language_path(&language.id), content.as_bytes()).await
    }

    /// Delete a language file
    pub async fn delete_language_file(&self, id: &LanguageId) -> Result<()> {
        let path = self.language_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// Read all languages, longest-standing first
    pub async fn read_all_languages(&self) -> Result<Vec<Language>> {
        let mut languages: Vec<Language> = self.read_dir_documents(&self.languages_dir()).await?;
        languages.sort_by(|a, b| (a.created, a.id).cmp(&(b.created, b.id)));
        Ok(languages)
    }

    /// Resolve a language by its locale code
    pub async fn find_language(&self, locale: &str) -> Result<Language> {
        self.read_all_languages()
            .await?
            .into_iter()
            .find(|l| l.locale == locale)
            .ok_or_else(|| ContentError::LanguageNotFound {
                id: locale.to_string(),
            })
    }

    // =========================================================================
    // Media I/O
    // =========================================================================

    /// Read a media record by id
    pub async fn read_media(&self, id: &MediaId) -> Result<MediaFile> {
        let path = self.media_path(id);
        if !path.exists() {
            return Err(ContentError::MediaNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a media record (atomic write via temp file)
    pub async fn write_media(&self, media: &MediaFile) -> Result<()> {
        let content = serde_json::to_string_pretty(media)?;
        atomic_write(&self.media_path(&media.id), content.as_bytes()).await
    }

    /// Delete a media record file
    pub async fn delete_media_file(&self, id: &MediaId) -> Result<()> {
        let path = self.media_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// Read all media records, oldest first
    pub async fn read_all_media(&self) -> Result<Vec<MediaFile>> {
        let mut media: Vec<MediaFile> = self.read_dir_documents(&self.media_dir()).await?;
        media.sort_by(|a, b| (a.created, a.id).cmp(&(b.created, b.id)));
        Ok(media)
    }

    // =========================================================================
    // Key I/O
    // =========================================================================

    /// Read a key by id
    pub async fn read_key(&self, id: &KeyId) -> Result<ApiKey> {
        let path = self.key_path(id);
        if !path.exists() {
            return Err(ContentError::KeyNotFound { id: id.to_string() });
        }

        let content = fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write a key (atomic write via temp file)
    pub async fn write_key(&self, key: &ApiKey) -> Result<()> {
        let content = serde_json::to_string_pretty(key)?;
        atomic_write(&self.key_path(&key.id), content.as_bytes()).await
    }

    /// Delete a key file
    pub async fn delete_key_file(&self, id: &KeyId) -> Result<()> {
        let path = self.key_path(id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }

    /// Read all keys, oldest first
    pub async fn read_all_keys(&self) -> Result<Vec<ApiKey>> {
        let mut keys: Vec<ApiKey> = self.read_dir_documents(&self.keys_dir()).await?;
        keys.sort_by(|a, b| (a.created, a.id).cmp(&(b.created, b.id)));
        Ok(keys)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Read every `.json` document in a directory. Unparseable files are
    /// drift, not fatal: they are logged and skipped.
    async fn read_dir_documents<T: serde::de::DeserializeOwned>(
        &self,
        dir: &Path,
    ) -> Result<Vec<T>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str(&content) {
                Ok(document) => documents.push(document),
                Err(error) => {
                    warn!(?path, %error, "skipping unparseable document");
                }
            }
        }

        Ok(documents)
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;
    fs::rename(&temp_path, path).await?;

    Ok(())
}
