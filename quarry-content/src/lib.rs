//! Schema-driven content engine with file-backed storage
//!
//! This crate is the core of a headless CMS: operators define collections
//! (content types) whose typed fields come from `quarry-fields`, then manage
//! multilingual entities (content records) that are validated and normalized
//! against the current schema and language list on every write. On the read
//! path, relation and media references inside entity data are recursively
//! resolved into embedded objects, bounded by depth and fan-out and filtered
//! by the caller's access table.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use quarry_config::QuarryConfig;
//! use quarry_content::{
//!     collection::CreateCollection, entity::CreateEntity, store::InitStore, ContentContext,
//!     Execute,
//! };
//! use quarry_fields::{Field, FieldType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = ContentContext::new("/srv/quarry/store", QuarryConfig::load()?);
//! InitStore::new().execute(&ctx).await?;
//!
//! CreateCollection::new("Posts", "posts")
//!     .with_fields(vec![
//!         Field::new("title", FieldType::Plain, "Title").required(),
//!     ])
//!     .execute(&ctx)
//!     .await?;
//!
//! let result = CreateEntity::new("posts").execute(&ctx).await?;
//! println!("created entity: {}", result["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! store/
//! ├── collections/
//! │   └── {id}.json      # Collection schema
//! ├── entities/
//! │   └── {id}.json      # Entity with per-locale data map
//! ├── languages/
//! │   └── {id}.json      # Active locale
//! ├── media/
//! │   └── {id}.json      # Media record metadata
//! └── keys/
//!     └── {id}.json      # API key with access table
//! ```
//!
//! One pretty-printed JSON document per record, written atomically. There is
//! no locking and no versioning: the engine is stateless between calls and
//! concurrent writes resolve last-write-wins.

pub mod access;
mod context;
pub mod enrich;
mod error;
pub mod hooks;
mod ops;
pub mod types;
pub mod validate;

// Command modules
pub mod collection;
pub mod entity;
pub mod key;
pub mod language;
pub mod media;
pub mod store;

pub use context::ContentContext;
pub use error::{ContentError, DataErrors, Result};
pub use ops::{async_trait, Execute};

// Re-export commonly used types
pub use access::{actions, AccessTable};
pub use enrich::{EnrichSettings, EntityConditions, MediaConditions};
pub use types::{
    ApiKey, Collection, CollectionId, Entity, EntityData, EntityId, EntityStatus, KeyId, Language,
    LanguageId, MediaFile, MediaId, MediaType,
};
