//! Core types for the content engine

mod collection;
mod entity;
mod ids;
mod key;
mod language;
mod media;

// Re-export all types
pub use collection::Collection;
pub use entity::{Entity, EntityData, EntityStatus, LocaleData};
pub use ids::{CollectionId, EntityId, KeyId, LanguageId, MediaId};
pub use key::ApiKey;
pub use language::Language;
pub use media::{MediaFile, MediaType};

/// Current UTC time as epoch seconds; the `created`/`modified` format for
/// every stored document.
pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
