//! Entity type: one content record conforming to a collection schema

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ids::{CollectionId, EntityId};
use super::now;

/// One locale's field values, keyed by field key.
pub type LocaleData = BTreeMap<String, Value>;

/// Entity content: one data group per locale.
pub type EntityData = BTreeMap<String, LocaleData>;

/// Publication state of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Inactive => f.write_str("inactive"),
        }
    }
}

/// A content record. `data` holds one group per active locale with exactly
/// the owning collection's field keys — that shape is re-derived from the
/// current schema and language list on every write, never trusted from
/// client input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Owning collection (reference, not ownership)
    pub collection_id: CollectionId,
    #[serde(default)]
    pub status: EntityStatus,
    #[serde(default)]
    pub data: EntityData,
    pub created: i64,
    pub modified: i64,
}

impl Entity {
    /// Create a new entity in the given collection
    pub fn new(collection_id: CollectionId, status: EntityStatus) -> Self {
        let timestamp = now();
        Self {
            id: EntityId::new(),
            collection_id,
            status,
            data: EntityData::new(),
            created: timestamp,
            modified: timestamp,
        }
    }

    /// A field value at `locale`/`key`, if present
    pub fn value(&self, locale: &str, key: &str) -> Option<&Value> {
        self.data.get(locale).and_then(|group| group.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EntityStatus::Inactive).unwrap(),
            "\"inactive\""
        );
        assert_eq!(EntityStatus::default(), EntityStatus::Active);
    }

    #[test]
    fn test_entity_round_trip() {
        let mut entity = Entity::new(CollectionId::new(), EntityStatus::Active);
        entity
            .data
            .entry("en".to_string())
            .or_default()
            .insert("title".to_string(), json!("Hello"));

        let json = serde_json::to_string_pretty(&entity).unwrap();
        let parsed: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, entity.id);
        assert_eq!(parsed.value("en", "title"), Some(&json!("Hello")));
    }

    #[test]
    fn test_value_lookup_missing() {
        let entity = Entity::new(CollectionId::new(), EntityStatus::Active);
        assert!(entity.value("en", "title").is_none());
    }
}
