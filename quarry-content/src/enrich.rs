//! Recursive enrichment of relation and media references.
//!
//! Enrichment replaces the id lists stored in `media`/`relation` fields with
//! the referenced objects: media records with their paths rewritten to
//! public URLs, and related entities — themselves enriched one level deeper.
//!
//! The recursion carries no visited set. Termination is guaranteed solely by
//! the depth cap, and breadth by the relation fan-out cap: a pathological
//! cyclic schema is silently truncated at the cap rather than reported.
//! Relation ids pointing at collections the caller may not traverse are
//! omitted, indistinguishable from ids that don't exist.

use serde::Deserialize;
use serde_json::Value;

use indexmap::IndexMap;
use quarry_fields::{id_list, FieldType};
use tracing::warn;

use crate::access::{actions, AccessTable};
use crate::context::ContentContext;
use crate::types::{
    Collection, CollectionId, Entity, EntityStatus, MediaFile, MediaId, MediaType,
};

/// Maximum recursion depth. The sole termination guarantee against cyclic
/// relation graphs.
const MAX_ENRICH_LEVEL: u8 = 3;

/// Maximum related entities fetched per enrichment pass.
const MAX_ENRICH_RELS: usize = 100;

/// Attribute filter applied to fetched relations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EntityConditions {
    #[serde(default)]
    pub status: Option<EntityStatus>,
}

impl EntityConditions {
    /// Only active entities pass
    pub fn active_only() -> Self {
        Self {
            status: Some(EntityStatus::Active),
        }
    }

    fn matches(&self, entity: &Entity) -> bool {
        self.status.map_or(true, |status| entity.status == status)
    }
}

/// Attribute filter applied to fetched media.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaConditions {
    #[serde(default)]
    pub media_type: Option<MediaType>,
}

impl MediaConditions {
    fn matches(&self, media: &MediaFile) -> bool {
        self.media_type
            .map_or(true, |media_type| media.media_type == media_type)
    }
}

/// Settings threaded through one enrichment pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichSettings {
    /// Current recursion depth; callers start at 0
    #[serde(default)]
    pub level: u8,
    /// Whether media references may be embedded at all
    #[serde(default)]
    pub enrich_media: bool,
    /// Collections the caller may traverse into
    #[serde(default)]
    pub rel_collection_ids: Vec<CollectionId>,
    /// Optional attribute filter on fetched relations
    #[serde(default)]
    pub rel_conditions: Option<EntityConditions>,
    /// Optional attribute filter on fetched media
    #[serde(default)]
    pub media_conditions: Option<MediaConditions>,
}

impl EnrichSettings {
    /// Build settings from a caller's access table: media embedding requires
    /// the media view right, and only collections the caller may view are
    /// traversed.
    pub fn for_access(access: &AccessTable) -> Self {
        Self {
            level: 0,
            enrich_media: access.can_access("media", actions::VIEW),
            rel_collection_ids: access.collection_ids_with_actions(&[actions::VIEW]),
            rel_conditions: None,
            media_conditions: None,
        }
    }

    /// Restrict fetched relations to active entities
    pub fn active_relations_only(mut self) -> Self {
        self.rel_conditions = Some(EntityConditions::active_only());
        self
    }

    fn next_level(&self) -> Self {
        let mut next = self.clone();
        next.level += 1;
        next
    }
}

/// Enrich a single entity's relation and media fields.
pub async fn enrich_entity(
    ctx: &ContentContext,
    entity: Entity,
    collection: &Collection,
    settings: &EnrichSettings,
) -> Entity {
    let mut enriched = enrich_entities(ctx, vec![entity], collection, settings).await;
    enriched
        .pop()
        .expect("enrich_entities preserves its input length")
}

/// Enrich a batch of entities belonging to one collection.
///
/// Infallible by design: the read path must keep serving even when a
/// referenced document is missing or unreadable, so failed lookups degrade
/// to omitted embeds.
pub async fn enrich_entities(
    ctx: &ContentContext,
    mut entities: Vec<Entity>,
    collection: &Collection,
    settings: &EnrichSettings,
) -> Vec<Entity> {
    if settings.level > MAX_ENRICH_LEVEL {
        return entities;
    }

    let (media_ids, relation_ids) = extract_ids(&entities, collection);
    if media_ids.is_empty() && relation_ids.is_empty() {
        return entities;
    }

    let media = if settings.enrich_media {
        fetch_media(ctx, &media_ids, settings).await
    } else {
        Vec::new()
    };

    let relations = fetch_relations(ctx, &relation_ids, settings).await;
    let relations = enrich_relations(ctx, relations, settings).await;

    for entity in &mut entities {
        for group in entity.data.values_mut() {
            for field in &collection.fields {
                let Some(value) = group.get(&field.key) else {
                    continue;
                };

                match field.field_type {
                    FieldType::Media => {
                        let embedded = select_media(&id_list(value), &media);
                        group.insert(field.key.clone(), apply_max(embedded, field_max(field)));
                    }
                    FieldType::Relation => {
                        let embedded = select_relations(&id_list(value), &relations);
                        group.insert(field.key.clone(), apply_max(embedded, field_max(field)));
                    }
                    _ => {}
                }
            }
        }
    }

    entities
}

/// Collect the distinct media and relation ids referenced anywhere in the
/// batch, keyed off the collection's field types.
fn extract_ids(
    entities: &[Entity],
    collection: &Collection,
) -> (Vec<ulid::Ulid>, Vec<ulid::Ulid>) {
    let mut media_ids = Vec::new();
    let mut relation_ids = Vec::new();

    for entity in entities {
        for group in entity.data.values() {
            for field in &collection.fields {
                let Some(value) = group.get(&field.key) else {
                    continue;
                };

                let target = match field.field_type {
                    FieldType::Media => &mut media_ids,
                    FieldType::Relation => &mut relation_ids,
                    _ => continue,
                };

                for id in id_list(value) {
                    if !target.contains(&id) {
                        target.push(id);
                    }
                }
            }
        }
    }

    (media_ids, relation_ids)
}

/// Fetch the referenced media records that pass the conditions, paths
/// rewritten to public URLs.
async fn fetch_media(
    ctx: &ContentContext,
    media_ids: &[ulid::Ulid],
    settings: &EnrichSettings,
) -> Vec<MediaFile> {
    let mut media = Vec::new();

    for id in media_ids {
        let Ok(record) = ctx.read_media(&MediaId::from(*id)).await else {
            continue;
        };

        if settings
            .media_conditions
            .as_ref()
            .map_or(true, |conditions| conditions.matches(&record))
        {
            media.push(record.into_public(&ctx.config().upload));
        }
    }

    media
}

/// Fetch referenced entities the caller may see, up to the fan-out cap.
/// Entities in unpermitted collections are silently excluded.
async fn fetch_relations(
    ctx: &ContentContext,
    relation_ids: &[ulid::Ulid],
    settings: &EnrichSettings,
) -> Vec<Entity> {
    let mut relations = Vec::new();

    for id in relation_ids {
        if relations.len() >= MAX_ENRICH_RELS {
            break;
        }

        let Ok(entity) = ctx.read_entity(&crate::types::EntityId::from(*id)).await else {
            continue;
        };

        if !settings.rel_collection_ids.contains(&entity.collection_id) {
            continue;
        }

        if settings
            .rel_conditions
            .as_ref()
            .map_or(true, |conditions| conditions.matches(&entity))
        {
            relations.push(entity);
        }
    }

    relations
}

/// Recursively enrich fetched relations: group them by owning collection,
/// load each schema, and re-enter one level deeper.
async fn enrich_relations(
    ctx: &ContentContext,
    relations: Vec<Entity>,
    settings: &EnrichSettings,
) -> Vec<Entity> {
    if relations.is_empty() {
        return relations;
    }

    let mut by_collection: IndexMap<CollectionId, Vec<Entity>> = IndexMap::new();
    for entity in relations {
        by_collection
            .entry(entity.collection_id)
            .or_default()
            .push(entity);
    }

    let sub_settings = settings.next_level();
    let mut result = Vec::new();

    for (collection_id, group) in by_collection {
        match ctx.read_collection(&collection_id).await {
            Ok(collection) => {
                let enriched =
                    Box::pin(enrich_entities(ctx, group, &collection, &sub_settings)).await;
                result.extend(enriched);
            }
            Err(error) => {
                // a relation to a vanished collection is drift; surface the
                // entities as-is
                warn!(%collection_id, %error, "skipping enrichment for missing collection");
                result.extend(group);
            }
        }
    }

    result
}

/// The fetched media records matching `ids`, in id order.
fn select_media(ids: &[ulid::Ulid], media: &[MediaFile]) -> Vec<Value> {
    ids.iter()
        .filter_map(|id| media.iter().find(|m| m.id.as_ulid() == *id))
        .map(|m| serde_json::to_value(m).unwrap_or(Value::Null))
        .collect()
}

/// The fetched relations matching `ids`, in id order.
fn select_relations(ids: &[ulid::Ulid], relations: &[Entity]) -> Vec<Value> {
    ids.iter()
        .filter_map(|id| relations.iter().find(|e| e.id.as_ulid() == *id))
        .map(|e| serde_json::to_value(e).unwrap_or(Value::Null))
        .collect()
}

/// Apply the field's `max` meta to the embedded objects: `max == 1`
/// collapses to a single object (or null), any other non-zero max truncates.
fn apply_max(mut embedded: Vec<Value>, max: u8) -> Value {
    if max == 1 {
        return if embedded.is_empty() {
            Value::Null
        } else {
            embedded.swap_remove(0)
        };
    }

    if max > 1 && embedded.len() > max as usize {
        embedded.truncate(max as usize);
    }

    Value::Array(embedded)
}

/// A field's `max` bound; undecodable meta counts as unbounded here (the
/// write path already rejects it).
fn field_max(field: &quarry_fields::Field) -> u8 {
    field.meta().map(|meta| meta.max()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_max_collapses_single() {
        let objects = vec![serde_json::json!({"a": 1}), serde_json::json!({"b": 2})];
        assert_eq!(apply_max(objects, 1), serde_json::json!({"a": 1}));
        assert_eq!(apply_max(Vec::new(), 1), Value::Null);
    }

    #[test]
    fn test_apply_max_truncates() {
        let objects = vec![
            serde_json::json!(1),
            serde_json::json!(2),
            serde_json::json!(3),
        ];
        assert_eq!(
            apply_max(objects.clone(), 2),
            serde_json::json!([1, 2])
        );
        assert_eq!(apply_max(objects, 0), serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_settings_for_access() {
        let readable = CollectionId::new();
        let table = AccessTable::new()
            .grant("media", &[actions::VIEW])
            .grant(readable.to_string(), &[actions::VIEW]);

        let settings = EnrichSettings::for_access(&table);
        assert!(settings.enrich_media);
        assert_eq!(settings.rel_collection_ids, vec![readable]);
        assert_eq!(settings.level, 0);

        let restricted = settings.active_relations_only();
        assert_eq!(
            restricted.rel_conditions,
            Some(EntityConditions::active_only())
        );
    }

    #[test]
    fn test_settings_without_media_right() {
        let table = AccessTable::new();
        let settings = EnrichSettings::for_access(&table);
        assert!(!settings.enrich_media);
        assert!(settings.rel_collection_ids.is_empty());
    }
}
