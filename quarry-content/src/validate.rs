//! Entity data validation and normalization.
//!
//! Runs on every entity write, in order:
//!
//! 1. **Prune**: drop locale groups for locales that are no longer active
//!    and field keys no longer in the schema. Drift from schema evolution,
//!    never a user error.
//! 2. **Fill & cast**: make sure every active locale has a group carrying
//!    exactly the schema's field keys, each value cast to its canonical
//!    shape.
//! 3. **Check**: required, media/relation max, and unique constraints,
//!    accumulated per locale and field so a caller can fix everything in one
//!    round trip.

use serde_json::Value;

use quarry_fields::{id_list, FieldMeta, FieldType};

use crate::context::ContentContext;
use crate::error::{ContentError, DataErrors, Result};
use crate::types::{Collection, Entity, EntityData, Language};

const REQUIRED_MESSAGE: &str = "This field is required.";
const INVALID_MESSAGE: &str = "The field is invalid or doesn't match the minimum requirements.";
const UNIQUE_MESSAGE: &str = "The field value must be unique.";

/// Validate `entity.data` against its collection schema and the active
/// language list, normalizing in place.
///
/// On success the data map holds exactly one group per active locale and one
/// key per schema field. On failure, every violation is reported together
/// in a map keyed `locale -> field key`.
pub async fn validate_and_normalize(
    ctx: &ContentContext,
    entity: &mut Entity,
    collection: &Collection,
    languages: &[Language],
) -> Result<()> {
    prune(&mut entity.data, collection, languages);

    let mut errors = DataErrors::new();

    for language in languages {
        // fill & cast: the group ends up with exactly the schema's keys
        let group = entity.data.entry(language.locale.clone()).or_default();
        for field in &collection.fields {
            let raw = group.get(&field.key).cloned().unwrap_or(Value::Null);
            group.insert(field.key.clone(), field.cast_value(&raw));
        }

        let mut locale_errors = std::collections::BTreeMap::new();

        for field in &collection.fields {
            let value = entity
                .value(&language.locale, &field.key)
                .cloned()
                .unwrap_or(Value::Null);

            if field.required && field.is_empty_value(&value) {
                locale_errors.insert(field.key.clone(), REQUIRED_MESSAGE.to_string());
                continue;
            }

            if matches!(field.field_type, FieldType::Media | FieldType::Relation) {
                let over_max = match field.meta() {
                    Ok(meta @ (FieldMeta::Media(_) | FieldMeta::Relation(_))) => {
                        meta.max() != 0 && id_list(&value).len() > meta.max() as usize
                    }
                    // undecodable meta flags the field rather than crashing
                    _ => true,
                };
                if over_max {
                    locale_errors.insert(field.key.clone(), INVALID_MESSAGE.to_string());
                    continue;
                }
            }

            if field.unique
                && has_duplicate_value(ctx, entity, &language.locale, &field.key, &value).await?
            {
                locale_errors.insert(field.key.clone(), UNIQUE_MESSAGE.to_string());
            }
        }

        if !locale_errors.is_empty() {
            errors.insert(language.locale.clone(), locale_errors);
        }
    }

    if !errors.is_empty() {
        return Err(ContentError::InvalidData { errors });
    }

    Ok(())
}

/// Remove locale groups that are not in the active language list and field
/// keys absent from the schema. Operates in place and never errors.
pub fn prune(data: &mut EntityData, collection: &Collection, languages: &[Language]) {
    data.retain(|locale, _| languages.iter().any(|l| l.locale == *locale));
    for group in data.values_mut() {
        group.retain(|key, _| collection.field(key).is_some());
    }
}

/// Whether any *other* entity of the same collection holds an identical
/// value at `locale`/`key`. One storage scan per unique field per locale per
/// write — acceptable at content-management scale.
async fn has_duplicate_value(
    ctx: &ContentContext,
    entity: &Entity,
    locale: &str,
    key: &str,
    value: &Value,
) -> Result<bool> {
    let entities = ctx.read_collection_entities(&entity.collection_id).await?;
    Ok(entities
        .iter()
        .any(|other| other.id != entity.id && other.value(locale, key) == Some(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntityStatus, LanguageId};
    use quarry_config::QuarryConfig;
    use quarry_fields::Field;
    use serde_json::json;
    use tempfile::TempDir;
    use ulid::Ulid;

    fn languages(locales: &[&str]) -> Vec<Language> {
        locales
            .iter()
            .enumerate()
            .map(|(i, locale)| {
                let mut language = Language::new(*locale, *locale);
                language.id = LanguageId::new();
                language.created += i as i64;
                language
            })
            .collect()
    }

    fn collection() -> Collection {
        Collection::new(
            "Posts",
            "posts",
            vec![
                Field::new("title", FieldType::Plain, "Title").required(),
                Field::new("published", FieldType::Switch, "Published"),
                Field::new("tags", FieldType::Checklist, "Tags"),
            ],
        )
    }

    async fn setup() -> (TempDir, ContentContext) {
        let temp = TempDir::new().unwrap();
        let ctx = ContentContext::new(temp.path().join("store"), QuarryConfig::default());
        ctx.create_directories().await.unwrap();
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_prune_drops_stale_locales_and_keys() {
        let collection = collection();
        let langs = languages(&["en"]);

        let mut data = EntityData::new();
        data.entry("en".into()).or_default().insert("title".into(), json!("Hi"));
        data.entry("en".into()).or_default().insert("legacy".into(), json!("old"));
        data.entry("fr".into()).or_default().insert("title".into(), json!("Salut"));

        prune(&mut data, &collection, &langs);

        assert!(data.contains_key("en"));
        assert!(!data.contains_key("fr"));
        assert!(!data["en"].contains_key("legacy"));
    }

    #[tokio::test]
    async fn test_completeness_one_group_per_locale_one_key_per_field() {
        let (_temp, ctx) = setup().await;
        let collection = collection();
        let langs = languages(&["en", "de"]);

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("title".into(), json!("Hello"));

        validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap();

        assert_eq!(entity.data.len(), 2);
        for locale in ["en", "de"] {
            let group = &entity.data[locale];
            assert_eq!(group.len(), collection.fields.len());
        }
        assert_eq!(entity.value("en", "title"), Some(&json!("Hello")));
        // absent values fill in as casted nulls
        assert_eq!(entity.value("de", "published"), Some(&json!(false)));
        assert_eq!(entity.value("de", "tags"), Some(&json!([])));
    }

    #[tokio::test]
    async fn test_normalization_is_idempotent() {
        let (_temp, ctx) = setup().await;
        let collection = collection();
        let langs = languages(&["en", "de"]);

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("title".into(), json!("Hello"));
        entity
            .data
            .entry("de".into())
            .or_default()
            .insert("title".into(), json!("Hallo"));
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("tags".into(), json!(["a", 5, "", "b"]));

        validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap();
        let first_pass = entity.data.clone();

        validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap();
        assert_eq!(entity.data, first_pass);
    }

    #[tokio::test]
    async fn test_checklist_cast_example() {
        let (_temp, ctx) = setup().await;
        let collection = collection();
        let langs = languages(&["en"]);

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity.data.entry("en".into()).or_default().extend([
            ("title".to_string(), json!("Hello")),
            ("tags".to_string(), json!(["a", 5, "", "b"])),
        ]);

        validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap();

        assert_eq!(entity.value("en", "tags"), Some(&json!(["a", "b"])));
    }

    #[tokio::test]
    async fn test_required_violation_keyed_per_locale_and_field() {
        let (_temp, ctx) = setup().await;
        let collection = collection();
        let langs = languages(&["en", "de"]);

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("de".into())
            .or_default()
            .insert("title".into(), json!("Hallo"));

        let err = validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap_err();

        let errors = err.data_errors().unwrap();
        assert_eq!(errors["en"]["title"], REQUIRED_MESSAGE);
        // the locale that is fine does not appear at all
        assert!(!errors.contains_key("de"));
    }

    #[tokio::test]
    async fn test_required_present_but_empty_fails() {
        let (_temp, ctx) = setup().await;
        let collection = collection();
        let langs = languages(&["en"]);

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("title".into(), json!(""));

        let err = validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap_err();
        assert_eq!(err.data_errors().unwrap()["en"]["title"], REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_relation_over_max_flagged() {
        let (_temp, ctx) = setup().await;
        let langs = languages(&["en"]);

        let target = Ulid::new();
        let collection = Collection::new(
            "Posts",
            "posts",
            vec![
                Field::new("author", FieldType::Relation, "Author").with_meta(json!({
                    "max": 1,
                    "collection_id": target.to_string(),
                })),
            ],
        );

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity.data.entry("en".into()).or_default().insert(
            "author".into(),
            json!([Ulid::new().to_string(), Ulid::new().to_string()]),
        );

        let err = validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap_err();
        assert_eq!(err.data_errors().unwrap()["en"]["author"], INVALID_MESSAGE);
    }

    #[tokio::test]
    async fn test_media_within_max_passes() {
        let (_temp, ctx) = setup().await;
        let langs = languages(&["en"]);

        let collection = Collection::new(
            "Posts",
            "posts",
            vec![Field::new("cover", FieldType::Media, "Cover").with_meta(json!({"max": 2}))],
        );

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("cover".into(), json!([Ulid::new().to_string()]));

        validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unique_rejects_duplicate_from_other_entity() {
        let (_temp, ctx) = setup().await;
        let langs = languages(&["en"]);

        let collection = Collection::new(
            "Posts",
            "posts",
            vec![Field::new("slug", FieldType::Plain, "Slug").unique()],
        );

        let mut existing = Entity::new(collection.id, EntityStatus::Active);
        existing
            .data
            .entry("en".into())
            .or_default()
            .insert("slug".into(), json!("hello-world"));
        ctx.write_entity(&existing).await.unwrap();

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("slug".into(), json!("hello-world"));

        let err = validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap_err();
        assert_eq!(err.data_errors().unwrap()["en"]["slug"], UNIQUE_MESSAGE);
    }

    #[tokio::test]
    async fn test_unique_ignores_the_entity_itself() {
        let (_temp, ctx) = setup().await;
        let langs = languages(&["en"]);

        let collection = Collection::new(
            "Posts",
            "posts",
            vec![Field::new("slug", FieldType::Plain, "Slug").unique()],
        );

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity
            .data
            .entry("en".into())
            .or_default()
            .insert("slug".into(), json!("hello-world"));
        ctx.write_entity(&entity).await.unwrap();

        // re-normalizing the persisted entity must not trip on its own value
        validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_all_violations_reported_together() {
        let (_temp, ctx) = setup().await;
        let langs = languages(&["en"]);

        let collection = Collection::new(
            "Posts",
            "posts",
            vec![
                Field::new("title", FieldType::Plain, "Title").required(),
                Field::new("cover", FieldType::Media, "Cover")
                    .with_meta(json!({"max": 1}))
                    .required(),
            ],
        );

        let mut entity = Entity::new(collection.id, EntityStatus::Active);
        entity.data.entry("en".into()).or_default().insert(
            "cover".into(),
            json!([Ulid::new().to_string(), Ulid::new().to_string()]),
        );

        let err = validate_and_normalize(&ctx, &mut entity, &collection, &langs)
            .await
            .unwrap_err();
        let errors = err.data_errors().unwrap();
        assert_eq!(errors["en"].len(), 2);
        assert_eq!(errors["en"]["title"], REQUIRED_MESSAGE);
        assert_eq!(errors["en"]["cover"], INVALID_MESSAGE);
    }
}
