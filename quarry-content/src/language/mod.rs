//! Language commands: locale lifecycle
//!
//! Language mutations cascade into every entity's data map: adding a
//! language clones the longest-standing locale's groups, renaming a locale
//! renames the key, deleting a language removes it. The cascades are bulk,
//! sequential and best-effort — a partial failure leaves entities
//! inconsistent until the next normalize-on-write heals them.

mod create;
mod delete;
mod list;
mod update;

pub use create::AddLanguage;
pub use delete::DeleteLanguage;
pub use list::ListLanguages;
pub use update::UpdateLanguage;

use tracing::warn;

use crate::context::ContentContext;

/// Copy every entity's `from` locale group under the `to` key.
pub(crate) async fn clone_locale_data(ctx: &ContentContext, from: &str, to: &str) {
    if from == to {
        return;
    }

    let entities = match ctx.read_all_entities().await {
        Ok(entities) => entities,
        Err(error) => {
            warn!(%from, %to, %error, "could not load entities to clone locale data");
            return;
        }
    };

    for mut entity in entities {
        let Some(group) = entity.data.get(from).cloned() else {
            continue;
        };
        entity.data.insert(to.to_string(), group);
        if let Err(error) = ctx.write_entity(&entity).await {
            warn!(entity = %entity.id, %to, %error, "failed to clone locale data group");
        }
    }
}

/// Rename every entity's `old` locale key to `new`.
pub(crate) async fn rename_locale_data(ctx: &ContentContext, old: &str, new: &str) {
    let entities = match ctx.read_all_entities().await {
        Ok(entities) => entities,
        Err(error) => {
            warn!(%old, %new, %error, "could not load entities to rename locale data");
            return;
        }
    };

    for mut entity in entities {
        let Some(group) = entity.data.remove(old) else {
            continue;
        };
        entity.data.insert(new.to_string(), group);
        if let Err(error) = ctx.write_entity(&entity).await {
            warn!(entity = %entity.id, %old, %new, %error, "failed to rename locale data group");
        }
    }
}

/// Remove `locale`'s data group from every entity.
pub(crate) async fn remove_locale_data(ctx: &ContentContext, locale: &str) {
    let entities = match ctx.read_all_entities().await {
        Ok(entities) => entities,
        Err(error) => {
            warn!(%locale, %error, "could not load entities to remove locale data");
            return;
        }
    };

    for mut entity in entities {
        if entity.data.remove(locale).is_none() {
            continue;
        }
        if let Err(error) = ctx.write_entity(&entity).await {
            warn!(entity = %entity.id, %locale, %error, "failed to remove locale data group");
        }
    }
}
