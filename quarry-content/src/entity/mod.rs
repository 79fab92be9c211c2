//! Entity commands: content record lifecycle
//!
//! Every write re-derives the entity's data shape from the *current*
//! collection schema and language list — candidate data is filtered, cast
//! and validated, never trusted as-is. Reads optionally run the enrichment
//! engine with settings derived from the caller's access table.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::CreateEntity;
pub use delete::DeleteEntity;
pub use get::GetEntity;
pub use list::ListEntities;
pub use update::UpdateEntity;

use crate::context::ContentContext;
use crate::error::{ContentError, Result};
use crate::types::{Collection, Entity, EntityId};

/// Load an entity scoped to a collection identified by id or name. An id
/// match in the wrong collection reads as not-found.
pub(crate) async fn load_scoped(
    ctx: &ContentContext,
    collection_identifier: &str,
    id: &EntityId,
) -> Result<(Collection, Entity)> {
    let collection = ctx.find_collection(collection_identifier).await?;
    let entity = ctx.read_entity(id).await?;

    if entity.collection_id != collection.id {
        return Err(ContentError::EntityNotFound { id: id.to_string() });
    }

    Ok((collection, entity))
}
