//! Collection commands: content type lifecycle
//!
//! Creating or deleting a collection also rewrites every stored key's
//! access table — the permission group for a collection lives and dies with
//! it. Those cascades are best-effort: a failed key write is logged and
//! skipped, never blocking the primary operation.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::CreateCollection;
pub use delete::DeleteCollection;
pub use get::GetCollection;
pub use list::ListCollections;
pub use update::UpdateCollection;

use tracing::warn;

use crate::access::actions;
use crate::context::ContentContext;
use crate::types::{now, CollectionId};

/// Add a read-only permission group for a new collection to every stored
/// key.
pub(crate) async fn grant_collection_group(ctx: &ContentContext, id: &CollectionId) {
    let keys = match ctx.read_all_keys().await {
        Ok(keys) => keys,
        Err(error) => {
            warn!(collection = %id, %error, "could not load keys to grant access group");
            return;
        }
    };

    for mut key in keys {
        key.access
            .set_group(id.to_string(), &[actions::INDEX, actions::VIEW]);
        key.modified = now();
        if let Err(error) = ctx.write_key(&key).await {
            warn!(key = %key.id, collection = %id, %error, "failed to grant access group");
        }
    }
}

/// Remove a deleted collection's permission group from every stored key.
pub(crate) async fn revoke_collection_group(ctx: &ContentContext, id: &CollectionId) {
    let keys = match ctx.read_all_keys().await {
        Ok(keys) => keys,
        Err(error) => {
            warn!(collection = %id, %error, "could not load keys to revoke access group");
            return;
        }
    };

    for mut key in keys {
        key.access.unset_group(&id.to_string());
        key.modified = now();
        if let Err(error) = ctx.write_key(&key).await {
            warn!(key = %key.id, collection = %id, %error, "failed to revoke access group");
        }
    }
}
