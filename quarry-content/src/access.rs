//! Caller access tables and the permission filter.
//!
//! An access table maps permission groups to allowed actions. Groups are
//! either semantic names ("media", "key") or the string form of a collection
//! id, which marks a per-collection permission entry. The enrichment engine
//! consults the table to decide which related collections and media a caller
//! may see.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::CollectionId;

/// The action names used in access tables.
pub mod actions {
    pub const INDEX: &str = "index";
    pub const VIEW: &str = "view";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";

    /// All lifecycle actions
    pub const ALL: [&str; 5] = [INDEX, VIEW, CREATE, UPDATE, DELETE];
}

/// Allowed actions per permission group, in operator-defined order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessTable(IndexMap<String, Vec<String>>);

impl AccessTable {
    /// Create an empty access table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with the given actions (builder style)
    pub fn grant(mut self, group: impl Into<String>, actions: &[&str]) -> Self {
        self.set_group(group, actions);
        self
    }

    /// Whether `group` allows `action`. Empty arguments are always denied.
    pub fn can_access(&self, group: &str, action: &str) -> bool {
        if group.is_empty() || action.is_empty() {
            return false;
        }
        self.0
            .get(group)
            .map(|allowed| allowed.iter().any(|a| a == action))
            .unwrap_or(false)
    }

    /// Every per-collection group whose action list contains all of
    /// `actions`. With no actions requested, every collection-shaped group
    /// qualifies regardless of its action list.
    ///
    /// Semantic groups ("media", "key") never qualify — only keys that parse
    /// as object identifiers are collection entries.
    pub fn collection_ids_with_actions(&self, actions: &[&str]) -> Vec<CollectionId> {
        let mut ids = Vec::new();

        'groups: for (group, allowed) in &self.0 {
            let Some(id) = CollectionId::parse(group) else {
                continue;
            };

            for action in actions {
                if !allowed.iter().any(|a| a == action) {
                    continue 'groups;
                }
            }

            ids.push(id);
        }

        ids
    }

    /// Set (or replace) a group's action list
    pub fn set_group(&mut self, group: impl Into<String>, actions: &[&str]) {
        self.0
            .insert(group.into(), actions.iter().map(|a| a.to_string()).collect());
    }

    /// Remove a group entirely
    pub fn unset_group(&mut self, group: &str) {
        self.0.shift_remove(group);
    }

    /// Whether the table has any groups
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate groups and their allowed actions
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
