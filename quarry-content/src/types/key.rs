//! API key type: the identity an access table attaches to
//!
//! Token issuance and verification live in the auth layer; the engine only
//! cares about the permission table a resolved identity carries.

use serde::{Deserialize, Serialize};

use super::ids::KeyId;
use super::now;
use crate::access::AccessTable;
use crate::error::{ContentError, Result};

/// An API key holding the caller's permission table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: KeyId,
    pub title: String,
    #[serde(default)]
    pub access: AccessTable,
    pub created: i64,
    pub modified: i64,
}

impl ApiKey {
    /// Create a new key with the given title and access table
    pub fn new(title: impl Into<String>, access: AccessTable) -> Self {
        let timestamp = now();
        Self {
            id: KeyId::new(),
            title: title.into(),
            access,
            created: timestamp,
            modified: timestamp,
        }
    }

    /// Validate title presence
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(ContentError::missing_field("title"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::actions;

    #[test]
    fn test_validate() {
        let key = ApiKey::new("frontend", AccessTable::new());
        assert!(key.validate().is_ok());

        let key = ApiKey::new("", AccessTable::new());
        assert!(key.validate().is_err());
    }

    #[test]
    fn test_round_trip_keeps_access() {
        let access = AccessTable::new().grant("media", &[actions::VIEW]);
        let key = ApiKey::new("frontend", access);

        let json = serde_json::to_string(&key).unwrap();
        let parsed: ApiKey = serde_json::from_str(&json).unwrap();
        assert!(parsed.access.can_access("media", actions::VIEW));
    }
}
