//! Strongly-typed ULID identifiers for stored documents.
//!
//! Newtypes keep the different document kinds from mixing; the string form
//! is the canonical 26-character ULID, which doubles as the file stem on
//! disk and as the per-collection group key in access tables.

use std::fmt;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Ulid);

        impl $name {
            /// Generate a fresh identifier
            pub fn new() -> Self {
                Self(Ulid::new())
            }

            /// Parse the canonical 26-character string form
            pub fn parse(value: &str) -> Option<Self> {
                Ulid::from_string(value).ok().map(Self)
            }

            /// The raw ULID
            pub fn as_ulid(&self) -> Ulid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<Ulid> for $name {
            fn from(id: Ulid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifies a collection (content type)
    CollectionId
);
define_id!(
    /// Identifies an entity (content record)
    EntityId
);
define_id!(
    /// Identifies a language
    LanguageId
);
define_id!(
    /// Identifies a media record
    MediaId
);
define_id!(
    /// Identifies an API key
    KeyId
);
