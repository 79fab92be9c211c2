//! Typed field registry for collection schemas
//!
//! `quarry-fields` is a standalone, schema-only crate: it owns the closed set
//! of supported field types, the per-type `meta` configuration shapes, and the
//! runtime casting/emptiness rules derived from them. It knows nothing about
//! storage or locales; the content engine layers those on top.
//!
//! # Architecture
//!
//! - **Schema-only**: Owns field definitions, not field values
//! - **Closed type set**: plain, switch, checklist, select, date, editor,
//!   media, relation, selected by a [`FieldType`] enum
//! - **Total casting**: [`Field::cast_value`] never fails; it also runs over
//!   legacy content at read time, so every input maps onto the type's
//!   canonical shape
//! - **Fallible meta**: decoding a field's raw `meta` payload into its typed
//!   form is the only step that can error, and it runs at schema-save time

pub mod cast;
pub mod error;
pub mod meta;
pub mod types;

pub use cast::{id_list, string_list};
pub use error::{FieldError, Result};
pub use meta::{
    ChecklistMeta, DateMeta, DateMode, EditorMeta, EditorMode, FieldMeta, FieldOption, MediaMeta,
    RelationMeta, SelectMeta,
};
pub use types::{ensure_unique_keys, is_identifier, Field, FieldType};
