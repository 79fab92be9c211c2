//! Media commands: metadata record lifecycle
//!
//! Upload handling, mime sniffing and thumbnail generation live in the file
//! layer. The engine manages the metadata documents that media fields
//! reference, and rewrites stored paths to public URLs on the way out.

mod add;
mod delete;
mod list;
mod update;

pub use add::AddMedia;
pub use delete::DeleteMedia;
pub use list::ListMedia;
pub use update::UpdateMedia;
