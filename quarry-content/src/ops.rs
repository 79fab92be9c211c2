//! Command execution contract.
//!
//! Operations are structs where the fields ARE the parameters. Each command
//! implements [`Execute`] against a context and returns its JSON result;
//! commands do all the work, contexts only provide data access.

pub use async_trait::async_trait;

use serde_json::Value;

/// Execute an operation against a context.
#[async_trait]
pub trait Execute<C, E> {
    /// Run the operation, returning its JSON result.
    async fn execute(&self, ctx: &C) -> std::result::Result<Value, E>;
}
