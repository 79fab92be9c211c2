//! Outbound webhook dispatch.
//!
//! Collections carry optional create/update/delete hook URLs. After a
//! primary write succeeds, the matching hook is dispatched in the background
//! — the response never waits on delivery, and a failed delivery is logged
//! and dropped, never retried or surfaced to the caller.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Resource kind a webhook reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookResource {
    Collection,
    Entity,
}

/// Lifecycle action a webhook reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookAction {
    Create,
    Update,
    Delete,
}

/// Webhook payload POSTed as JSON to the configured URL.
#[derive(Debug, Clone, Serialize)]
pub struct Hook {
    #[serde(rename = "type")]
    pub resource: HookResource,
    pub action: HookAction,
    pub data: Value,
}

/// Deliver one webhook and report the outcome to the caller.
pub async fn send_hook(url: &str, hook: &Hook, timeout: Duration) -> reqwest::Result<()> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    client
        .post(url)
        .json(hook)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Dispatch a webhook in the background, fire-and-forget.
///
/// No-op when the collection has no URL configured for this action.
pub fn dispatch(
    url: Option<&str>,
    resource: HookResource,
    action: HookAction,
    data: Value,
    timeout_secs: u64,
) {
    let Some(url) = url else { return };
    if url.is_empty() {
        return;
    }

    let url = url.to_string();
    tokio::spawn(async move {
        let hook = Hook {
            resource,
            action,
            data,
        };
        if let Err(error) = send_hook(&url, &hook, Duration::from_secs(timeout_secs)).await {
            warn!(%url, %error, "webhook delivery failed");
        }
    });
}
