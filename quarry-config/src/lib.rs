//! Process configuration for Quarry
//!
//! Merges three layers with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A `quarry.toml` file in the working directory
//! 3. `QUARRY_*` environment variables (nested keys split on `__`, e.g.
//!    `QUARRY_UPLOAD__PUBLIC_URL`)
//!
//! The loaded value is passed explicitly into the engine
//! (`ContentContext::new(root, config)`) — validation and enrichment never
//! read ambient global state.

mod error;

pub use error::{ConfigError, Result};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Top-level Quarry configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarryConfig {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub hooks: HookConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

/// Where uploaded files live and how they are served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are stored under
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    /// Public base URL media paths are resolved against
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

/// Outbound webhook behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Per-delivery timeout in seconds
    #[serde(default = "default_hook_timeout")]
    pub timeout_secs: u64,
}

/// Content engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Locale seeded when a store is initialized
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_upload_dir() -> String {
    "uploads".into()
}

fn default_public_url() -> String {
    "http://localhost:8090/uploads".into()
}

fn default_hook_timeout() -> u64 {
    10
}

fn default_locale() -> String {
    "en".into()
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            public_url: default_public_url(),
        }
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_hook_timeout(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
        }
    }
}

impl QuarryConfig {
    /// Load configuration from all layers.
    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("quarry.toml"))
            .merge(Env::prefixed("QUARRY_").split("__"))
    }
}
