//! Tunables shared by the application services.

use std::time::Duration;

use crate::config::Config;
use crate::domain::entities::DedupScope;
use crate::utils::code_generator::DEFAULT_CODE_LENGTH;

/// Runtime settings for the allocator and resolver.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Public address short URLs are built from, without a trailing slash.
    pub base_url: String,
    pub code_length: usize,
    /// Total insert attempts before allocation gives up on collisions.
    pub max_code_attempts: usize,
    pub dedup_scope: DedupScope,
    /// Deadline applied to every individual store call.
    pub store_timeout: Duration,
}

impl ServiceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            code_length: config.code_length,
            max_code_attempts: config.max_code_attempts,
            dedup_scope: config.dedup_scope,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: 5,
            dedup_scope: DedupScope::Global,
            store_timeout: Duration::from_secs(5),
        }
    }
}
