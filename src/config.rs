// src/config.rs
// =============================================================================
// Verifier settings, optionally loaded from a TOML file.
//
// Example file:
//
//   timeout_ms = 5000
//   max_redirects = 5
//
//   [[platforms]]
//   name = "Amazon"
//   pattern = '^(https?://)?(www\.)?amazon\.[a-z.]{2,6}/.+'
//
// Every field is optional; anything missing falls back to the defaults
// below. When `platforms` is absent the builtin trust list is used.
// Validation happens here, once, so a bad file stops the process at startup.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::trust::{PlatformSpec, TrustList};

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_USER_AGENT: &str = concat!("link-verifier/", env!("CARGO_PKG_VERSION"));

/// Settings for one `LinkVerifier`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Per-probe timeout in milliseconds
    pub timeout_ms: u64,
    /// How many extra redirect hops the confirming GET may follow
    pub max_redirects: usize,
    /// Upper bound on verifications running at once in `verify_many`
    pub concurrency: usize,
    /// User-Agent header sent with every probe
    pub user_agent: String,
    /// Trusted platforms in priority order (None = builtin list)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<PlatformSpec>>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            concurrency: DEFAULT_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            platforms: None,
        }
    }
}

impl VerifierConfig {
    // Reads and validates a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let cfg = Self::from_toml_str(&data)?;
        tracing::info!("loaded verifier config from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: VerifierConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroValue { field: "timeout_ms" });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroValue { field: "concurrency" });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    // Compiles the configured trust list (or the builtin one)
    pub fn trust_list(&self) -> Result<TrustList, ConfigError> {
        match &self.platforms {
            Some(specs) => TrustList::from_specs(specs),
            None => Ok(TrustList::builtin()),
        }
    }
}
