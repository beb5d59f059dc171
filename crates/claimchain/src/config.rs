//! Registry configuration.

use serde::{Deserialize, Serialize};

use claimchain_core::{DEFAULT_CHALLENGE_TAG, DEFAULT_GENESIS_NOTE, DEFAULT_VALIDATION_WINDOW_SECS};

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Seconds a challenge stays valid after issuance.
    pub validation_window_secs: i64,
    /// Third field of every challenge message.
    pub challenge_tag: String,
    /// Note stored in the genesis block.
    pub genesis_note: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            validation_window_secs: DEFAULT_VALIDATION_WINDOW_SECS,
            challenge_tag: DEFAULT_CHALLENGE_TAG.to_string(),
            genesis_note: DEFAULT_GENESIS_NOTE.to_string(),
        }
    }
}

impl RegistryConfig {
    /// Check that issued challenges will parse back.
    pub fn validate(&self) -> Result<()> {
        if self.validation_window_secs <= 0 {
            return Err(RegistryError::InvalidConfig(format!(
                "validation window must be positive, got {}",
                self.validation_window_secs
            )));
        }
        if self.challenge_tag.is_empty() || self.challenge_tag.contains(':') {
            return Err(RegistryError::InvalidConfig(format!(
                "challenge tag {:?} must be non-empty and free of ':'",
                self.challenge_tag
            )));
        }
        Ok(())
    }
}
