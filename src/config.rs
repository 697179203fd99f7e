// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatcher settings.
//!
//! ```toml
//! enable = true
//! default_secbit = 2048
//! require_commitment = false
//! ```
//!
//! Missing keys fall back to [`Config::default`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::keypair::RECOMMENDED_SECURITY_BITS;

/// Errors raised while loading a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// When false every dispatched call fails with `Disabled`.
    pub enable: bool,
    /// Modulus size used by `KeyGen` when the caller omits `secbit`.
    pub default_secbit: usize,
    /// Reject homomorphic calls whose ciphertexts carry no commitment.
    pub require_commitment: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable: true,
            default_secbit: RECOMMENDED_SECURITY_BITS,
            require_commitment: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
