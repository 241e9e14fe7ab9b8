//! Runner configuration, read from an optional TOML file.
//!
//! ```toml
//! [token]
//! name = "Token"
//! symbol = "TKN"
//! decimals = 18
//!
//! [ledger]
//! approval_policy = "reject-zero-address"
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use erc20::{ApprovalPolicy, TokenMetadata, DEFAULT_DECIMALS};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    pub token: TokenConfig,
    pub ledger: LedgerConfig,
}

/// Metadata of the token a fresh ledger is created with, when the input
/// carries no token state of its own.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Token".to_owned(),
            symbol: "TKN".to_owned(),
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl TokenConfig {
    #[must_use]
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    pub approval_policy: ApprovalPolicy,
}

impl RunnerConfig {
    /// # Errors
    ///
    /// Errors on malformed TOML, unknown keys or an unknown approval policy.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> { Ok(toml::from_str(text)?) }

    /// Loads the config at `path`, or the defaults when there is none.
    ///
    /// # Errors
    ///
    /// Errors if a given file cannot be read or does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}
