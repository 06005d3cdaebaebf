//! Registry configuration from environment variables.

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Default largest accepted batch read.
pub const DEFAULT_MAX_BATCH_SIZE: u64 = 50;

/// Errors from loading or validating configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Batch reads must allow at least one record.
    #[error("max_batch_size must be at least 1")]
    InvalidBatchSize,

    /// An environment variable could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },
}

/// Deployment-time settings of one registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Collection name reported by `name()`.
    pub collection_name: String,

    /// Collection symbol reported by `symbol()`.
    pub collection_symbol: String,

    /// Largest `count` accepted by batch reads.
    pub max_batch_size: u64,

    /// Initial value of the minting pause.
    pub minting_paused_at_start: bool,

    /// Initial value of the global pause.
    pub paused_at_start: bool,

    /// Strict variant: the global pause also blocks mint, update and
    /// maintenance.
    pub pause_blocks_mutations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            collection_name: "CarLife NFT".to_string(),
            collection_symbol: "CLFT".to_string(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            minting_paused_at_start: true,
            paused_at_start: false,
            pause_blocks_mutations: false,
        }
    }
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CARLIFE_COLLECTION_NAME`: Collection name (default: CarLife NFT)
    /// - `CARLIFE_COLLECTION_SYMBOL`: Collection symbol (default: CLFT)
    /// - `CARLIFE_MAX_BATCH_SIZE`: Largest batch read (default: 50)
    /// - `CARLIFE_MINTING_PAUSED`: Minting paused at start (default: true)
    /// - `CARLIFE_PAUSED`: Globally paused at start (default: false)
    /// - `CARLIFE_STRICT_PAUSE`: Global pause blocks mutations (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            collection_name: lookup("CARLIFE_COLLECTION_NAME")
                .unwrap_or(defaults.collection_name),
            collection_symbol: lookup("CARLIFE_COLLECTION_SYMBOL")
                .unwrap_or(defaults.collection_symbol),
            max_batch_size: parse_var(&lookup, "CARLIFE_MAX_BATCH_SIZE")?
                .unwrap_or(defaults.max_batch_size),
            minting_paused_at_start: flag_var(&lookup, "CARLIFE_MINTING_PAUSED")?
                .unwrap_or(defaults.minting_paused_at_start),
            paused_at_start: flag_var(&lookup, "CARLIFE_PAUSED")?
                .unwrap_or(defaults.paused_at_start),
            pause_blocks_mutations: flag_var(&lookup, "CARLIFE_STRICT_PAUSE")?
                .unwrap_or(defaults.pause_blocks_mutations),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize);
        }
        Ok(())
    }

    /// Default settings with minting open, for tests and demos.
    #[must_use]
    pub fn minting_open() -> Self {
        Self {
            minting_paused_at_start: false,
            ..Self::default()
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .map(|value| {
            value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value,
            })
        })
        .transpose()
}

fn flag_var<F>(lookup: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            let normalized = value.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            }
        })
        .transpose()
}
