//! Engine Configuration Module
//!
//! Provides configuration loading for the pricing engine.
//! Supports loading from TOML files with environment-specific overrides.

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{fees, mev, quote, rewards};

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Quote pipeline settings
    pub quote: QuoteSettings,

    /// Front-running heuristic thresholds
    pub mev: MevSettings,

    /// Reward boost settings
    pub rewards: RewardSettings,
}

/// Quote pipeline settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct QuoteSettings {
    /// Slippage tolerance applied when a request does not carry one
    pub default_slippage_bps: u32,
}

/// Thresholds for the MEV risk heuristics
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct MevSettings {
    pub size_threshold_bps: u32,
    pub frequency_window_ms: u64,
    pub frequency_limit: usize,
    pub sandwich_window_ms: u64,
    /// Capacity for caller-owned trade windows
    pub trade_window_capacity: usize,
}

/// Reward boost settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct RewardSettings {
    pub max_boost: Decimal,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            default_slippage_bps: quote::DEFAULT_SLIPPAGE_BPS,
        }
    }
}

impl Default for MevSettings {
    fn default() -> Self {
        Self {
            size_threshold_bps: mev::SIZE_THRESHOLD_BPS,
            frequency_window_ms: mev::FREQUENCY_WINDOW_MS,
            frequency_limit: mev::FREQUENCY_LIMIT,
            sandwich_window_ms: mev::SANDWICH_WINDOW_MS,
            trade_window_capacity: mev::TRADE_WINDOW_CAPACITY,
        }
    }
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            max_boost: rewards::MAX_BOOST,
        }
    }
}

impl EngineConfig {
    /// Load configuration from files with environment overrides
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new("config/engine.toml"));

        info!("Loading engine config: {:?}", base);
        let mut builder = Config::builder().add_source(File::from(base).required(true));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = PathBuf::from("config/environments").join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (AMM_ prefix, e.g. AMM_MEV__FREQUENCY_LIMIT)
        builder = builder.add_source(
            Environment::with_prefix("AMM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the math modules cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.quote.default_slippage_bps > fees::BASIS_POINTS {
            bail!(
                "default_slippage_bps {} exceeds {}",
                self.quote.default_slippage_bps,
                fees::BASIS_POINTS
            );
        }
        if self.mev.size_threshold_bps > fees::BASIS_POINTS {
            bail!(
                "size_threshold_bps {} exceeds {}",
                self.mev.size_threshold_bps,
                fees::BASIS_POINTS
            );
        }
        if self.mev.frequency_window_ms == 0 || self.mev.sandwich_window_ms == 0 {
            bail!("MEV windows must be non-zero");
        }
        if self.mev.trade_window_capacity == 0 {
            bail!("trade_window_capacity must be non-zero");
        }
        if self.rewards.max_boost < Decimal::ONE {
            bail!("max_boost {} is below 1", self.rewards.max_boost);
        }

        debug!(config = ?self, "Engine configuration validated");
        Ok(())
    }

    /// Serialize back to TOML, e.g. to dump the effective configuration
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<EngineConfig> {
    EngineConfig::load(None, environment)
}
