//! # AMM Engine Configuration
//!
//! Centralized constants and operational configuration for the pricing and
//! liquidity engine, so every module agrees on the same denominators and
//! thresholds.
//!
//! ## Features
//!
//! - **Constants**: basis-point denominator, locked minimum liquidity, fee and
//!   boost caps, MEV heuristic defaults
//! - **Engine Configuration**: TOML file + environment overlay + `AMM_`
//!   environment variables, validated before use
//!
//! ## Usage
//!
//! ```rust
//! use engine_config::{fees, liquidity, EngineConfig};
//!
//! assert_eq!(fees::BASIS_POINTS, 10_000);
//! assert_eq!(liquidity::MINIMUM_LIQUIDITY, 1_000);
//!
//! let config = EngineConfig::default();
//! assert!(config.validate().is_ok());
//! ```

pub mod constants;
pub mod engine_config;

// Re-export commonly used types
pub use constants::*;
pub use engine_config::{load_config, EngineConfig, MevSettings, QuoteSettings, RewardSettings};
