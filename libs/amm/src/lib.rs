//! # AMM Engine - Constant Product Pricing & Liquidity Mathematics
//!
//! ## Purpose
//!
//! Side-effect-free calculation library for a constant product (x*y=k)
//! automated market maker with a dynamic fee surcharge: swap quotes, price
//! impact, adaptive fees, optimal deposits, minted and burned liquidity
//! shares, slippage bounds, front-running risk flags, and staking yield.
//!
//! ## Integration Points
//!
//! - **Input Sources**: pool snapshots and recent-trade windows supplied by a
//!   request-handling layer
//! - **Output Destinations**: quotes and liquidity plans returned to the
//!   caller, who applies them atomically against authoritative pool state
//! - **Precision**: amounts are `u128` smallest units; products are formed
//!   in 256 bits before a single division (no floating point)
//! - **Rounding**: outputs round down, required inputs round up
//!
//! ## Architecture Role
//!
//! ```text
//! PoolSnapshot ─► QuoteMath ─► PriceImpact ─► DynamicFee ─► SwapQuote
//!       │                                                  ▲
//!       │          TradeRecord[] ─► MevRiskAssessor ───────┘
//!       └──────► LiquidityMath (deposits, mint, burn)
//!                YieldCalculator (APY, boost)      independent
//! ```
//!
//! Every function is a pure computation over explicit inputs; the engine
//! holds no shared mutable state and is safe to call from any number of
//! threads.

pub mod dynamic_fee;
pub mod error;
pub mod liquidity;
pub(crate) mod math;
pub mod mev_risk;
pub mod pipeline;
pub mod pool_traits;
pub mod price_impact;
pub mod quote;
pub mod yield_calc;

pub use dynamic_fee::DynamicFee;
pub use error::{AmmError, Result};
pub use liquidity::{LiquidityMath, LiquidityPlan};
pub use mev_risk::{assess_mev_risk, MevAssessment, MevRiskAssessor, TradeRecord, TradeWindow};
pub use pipeline::{PricingEngine, SwapQuote, SwapRequest};
pub use pool_traits::{AmmPool, PoolSnapshot};
pub use price_impact::PriceImpact;
pub use quote::QuoteMath;
pub use yield_calc::{boosted_rewards, YieldCalculator};

/// Shared constants and configuration
pub use engine_config::{fees, liquidity as liquidity_constants, EngineConfig};

/// Common types for yield calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
