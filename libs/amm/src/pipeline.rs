//! Swap quote pipeline
//!
//! Composes the independent stages into one quote:
//!
//! ```text
//! amount ─► price impact ─► dynamic fee ─► amount out/in ─► slippage bound
//!                                                         └► MEV flag
//! ```
//!
//! Each stage stays callable on its own; this module only wires them
//! together and applies the configured defaults.

use engine_config::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dynamic_fee::DynamicFee;
use crate::error::{AmmError, Result};
use crate::mev_risk::{MevRiskAssessor, TradeRecord, TradeWindow};
use crate::pool_traits::PoolSnapshot;
use crate::price_impact::PriceImpact;
use crate::quote::{validate_bps, QuoteMath};
use crate::yield_calc::YieldCalculator;

/// A requested swap, exact-in or exact-out depending on the entry point
#[derive(Debug, Clone, Copy)]
pub struct SwapRequest<'a> {
    /// Input amount for exact-in, desired output for exact-out
    pub amount: u128,
    pub volatility_index: u32,
    /// Falls back to the configured default when `None`
    pub slippage_bps: Option<u32>,
    /// Caller's trades before this one, oldest first
    pub recent_trades: &'a [TradeRecord],
    pub user: &'a str,
    pub now_ms: u64,
}

impl<'a> SwapRequest<'a> {
    pub fn new(amount: u128, user: &'a str, now_ms: u64) -> Self {
        Self {
            amount,
            volatility_index: 0,
            slippage_bps: None,
            recent_trades: &[],
            user,
            now_ms,
        }
    }

    pub fn with_volatility(mut self, volatility_index: u32) -> Self {
        self.volatility_index = volatility_index;
        self
    }

    pub fn with_slippage_bps(mut self, slippage_bps: u32) -> Self {
        self.slippage_bps = Some(slippage_bps);
        self
    }

    pub fn with_recent_trades(mut self, recent_trades: &'a [TradeRecord]) -> Self {
        self.recent_trades = recent_trades;
        self
    }
}

/// Result of a quote; produced fresh per call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_in: u128,
    pub amount_out: u128,
    pub price_impact_bps: u32,
    pub dynamic_fee_bps: u32,
    /// Slippage-bounded output (equals `amount_out` for exact-out quotes)
    pub minimum_amount_out: u128,
    /// Slippage-bounded input (equals `amount_in` for exact-in quotes)
    pub maximum_amount_in: u128,
    pub mev_risk: bool,
}

/// Stateless pricing engine carrying operational settings
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: EngineConfig,
    assessor: MevRiskAssessor,
    rewards: YieldCalculator,
}

impl PricingEngine {
    pub fn new(config: EngineConfig) -> Self {
        let assessor = MevRiskAssessor::new(config.mev.clone());
        let rewards = YieldCalculator::new(&config.rewards);
        Self {
            config,
            assessor,
            rewards,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mev_assessor(&self) -> &MevRiskAssessor {
        &self.assessor
    }

    /// Empty trade window sized by the configured capacity
    ///
    /// Callers own the window: pass it to each quote, then record the trade.
    pub fn trade_window(&self) -> TradeWindow {
        TradeWindow::from_settings(self.assessor.settings())
    }

    /// Yield calculator carrying the configured `max_boost`
    ///
    /// Not used by the quote paths; this is the entry point for boosted
    /// rewards under the loaded configuration.
    pub fn yield_calculator(&self) -> &YieldCalculator {
        &self.rewards
    }

    /// Quote a swap of exactly `request.amount` input tokens
    pub fn quote_exact_in(
        &self,
        pool: &PoolSnapshot,
        request: &SwapRequest<'_>,
    ) -> Result<SwapQuote> {
        let slippage_bps = self.slippage(request)?;

        let price_impact_bps =
            PriceImpact::price_impact_bps(request.amount, pool.reserve_in, pool.reserve_out)?;
        trace!(price_impact_bps, "Price impact stage");

        let dynamic_fee_bps = DynamicFee::dynamic_fee_bps(
            pool.base_fee_rate_bps,
            price_impact_bps,
            request.volatility_index,
        );
        trace!(dynamic_fee_bps, "Dynamic fee stage");

        let amount_out = QuoteMath::amount_out(
            request.amount,
            pool.reserve_in,
            pool.reserve_out,
            dynamic_fee_bps,
        )?;
        let minimum_amount_out = QuoteMath::minimum_amount_out(amount_out, slippage_bps)?;

        let quote = SwapQuote {
            amount_in: request.amount,
            amount_out,
            price_impact_bps,
            dynamic_fee_bps,
            minimum_amount_out,
            maximum_amount_in: request.amount,
            mev_risk: self.mev_risk(pool, request.amount, request),
        };
        debug!(
            reserve_in = %pool.reserve_in,
            reserve_out = %pool.reserve_out,
            amount_in = %quote.amount_in,
            amount_out = %quote.amount_out,
            price_impact_bps,
            dynamic_fee_bps,
            mev_risk = quote.mev_risk,
            "Exact-in quote"
        );
        Ok(quote)
    }

    /// Quote the input needed to receive exactly `request.amount` output tokens
    pub fn quote_exact_out(
        &self,
        pool: &PoolSnapshot,
        request: &SwapRequest<'_>,
    ) -> Result<SwapQuote> {
        let slippage_bps = self.slippage(request)?;

        if request.amount == 0 {
            return Err(AmmError::invalid("output amount must be positive"));
        }
        if request.amount >= pool.reserve_out {
            return Err(AmmError::PoolDrained {
                amount_out: request.amount,
                reserve_out: pool.reserve_out,
            });
        }

        let price_impact_bps = PriceImpact::output_impact_bps(request.amount, pool.reserve_out)?;
        trace!(price_impact_bps, "Price impact stage");

        let dynamic_fee_bps = DynamicFee::dynamic_fee_bps(
            pool.base_fee_rate_bps,
            price_impact_bps,
            request.volatility_index,
        );
        trace!(dynamic_fee_bps, "Dynamic fee stage");

        let amount_in = QuoteMath::amount_in(
            request.amount,
            pool.reserve_in,
            pool.reserve_out,
            dynamic_fee_bps,
        )?;
        let maximum_amount_in = QuoteMath::maximum_amount_in(amount_in, slippage_bps)?;

        let quote = SwapQuote {
            amount_in,
            amount_out: request.amount,
            price_impact_bps,
            dynamic_fee_bps,
            minimum_amount_out: request.amount,
            maximum_amount_in,
            mev_risk: self.mev_risk(pool, amount_in, request),
        };
        debug!(
            reserve_in = %pool.reserve_in,
            reserve_out = %pool.reserve_out,
            amount_in = %quote.amount_in,
            amount_out = %quote.amount_out,
            price_impact_bps,
            dynamic_fee_bps,
            mev_risk = quote.mev_risk,
            "Exact-out quote"
        );
        Ok(quote)
    }

    fn slippage(&self, request: &SwapRequest<'_>) -> Result<u32> {
        let slippage_bps = request
            .slippage_bps
            .unwrap_or(self.config.quote.default_slippage_bps);
        validate_bps(slippage_bps)?;
        Ok(slippage_bps)
    }

    fn mev_risk(&self, pool: &PoolSnapshot, amount_in: u128, request: &SwapRequest<'_>) -> bool {
        self.assessor
            .assess(
                amount_in,
                pool.reserve_in,
                request.recent_trades,
                request.user,
                request.now_ms,
            )
            .is_risky()
    }
}
