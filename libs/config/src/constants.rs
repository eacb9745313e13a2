//! Process-wide constants shared by every pricing module
//!
//! These never change at runtime. Anything an operator may want to tune lives
//! in [`EngineConfig`](crate::EngineConfig) instead, with these values as its
//! defaults.

/// Fee and basis-point constants
pub mod fees {
    /// 10_000 bps = 100%
    pub const BASIS_POINTS: u32 = 10_000;

    /// Denominator applied to fee rates in swap math (same scale as bps)
    pub const FEE_DENOMINATOR: u32 = BASIS_POINTS;

    /// Hard ceiling for the dynamic fee (10%)
    pub const MAX_DYNAMIC_FEE_BPS: u32 = 1_000;

    /// Volatility index values above this are clamped
    pub const MAX_VOLATILITY_INDEX: u32 = 10_000;

    /// Impact divisor: 1% impact (100 bps) adds 0.1 to the multiplier
    pub const IMPACT_MULTIPLIER_SCALE: u32 = 1_000;

    /// Volatility divisor: index 100 doubles the fee
    pub const VOLATILITY_MULTIPLIER_SCALE: u32 = 100;
}

/// Liquidity share constants
pub mod liquidity {
    /// Shares permanently locked on the first deposit into an empty pool
    pub const MINIMUM_LIQUIDITY: u128 = 1_000;
}

/// Front-running heuristic defaults
pub mod mev {
    /// Trades above 5% of the input reserve are flagged
    pub const SIZE_THRESHOLD_BPS: u32 = 500;

    /// Look-back window for the per-user frequency rule
    pub const FREQUENCY_WINDOW_MS: u64 = 60_000;

    /// Flag when a user has more than this many trades in the window
    pub const FREQUENCY_LIMIT: usize = 3;

    /// A foreign trade this recent counts as a possible sandwich leg
    pub const SANDWICH_WINDOW_MS: u64 = 10_000;

    /// Default capacity of a caller-owned trade window
    pub const TRADE_WINDOW_CAPACITY: usize = 256;
}

/// Reward and yield constants
pub mod rewards {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// 365 * 24 * 60 * 60
    pub const SECONDS_PER_YEAR: u64 = 31_536_000;

    /// Cap on the governance-stake reward multiplier
    pub const MAX_BOOST: Decimal = dec!(2.5);
}

/// Quote pipeline defaults
pub mod quote {
    /// 0.5% slippage tolerance when the request leaves it unset
    pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denominators_agree() {
        assert_eq!(fees::FEE_DENOMINATOR, fees::BASIS_POINTS);
        assert!(fees::MAX_DYNAMIC_FEE_BPS <= fees::BASIS_POINTS);
        assert!(quote::DEFAULT_SLIPPAGE_BPS <= fees::BASIS_POINTS);
    }

    #[test]
    fn test_year_length() {
        assert_eq!(rewards::SECONDS_PER_YEAR, 365 * 24 * 60 * 60);
    }
}
