//! Adaptive fee surcharge driven by price impact and volatility
//!
//! `fee = base * (1 + impact/1000) * (1 + volatility/100)`, capped at 10%.
//! Evaluated as one integer product over a single division so the result is
//! exact up to the final floor.

use engine_config::fees::{
    BASIS_POINTS, IMPACT_MULTIPLIER_SCALE, MAX_DYNAMIC_FEE_BPS, MAX_VOLATILITY_INDEX,
    VOLATILITY_MULTIPLIER_SCALE,
};

/// Dynamic fee engine
pub struct DynamicFee;

impl DynamicFee {
    /// Adjusted fee rate in bps
    ///
    /// Out-of-range inputs are clamped rather than rejected: base fee and
    /// impact to 10_000, volatility to `MAX_VOLATILITY_INDEX`. Monotonic
    /// non-decreasing in both `price_impact_bps` and `volatility_index`.
    pub fn dynamic_fee_bps(
        base_fee_rate_bps: u32,
        price_impact_bps: u32,
        volatility_index: u32,
    ) -> u32 {
        let base = u128::from(base_fee_rate_bps.min(BASIS_POINTS));
        let impact = u128::from(price_impact_bps.min(BASIS_POINTS));
        let volatility = u128::from(volatility_index.min(MAX_VOLATILITY_INDEX));

        let impact_scale = u128::from(IMPACT_MULTIPLIER_SCALE);
        let volatility_scale = u128::from(VOLATILITY_MULTIPLIER_SCALE);

        // Max 10_000 * 11_000 * 10_100, well inside u128
        let fee = base * (impact_scale + impact) * (volatility_scale + volatility)
            / (impact_scale * volatility_scale);

        fee.min(u128::from(MAX_DYNAMIC_FEE_BPS)) as u32
    }
}
