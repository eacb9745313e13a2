//! Price impact of a trade expressed in basis points of the output reserve

use engine_config::fees::BASIS_POINTS;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::{AmmError, Result};
use crate::math::mul_div_floor;
use crate::quote::QuoteMath;

/// Price impact estimator
pub struct PriceImpact;

impl PriceImpact {
    /// Share of `reserve_out` a trade of `amount_in` would remove, in bps
    ///
    /// The hypothetical output is computed without a fee so the figure
    /// depends only on trade size and pool depth. Clamped to 10_000.
    pub fn price_impact_bps(amount_in: u128, reserve_in: u128, reserve_out: u128) -> Result<u32> {
        let amount_out = QuoteMath::amount_out(amount_in, reserve_in, reserve_out, 0)?;
        Self::output_impact_bps(amount_out, reserve_out)
    }

    /// Impact of removing `amount_out` from `reserve_out`, in bps
    pub fn output_impact_bps(amount_out: u128, reserve_out: u128) -> Result<u32> {
        if reserve_out == 0 {
            return Err(AmmError::invalid("reserves must be positive"));
        }
        let bps = mul_div_floor(
            amount_out,
            u128::from(BASIS_POINTS),
            reserve_out,
            "price_impact",
        )?;
        // Bounded by BASIS_POINTS, so the narrowing cannot truncate
        Ok(bps.min(u128::from(BASIS_POINTS)) as u32)
    }

    /// Marginal price of the input token in units of the output token
    pub fn spot_price(reserve_in: u128, reserve_out: u128) -> Result<Decimal> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::invalid("reserves must be positive"));
        }
        let reserve_in = Decimal::from_u128(reserve_in).ok_or(AmmError::overflow("spot_price"))?;
        let reserve_out =
            Decimal::from_u128(reserve_out).ok_or(AmmError::overflow("spot_price"))?;
        reserve_out
            .checked_div(reserve_in)
            .ok_or(AmmError::overflow("spot_price"))
    }
}
