//! Constant product (x*y=k) swap math with exact integer rounding
//!
//! Output amounts round down and input amounts round up, so the pool is
//! never under-compensated on either side of a trade.

use engine_config::fees::{BASIS_POINTS, FEE_DENOMINATOR};

use crate::error::{AmmError, Result};
use crate::math::{add, mul, mul_div_ceil, mul_div_floor, narrow, wide};

/// Constant product quote calculator
pub struct QuoteMath;

impl QuoteMath {
    /// Calculate exact output amount for a given input using x*y=k
    ///
    /// # Arguments
    /// * `amount_in` - Input token amount (smallest unit)
    /// * `reserve_in` - Input token reserve
    /// * `reserve_out` - Output token reserve
    /// * `fee_rate_bps` - Fee in basis points (30 = 0.3%)
    ///
    /// # Returns
    /// Output amount after fees, rounded down
    pub fn amount_out(
        amount_in: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_rate_bps: u32,
    ) -> Result<u128> {
        if amount_in == 0 {
            return Err(AmmError::invalid("input amount must be positive"));
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::invalid("reserves must be positive"));
        }
        validate_bps(fee_rate_bps)?;

        let fee_multiplier = wide(u128::from(FEE_DENOMINATOR - fee_rate_bps));
        let amount_in_with_fee = mul(wide(amount_in), fee_multiplier, "amount_out")?;

        // output = (amount_in_with_fee * reserve_out) / (reserve_in * D + amount_in_with_fee)
        let numerator = mul(amount_in_with_fee, wide(reserve_out), "amount_out")?;
        let denominator = add(
            mul(wide(reserve_in), wide(u128::from(FEE_DENOMINATOR)), "amount_out")?,
            amount_in_with_fee,
            "amount_out",
        )?;

        narrow(numerator / denominator, "amount_out")
    }

    /// Calculate required input amount for a desired output (reverse calculation)
    ///
    /// The trailing `+ 1` rounds up so the required input is never short.
    pub fn amount_in(
        amount_out: u128,
        reserve_in: u128,
        reserve_out: u128,
        fee_rate_bps: u32,
    ) -> Result<u128> {
        if amount_out == 0 {
            return Err(AmmError::invalid("output amount must be positive"));
        }
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::invalid("reserves must be positive"));
        }
        if amount_out >= reserve_out {
            return Err(AmmError::PoolDrained {
                amount_out,
                reserve_out,
            });
        }
        validate_bps(fee_rate_bps)?;
        if fee_rate_bps == FEE_DENOMINATOR {
            return Err(AmmError::invalid("fee rate of 100% admits no output"));
        }

        let numerator = mul(
            mul(wide(reserve_in), wide(amount_out), "amount_in")?,
            wide(u128::from(FEE_DENOMINATOR)),
            "amount_in",
        )?;
        let denominator = mul(
            wide(reserve_out - amount_out),
            wide(u128::from(FEE_DENOMINATOR - fee_rate_bps)),
            "amount_in",
        )?;

        narrow(numerator / denominator, "amount_in")?
            .checked_add(1)
            .ok_or(AmmError::overflow("amount_in"))
    }

    /// Proportional counterpart of `amount_a` at the current reserve ratio, no fee
    pub fn quote(amount_a: u128, reserve_a: u128, reserve_b: u128) -> Result<u128> {
        if amount_a == 0 {
            return Err(AmmError::InsufficientAmount {
                optimal: 0,
                minimum: 1,
            });
        }
        if reserve_a == 0 || reserve_b == 0 {
            return Err(AmmError::invalid("reserves must be positive"));
        }
        mul_div_floor(amount_a, reserve_b, reserve_a, "quote")
    }

    /// Lowest acceptable output for a slippage tolerance, rounded down
    pub fn minimum_amount_out(amount_out: u128, slippage_bps: u32) -> Result<u128> {
        validate_bps(slippage_bps)?;
        mul_div_floor(
            amount_out,
            u128::from(BASIS_POINTS - slippage_bps),
            u128::from(BASIS_POINTS),
            "minimum_amount_out",
        )
    }

    /// Highest acceptable input for a slippage tolerance, rounded up
    pub fn maximum_amount_in(amount_in: u128, slippage_bps: u32) -> Result<u128> {
        validate_bps(slippage_bps)?;
        mul_div_ceil(
            amount_in,
            u128::from(BASIS_POINTS + slippage_bps),
            u128::from(BASIS_POINTS),
            "maximum_amount_in",
        )
    }
}

/// Basis-point fields must lie in [0, 10_000]
pub(crate) fn validate_bps(bps: u32) -> Result<()> {
    if bps > BASIS_POINTS {
        return Err(AmmError::invalid("basis points exceed 10000"));
    }
    Ok(())
}
