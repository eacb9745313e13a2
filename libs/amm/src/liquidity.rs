//! Liquidity deposit, mint and withdrawal math
//!
//! Deposits are matched to the current reserve ratio before shares are
//! minted; shares are minted as the smaller of the two proportional
//! contributions so an imbalanced deposit never earns more than its weaker
//! side.

use engine_config::liquidity::MINIMUM_LIQUIDITY;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AmmError, Result};
use crate::math::{decimal_sqrt, isqrt, mul, mul_div_floor, narrow, wide};
use crate::quote::QuoteMath;

/// Optimal paired deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPlan {
    pub amount_a: u128,
    pub amount_b: u128,
}

/// Liquidity math functions
pub struct LiquidityMath;

impl LiquidityMath {
    /// Match desired deposit amounts to the pool's reserve ratio
    ///
    /// An empty pool (both reserves zero) accepts the desired amounts
    /// verbatim, which fixes its initial price.
    pub fn optimal_amounts(
        amount_a_desired: u128,
        amount_b_desired: u128,
        reserve_a: u128,
        reserve_b: u128,
        amount_a_min: u128,
        amount_b_min: u128,
    ) -> Result<LiquidityPlan> {
        if reserve_a == 0 && reserve_b == 0 {
            return Ok(LiquidityPlan {
                amount_a: amount_a_desired,
                amount_b: amount_b_desired,
            });
        }

        let amount_b_optimal = QuoteMath::quote(amount_a_desired, reserve_a, reserve_b)?;
        if amount_b_optimal <= amount_b_desired {
            if amount_b_optimal < amount_b_min {
                return Err(AmmError::InsufficientAmount {
                    optimal: amount_b_optimal,
                    minimum: amount_b_min,
                });
            }
            return Ok(LiquidityPlan {
                amount_a: amount_a_desired,
                amount_b: amount_b_optimal,
            });
        }

        let amount_a_optimal = QuoteMath::quote(amount_b_desired, reserve_b, reserve_a)?;
        if amount_a_optimal > amount_a_desired || amount_a_optimal < amount_a_min {
            return Err(AmmError::InsufficientAmount {
                optimal: amount_a_optimal,
                minimum: amount_a_min,
            });
        }

        Ok(LiquidityPlan {
            amount_a: amount_a_optimal,
            amount_b: amount_b_desired,
        })
    }

    /// Liquidity shares minted for a deposit
    ///
    /// First deposit: `sqrt(a * b) - MINIMUM_LIQUIDITY`, the locked remainder
    /// keeping the share price from being manipulated on an empty pool.
    /// Otherwise: `min(a * supply / reserve_a, b * supply / reserve_b)`.
    pub fn liquidity_mint(
        amount_a: u128,
        amount_b: u128,
        reserve_a: u128,
        reserve_b: u128,
        total_supply: u128,
    ) -> Result<u128> {
        let liquidity = if total_supply == 0 {
            let root = narrow(
                isqrt(mul(wide(amount_a), wide(amount_b), "liquidity_mint")?),
                "liquidity_mint",
            )?;
            root.saturating_sub(MINIMUM_LIQUIDITY)
        } else {
            if reserve_a == 0 || reserve_b == 0 {
                return Err(AmmError::invalid("reserves must be positive when supply exists"));
            }
            let share_a = mul_div_floor(amount_a, total_supply, reserve_a, "liquidity_mint")?;
            let share_b = mul_div_floor(amount_b, total_supply, reserve_b, "liquidity_mint")?;
            share_a.min(share_b)
        };

        if liquidity == 0 {
            return Err(AmmError::InsufficientLiquidityMinted);
        }
        Ok(liquidity)
    }

    /// Pro-rata reserves returned for burning `liquidity` shares (rounded down)
    pub fn liquidity_burn(
        liquidity: u128,
        reserve_a: u128,
        reserve_b: u128,
        total_supply: u128,
    ) -> Result<LiquidityPlan> {
        if total_supply == 0 {
            return Err(AmmError::invalid("pool has no liquidity supply"));
        }
        if liquidity > total_supply {
            return Err(AmmError::invalid("liquidity exceeds total supply"));
        }

        let amount_a = mul_div_floor(liquidity, reserve_a, total_supply, "liquidity_burn")?;
        let amount_b = mul_div_floor(liquidity, reserve_b, total_supply, "liquidity_burn")?;
        if amount_a == 0 || amount_b == 0 {
            return Err(AmmError::InsufficientLiquidityBurned);
        }

        Ok(LiquidityPlan { amount_a, amount_b })
    }

    /// Value lost by providing liquidity versus holding, as a fraction
    ///
    /// `price_ratio` is the new price over the deposit-time price. Returns
    /// `2 * sqrt(r) / (1 + r) - 1`, which is zero at `r = 1` and negative
    /// otherwise.
    pub fn impermanent_loss(price_ratio: Decimal) -> Result<Decimal> {
        if price_ratio <= dec!(0) {
            return Err(AmmError::invalid("price ratio must be positive"));
        }
        let root = decimal_sqrt(price_ratio)?;
        let denominator = dec!(1)
            .checked_add(price_ratio)
            .ok_or(AmmError::overflow("impermanent_loss"))?;
        Ok(dec!(2) * root / denominator - dec!(1))
    }
}
