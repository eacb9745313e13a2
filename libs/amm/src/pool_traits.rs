//! Pool snapshot and unified pool interface

use ethnum::U256;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::wide;
use crate::quote::{validate_bps, QuoteMath};

/// Immutable view of a pool, oriented for one swap direction
///
/// The engine never mutates a snapshot; callers apply results against the
/// authoritative pool state themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub reserve_in: u128,
    pub reserve_out: u128,
    /// Liquidity-share supply
    pub total_supply: u128,
    pub base_fee_rate_bps: u32,
}

impl PoolSnapshot {
    pub fn new(
        reserve_in: u128,
        reserve_out: u128,
        total_supply: u128,
        base_fee_rate_bps: u32,
    ) -> Result<Self> {
        validate_bps(base_fee_rate_bps)?;
        Ok(Self {
            reserve_in,
            reserve_out,
            total_supply,
            base_fee_rate_bps,
        })
    }

    /// Same pool seen from the opposite swap direction
    pub fn reversed(&self) -> Self {
        Self {
            reserve_in: self.reserve_out,
            reserve_out: self.reserve_in,
            ..*self
        }
    }

    /// Constant product `reserve_in * reserve_out`, widened to avoid overflow
    pub fn invariant(&self) -> U256 {
        wide(self.reserve_in) * wide(self.reserve_out)
    }
}

/// Unified pool interface
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: u128) -> Result<u128>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: u128) -> Result<u128>;

    /// Get current reserves as (in, out)
    fn get_reserves(&self) -> (u128, u128);

    /// Get fee tier
    fn get_fee_bps(&self) -> u32;
}

impl AmmPool for PoolSnapshot {
    fn get_amount_out(&self, amount_in: u128) -> Result<u128> {
        QuoteMath::amount_out(
            amount_in,
            self.reserve_in,
            self.reserve_out,
            self.base_fee_rate_bps,
        )
    }

    fn get_amount_in(&self, amount_out: u128) -> Result<u128> {
        QuoteMath::amount_in(
            amount_out,
            self.reserve_in,
            self.reserve_out,
            self.base_fee_rate_bps,
        )
    }

    fn get_reserves(&self) -> (u128, u128) {
        (self.reserve_in, self.reserve_out)
    }

    fn get_fee_bps(&self) -> u32 {
        self.base_fee_rate_bps
    }
}
