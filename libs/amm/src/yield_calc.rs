//! Staking yield and governance boost math
//!
//! Prices and reward rates are decimal quantities, so this module works in
//! `Decimal` rather than smallest-unit integers.

use engine_config::rewards::{MAX_BOOST, SECONDS_PER_YEAR};
use engine_config::RewardSettings;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{AmmError, Result};

/// Yield calculator
#[derive(Debug, Clone)]
pub struct YieldCalculator {
    max_boost: Decimal,
}

impl Default for YieldCalculator {
    fn default() -> Self {
        Self {
            max_boost: MAX_BOOST,
        }
    }
}

impl YieldCalculator {
    pub fn new(settings: &RewardSettings) -> Self {
        Self {
            max_boost: settings.max_boost,
        }
    }

    pub fn max_boost(&self) -> Decimal {
        self.max_boost
    }

    /// Annual percentage yield (e.g. `12.5` for 12.5%)
    ///
    /// Returns zero when nothing is staked instead of dividing by zero.
    pub fn apy(
        reward_rate_per_second: Decimal,
        reward_token_price: Decimal,
        total_staked: Decimal,
        staking_token_price: Decimal,
    ) -> Result<Decimal> {
        let staked_value = total_staked
            .checked_mul(staking_token_price)
            .ok_or(AmmError::overflow("apy"))?;
        if staked_value <= dec!(0) {
            return Ok(dec!(0));
        }

        let yearly_reward_value = reward_rate_per_second
            .checked_mul(Decimal::from(SECONDS_PER_YEAR))
            .and_then(|v| v.checked_mul(reward_token_price))
            .ok_or(AmmError::overflow("apy"))?;

        yearly_reward_value
            .checked_div(staked_value)
            .and_then(|v| v.checked_mul(dec!(100)))
            .ok_or(AmmError::overflow("apy"))
    }

    /// Rewards amplified by governance stake relative to LP stake
    pub fn boosted_rewards(
        &self,
        base_rewards: Decimal,
        governance_staked: Decimal,
        lp_staked: Decimal,
    ) -> Result<Decimal> {
        boosted_rewards(base_rewards, governance_staked, lp_staked, self.max_boost)
    }
}

/// `base * min(1 + governance / lp, max_boost)`; unchanged when `lp_staked` is zero
pub fn boosted_rewards(
    base_rewards: Decimal,
    governance_staked: Decimal,
    lp_staked: Decimal,
    max_boost: Decimal,
) -> Result<Decimal> {
    if lp_staked == dec!(0) {
        return Ok(base_rewards);
    }

    let boost = governance_staked
        .checked_div(lp_staked)
        .and_then(|ratio| ratio.checked_add(dec!(1)))
        .ok_or(AmmError::overflow("boosted_rewards"))?
        .min(max_boost);

    base_rewards
        .checked_mul(boost)
        .ok_or(AmmError::overflow("boosted_rewards"))
}
