//! Front-running (MEV) risk heuristics
//!
//! Best-effort classification only. A `false` result does not mean a trade
//! is safe from sandwiching or reordering, and nothing here should be used as
//! a security boundary. Three independent triggers, any one of which flags
//! the trade:
//!
//! - **Size**: the trade exceeds a share of the input reserve (5% by default)
//! - **Frequency**: the user has more than N trades in the look-back window,
//!   counting the trade being assessed
//! - **Sandwich**: the latest trade came from someone else moments ago
//!
//! The trade window holds earlier trades only. Assess a trade first, then
//! record it.

use std::collections::VecDeque;

use engine_config::fees::BASIS_POINTS;
use engine_config::MevSettings;
use serde::{Deserialize, Serialize};

use crate::math::wide;

/// One entry of the caller's recent-trade history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub amount: u128,
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: u64,
    pub user: String,
}

impl TradeRecord {
    pub fn new(amount: u128, timestamp_ms: u64, user: impl Into<String>) -> Self {
        Self {
            amount,
            timestamp_ms,
            user: user.into(),
        }
    }
}

/// Caller-owned bounded history of recent trades, oldest first
///
/// Once full, recording a trade evicts the oldest one.
#[derive(Debug, Clone)]
pub struct TradeWindow {
    trades: VecDeque<TradeRecord>,
    capacity: usize,
}

impl TradeWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            trades: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Window sized by `trade_window_capacity`
    pub fn from_settings(settings: &MevSettings) -> Self {
        Self::new(settings.trade_window_capacity)
    }

    pub fn record(&mut self, trade: TradeRecord) {
        if self.trades.len() == self.capacity {
            self.trades.pop_front();
        }
        self.trades.push_back(trade);
    }

    /// Drop trades older than `max_age_ms` relative to `now_ms`
    pub fn prune(&mut self, now_ms: u64, max_age_ms: u64) {
        self.trades
            .retain(|trade| now_ms.saturating_sub(trade.timestamp_ms) < max_age_ms);
    }

    /// Contiguous view for the assessor
    pub fn as_slice(&mut self) -> &[TradeRecord] {
        self.trades.make_contiguous()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TradeRecord> {
        self.trades.iter()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TradeWindow {
    fn default() -> Self {
        Self::from_settings(&MevSettings::default())
    }
}

/// Which heuristics fired for a trade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MevAssessment {
    pub size_trigger: bool,
    pub frequency_trigger: bool,
    pub sandwich_trigger: bool,
}

impl MevAssessment {
    pub fn is_risky(&self) -> bool {
        self.size_trigger || self.frequency_trigger || self.sandwich_trigger
    }
}

/// MEV risk assessor with configurable thresholds
#[derive(Debug, Clone, Default)]
pub struct MevRiskAssessor {
    settings: MevSettings,
}

impl MevRiskAssessor {
    pub fn new(settings: MevSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &MevSettings {
        &self.settings
    }

    /// Evaluate all three heuristics for a prospective trade
    ///
    /// `recent_trades` holds the trades before this one, oldest first. The
    /// sandwich rule looks at the newest entry; the frequency rule counts the
    /// prospective trade on top of the user's windowed trades. Trades stamped
    /// after `now_ms` count as age zero.
    pub fn assess(
        &self,
        amount_in: u128,
        reserve_in: u128,
        recent_trades: &[TradeRecord],
        user: &str,
        now_ms: u64,
    ) -> MevAssessment {
        // amount_in > reserve_in * threshold / 10_000, without the division
        let size_trigger = wide(amount_in) * wide(u128::from(BASIS_POINTS))
            > wide(reserve_in) * wide(u128::from(self.settings.size_threshold_bps));

        let prior_user_trades = recent_trades
            .iter()
            .filter(|trade| trade.user == user)
            .filter(|trade| {
                now_ms.saturating_sub(trade.timestamp_ms) < self.settings.frequency_window_ms
            })
            .count();
        let frequency_trigger = prior_user_trades + 1 > self.settings.frequency_limit;

        let sandwich_trigger = recent_trades.last().is_some_and(|last| {
            last.user != user
                && now_ms.saturating_sub(last.timestamp_ms) < self.settings.sandwich_window_ms
        });

        MevAssessment {
            size_trigger,
            frequency_trigger,
            sandwich_trigger,
        }
    }
}

/// Flag a trade as high MEV risk using the default thresholds
pub fn assess_mev_risk(
    amount_in: u128,
    reserve_in: u128,
    recent_trades: &[TradeRecord],
    user: &str,
    now_ms: u64,
) -> bool {
    MevRiskAssessor::default()
        .assess(amount_in, reserve_in, recent_trades, user, now_ms)
        .is_risky()
}
