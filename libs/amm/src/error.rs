//! Error types for pricing and liquidity calculations
//!
//! Every variant is a deterministic function of the inputs: recomputing with
//! the same arguments always yields the same error, so callers can branch on
//! the kind without retry logic.

use thiserror::Error;

/// Errors returned by the pricing engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    /// Non-positive amount or reserve, or a basis-point value above 10_000
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: &'static str },

    /// Optimal deposit amount falls below the caller's minimum
    #[error("Insufficient amount: optimal {optimal} is below minimum {minimum}")]
    InsufficientAmount { optimal: u128, minimum: u128 },

    /// Deposit would mint zero liquidity shares
    #[error("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// Withdrawal would return zero of either token
    #[error("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Exact-output request meets or exceeds the available reserve
    #[error("Pool drained: requested {amount_out} of reserve {reserve_out}")]
    PoolDrained { amount_out: u128, reserve_out: u128 },

    /// Intermediate or final value does not fit the target width
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },
}

impl AmmError {
    pub(crate) fn invalid(reason: &'static str) -> Self {
        Self::InvalidInput { reason }
    }

    pub(crate) fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }
}

pub type Result<T> = std::result::Result<T, AmmError>;
