//! Height gating.
//!
//! Nothing runs before the chain produces its first block, and payment
//! generation additionally stops once the genesis funding window closes.
//! A failed height query is a chain error, never mapped to `NotStarted`.

use crate::error::SenderError;

/// Outcome of a height check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Operation may proceed at this height.
    Ready(u64),
    /// Height is 0.
    NotStarted,
    /// Height reached the end of the funding window (generation only).
    WindowClosed(u64),
}

impl GateStatus {
    /// Convert to a result, erroring on the refusal states.
    pub fn ready(self) -> Result<u64, SenderError> {
        match self {
            GateStatus::Ready(height) => Ok(height),
            GateStatus::NotStarted => Err(SenderError::NotStarted),
            GateStatus::WindowClosed(height) => Err(SenderError::WindowClosed { height }),
        }
    }
}

/// Gate for the payment-generation path.
pub fn check_send(height: u64, window_end: u64) -> GateStatus {
    if height == 0 {
        GateStatus::NotStarted
    } else if height >= window_end {
        GateStatus::WindowClosed(height)
    } else {
        GateStatus::Ready(height)
    }
}

/// Gate for the cancellation path: no upper bound.
pub fn check_cancel(height: u64) -> GateStatus {
    if height == 0 {
        GateStatus::NotStarted
    } else {
        GateStatus::Ready(height)
    }
}
