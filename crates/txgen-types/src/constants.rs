//! Network-wide constants.

/// Height at which the genesis test-funding window closes. Payment
/// generation is refused from this height on so the tool cannot touch
/// post-genesis funds.
pub const GENESIS_WINDOW_END: u64 = 1000;

/// Default size of the well-known key pool.
pub const DEFAULT_KEY_COUNT: usize = 100;

/// Lower bound (inclusive) of the random spend percentage.
pub const SPEND_PERCENT_MIN: u64 = 20;

/// Upper bound (inclusive) of the random spend percentage.
pub const SPEND_PERCENT_MAX: u64 = 69;
