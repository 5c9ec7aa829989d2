/// Testing utilities shared by the integration scenarios

pub mod assertions;
pub mod fixtures;

pub use fixtures::*;

/// Common test constants
pub mod constants {
    pub const E18: u128 = 1_000_000_000_000_000_000;
    pub const DAY: u64 = 86_400;
    pub const GENESIS: u64 = 1_700_000_000;
    pub const PRICE: u128 = 100 * E18;
    pub const TOKENS_TO_SELL: u128 = 100_000 * E18;
    pub const VESTING_PRECISION: u32 = 1_000;
    pub const MAX_PARTICIPATION: u128 = 500 * E18;
    pub const RNG_SEED: u64 = 76_823;
    /// Far enough out that no scenario outlives it.
    pub const SIG_EXPIRATION: u64 = GENESIS + 1_000 * DAY;
}
