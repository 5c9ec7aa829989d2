use soroban_sdk::{contracttype, Address, BytesN, Vec};

use crate::math::Uint256;

/// Deployment wiring fixed by `initialize`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Settings {
    /// Signed `initialize`.
    pub deployer: Address,
    pub admin_registry: Address,
    pub rng: Address,
    /// ed25519 public key of the off-chain registration/participation signer.
    pub authority_key: BytesN<32>,
    pub payment_token: Address,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleParams {
    /// Token deposited by the owner and vested to buyers.
    pub token: Address,
    pub sale_owner: Address,
    /// Payment units per whole sale token, 18-decimal fixed point.
    pub token_price: Uint256,
    pub amount_of_tokens_to_sell: Uint256,
    pub sale_end: u64,
    pub token_unlock: u64,
    pub vesting_precision: u32,
}

/// Running totals, mutated only by registration, participation and owner
/// settlement.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct SaleAggregate {
    pub number_of_registrants: u32,
    pub number_of_participants: u32,
    /// Sum of registrant lottery weights.
    pub total_weight: u64,
    pub total_tokens_sold: Uint256,
    pub total_raised: Uint256,
    pub tokens_deposited: bool,
    pub earnings_withdrawn: bool,
    pub leftover_withdrawn: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub struct TimeWindow {
    pub start: u64,
    /// Exclusive.
    pub end: u64,
}

impl TimeWindow {
    pub fn contains(&self, now: u64) -> bool {
        self.start <= now && now < self.end
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct PurchaseRound {
    pub window: TimeWindow,
    /// Global cap on `total_raised`, in payment token units.
    pub max_participation: Uint256,
}

/// Portion `i + 1` unlocks at `unlock_times[i]` and releases
/// `percents[i] / vesting_precision` of a buyer's tokens.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct VestingSchedule {
    pub unlock_times: Vec<u64>,
    pub percents: Vec<u32>,
    /// Remaining one-shot allowance for `shift_vesting_unlocking_times`.
    pub max_vesting_time_shift: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Registrant {
    pub user: Address,
    pub registered_at: u64,
    /// Position in the registration arena.
    pub index: u32,
    /// Lottery weight granted by the authority, at least 1.
    pub weight: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RegistrationInfo {
    pub window: TimeWindow,
    pub number_of_registrants: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct LotteryState {
    pub winning_slots: u32,
    /// Next registrant index to draw for; everything below is settled.
    pub cursor: u32,
    pub winners: u32,
    /// Summed weight of the registrants below the cursor.
    pub weight_drawn: u64,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct Participation {
    pub amount_bought: Uint256,
    pub amount_paid: Uint256,
    pub time_participated: u64,
    /// Bit `i` set once portion `i + 1` was withdrawn.
    pub claimed_portions: u64,
}

impl Participation {
    pub fn is_claimed(&self, portion_id: u32) -> bool {
        self.claimed_portions & portion_bit(portion_id) != 0
    }

    pub fn mark_claimed(&mut self, portion_id: u32) {
        self.claimed_portions |= portion_bit(portion_id);
    }
}

fn portion_bit(portion_id: u32) -> u64 {
    1u64 << (portion_id - 1)
}

/// Participation is all zeroes until `has_participated` is set.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct UserInfo {
    pub is_registered: bool,
    pub allocation: u32,
    pub has_participated: bool,
    pub participation: Participation,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleView {
    pub params: SaleParams,
    pub aggregate: SaleAggregate,
}

/// Derived from the clock and the configured windows, never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Phase {
    Setup,
    Registration,
    AwaitingPurchase,
    Purchase,
    AwaitingUnlock,
    Vesting,
}

#[contracttype]
pub enum DataKey {
    // Singletons, instance storage
    Settings,
    Sale,
    Aggregate,
    Vesting,
    Registration,
    PurchaseRound,
    Lottery,

    // Per-user records, persistent storage
    RegistrantAt(u32),
    Registrant(Address),
    Allocation(Address),
    Participation(Address),
}
