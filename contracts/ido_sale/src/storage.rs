use crate::errors::Error;
use crate::types::*;
use soroban_sdk::{Address, Env, IntoVal, TryFromVal, Val};

const DAY_IN_LEDGERS: u32 = 17_280;

// Singletons live as long as the contract instance; per-user records must
// outlive the whole vesting schedule.
pub const INSTANCE_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;
pub const USER_BUMP_AMOUNT: u32 = 180 * DAY_IN_LEDGERS;
pub const USER_LIFETIME_THRESHOLD: u32 = USER_BUMP_AMOUNT - 30 * DAY_IN_LEDGERS;

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn bump_user(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, USER_LIFETIME_THRESHOLD, USER_BUMP_AMOUNT);
}

fn read_user<V: TryFromVal<Env, Val>>(env: &Env, key: &DataKey) -> Option<V> {
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_user(env, key);
    }
    value
}

fn write_user<V: IntoVal<Env, Val>>(env: &Env, key: &DataKey, value: &V) {
    env.storage().persistent().set(key, value);
    bump_user(env, key);
}

pub fn has_settings(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Settings)
}

pub fn get_settings(env: &Env) -> Result<Settings, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Settings)
        .ok_or(Error::NotInitialized)
}

pub fn set_settings(env: &Env, settings: &Settings) {
    env.storage().instance().set(&DataKey::Settings, settings);
    bump_instance(env);
}

pub fn get_sale(env: &Env) -> Option<SaleParams> {
    env.storage().instance().get(&DataKey::Sale)
}

pub fn require_sale(env: &Env) -> Result<SaleParams, Error> {
    get_sale(env).ok_or(Error::SaleNotCreated)
}

pub fn set_sale(env: &Env, sale: &SaleParams) {
    env.storage().instance().set(&DataKey::Sale, sale);
    bump_instance(env);
}

pub fn get_aggregate(env: &Env) -> SaleAggregate {
    env.storage()
        .instance()
        .get(&DataKey::Aggregate)
        .unwrap_or_default()
}

pub fn set_aggregate(env: &Env, aggregate: &SaleAggregate) {
    env.storage().instance().set(&DataKey::Aggregate, aggregate);
    bump_instance(env);
}

pub fn get_vesting(env: &Env) -> Option<VestingSchedule> {
    env.storage().instance().get(&DataKey::Vesting)
}

pub fn require_vesting(env: &Env) -> Result<VestingSchedule, Error> {
    get_vesting(env).ok_or(Error::VestingNotSet)
}

pub fn set_vesting(env: &Env, vesting: &VestingSchedule) {
    env.storage().instance().set(&DataKey::Vesting, vesting);
    bump_instance(env);
}

pub fn get_registration_window(env: &Env) -> Option<TimeWindow> {
    env.storage().instance().get(&DataKey::Registration)
}

pub fn require_registration_window(env: &Env) -> Result<TimeWindow, Error> {
    get_registration_window(env).ok_or(Error::RegistrationNotSet)
}

pub fn set_registration_window(env: &Env, window: &TimeWindow) {
    env.storage().instance().set(&DataKey::Registration, window);
    bump_instance(env);
}

pub fn get_purchase_round(env: &Env) -> Option<PurchaseRound> {
    env.storage().instance().get(&DataKey::PurchaseRound)
}

pub fn require_purchase_round(env: &Env) -> Result<PurchaseRound, Error> {
    get_purchase_round(env).ok_or(Error::PurchaseRoundNotSet)
}

pub fn set_purchase_round(env: &Env, round: &PurchaseRound) {
    env.storage().instance().set(&DataKey::PurchaseRound, round);
    bump_instance(env);
}

pub fn get_lottery(env: &Env) -> Option<LotteryState> {
    env.storage().instance().get(&DataKey::Lottery)
}

pub fn set_lottery(env: &Env, lottery: &LotteryState) {
    env.storage().instance().set(&DataKey::Lottery, lottery);
    bump_instance(env);
}

// Registration arena: index -> address, address -> record.

pub fn get_registrant_at(env: &Env, index: u32) -> Option<Address> {
    read_user(env, &DataKey::RegistrantAt(index))
}

pub fn get_registrant(env: &Env, user: &Address) -> Option<Registrant> {
    read_user(env, &DataKey::Registrant(user.clone()))
}

pub fn push_registrant(env: &Env, registrant: &Registrant) {
    write_user(env, &DataKey::RegistrantAt(registrant.index), &registrant.user);
    write_user(env, &DataKey::Registrant(registrant.user.clone()), registrant);
}

pub fn get_allocation(env: &Env, user: &Address) -> Option<u32> {
    read_user(env, &DataKey::Allocation(user.clone()))
}

pub fn set_allocation(env: &Env, user: &Address, allocation: u32) {
    write_user(env, &DataKey::Allocation(user.clone()), &allocation);
}

pub fn get_participation(env: &Env, user: &Address) -> Option<Participation> {
    read_user(env, &DataKey::Participation(user.clone()))
}

pub fn set_participation(env: &Env, user: &Address, participation: &Participation) {
    write_user(env, &DataKey::Participation(user.clone()), participation);
}
