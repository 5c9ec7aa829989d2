use soroban_sdk::{Address, Env, Symbol};

use crate::math::Uint256;

// Topic is the event name; data is the ordered field tuple off-chain
// observers decode positionally.

pub fn emit_sale_created(
    env: &Env,
    owner: Address,
    price: Uint256,
    tokens_to_sell: Uint256,
    sale_end: u64,
    token_unlock: u64,
) {
    env.events().publish(
        (Symbol::new(env, "sale_created"),),
        (owner, price, tokens_to_sell, sale_end, token_unlock),
    );
}

pub fn emit_vesting_params_set(env: &Env, portions: u32, precision: u32) {
    env.events().publish(
        (Symbol::new(env, "vesting_params_set"),),
        (portions, precision),
    );
}

pub fn emit_vesting_shifted(env: &Env, time_to_shift: u64) {
    env.events()
        .publish((Symbol::new(env, "vesting_shifted"),), (time_to_shift,));
}

pub fn emit_registration_time_set(env: &Env, start: u64, end: u64) {
    env.events()
        .publish((Symbol::new(env, "registration_time_set"),), (start, end));
}

pub fn emit_purchase_round_set(env: &Env, start: u64, end: u64, max_participation: Uint256) {
    env.events().publish(
        (Symbol::new(env, "purchase_round_set"),),
        (start, end, max_participation),
    );
}

pub fn emit_lottery_set(env: &Env, winning_slots: u32) {
    env.events()
        .publish((Symbol::new(env, "lottery_set"),), (winning_slots,));
}

pub fn emit_tokens_deposited(env: &Env, owner: Address, amount: Uint256) {
    env.events()
        .publish((Symbol::new(env, "tokens_deposited"),), (owner, amount));
}

pub fn emit_user_registered(env: &Env, user: Address, weight: u32) {
    env.events()
        .publish((Symbol::new(env, "user_registered"),), (user, weight));
}

pub fn emit_winners_selected(env: &Env, from: u32, to: u32, winners: u32) {
    env.events().publish(
        (Symbol::new(env, "winners_selected"),),
        (from, to, winners),
    );
}

pub fn emit_tokens_sold(env: &Env, user: Address, amount_bought: Uint256) {
    env.events()
        .publish((Symbol::new(env, "tokens_sold"),), (user, amount_bought));
}

pub fn emit_tokens_withdrawn(env: &Env, user: Address, amount: Uint256) {
    env.events()
        .publish((Symbol::new(env, "tokens_withdrawn"),), (user, amount));
}

pub fn emit_earnings_withdrawn(env: &Env, owner: Address, amount: Uint256) {
    env.events()
        .publish((Symbol::new(env, "earnings_withdrawn"),), (owner, amount));
}

pub fn emit_leftovers_withdrawn(env: &Env, owner: Address, amount: Uint256) {
    env.events()
        .publish((Symbol::new(env, "leftovers_withdrawn"),), (owner, amount));
}
