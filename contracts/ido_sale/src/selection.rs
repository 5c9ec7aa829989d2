//! Batched lottery over the registration arena.
//!
//! Registrants are visited strictly in index order behind a persisted cursor.
//! Each visit consumes one draw from the shared random source and applies
//! weighted sequential sampling. With `remaining_weight` the summed weight of
//! the registrants still to visit (this one included) and `slots_left` open
//! winner slots, a registrant of weight `w` wins when
//! `draw % remaining_weight < slots_left * w`. Once the open slots cover every
//! registrant left, all of them win. A full pass therefore yields exactly
//! `min(winning_slots, registrants)` winners regardless of how it is batched,
//! and with equal weights every registrant has the same odds.

use soroban_sdk::{log, Address, Env};

use crate::collaborators::{require_admin, RandomSourceClient};
use crate::errors::Error;
use crate::events;
use crate::phase;
use crate::storage::*;

pub fn select_winners(
    env: &Env,
    caller: &Address,
    start_index: u32,
    end_index: u32,
    batch_size: u32,
) -> Result<u32, Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;

    let window = require_registration_window(env)?;
    phase::ensure_registration_closed(env.ledger().timestamp(), &window)?;
    let mut lottery = get_lottery(env).ok_or(Error::LotteryNotSet)?;

    if batch_size == 0 {
        return Err(Error::InvalidBatchSize);
    }
    let aggregate = get_aggregate(env);
    let total = aggregate.number_of_registrants;
    if start_index > end_index || end_index >= total {
        return Err(Error::IndexOutOfRange);
    }
    if start_index > lottery.cursor {
        return Err(Error::SelectionOutOfOrder);
    }

    let from = lottery.cursor;
    if from > end_index {
        return Ok(0);
    }
    let to = end_index.min(from.saturating_add(batch_size - 1));

    let rng = RandomSourceClient::new(env, &settings.rng);
    let this = env.current_contract_address();
    let mut selected = 0u32;
    for index in from..=to {
        let user = get_registrant_at(env, index).ok_or(Error::IndexOutOfRange)?;
        let registrant = get_registrant(env, &user).ok_or(Error::IndexOutOfRange)?;
        let remaining_weight = aggregate.total_weight.saturating_sub(lottery.weight_drawn);
        lottery.weight_drawn += registrant.weight as u64;
        if get_allocation(env, &user).is_some() {
            continue;
        }

        let slots_left = lottery.winning_slots.saturating_sub(lottery.winners);
        let won = is_selected(
            rng.next(&this),
            registrant.weight,
            remaining_weight,
            total - index,
            slots_left,
        );
        set_allocation(env, &user, won as u32);
        if won {
            lottery.winners += 1;
            selected += 1;
        }
    }
    lottery.cursor = to + 1;
    set_lottery(env, &lottery);

    log!(
        env,
        "lottery processed {} to {}, {} winners so far",
        from,
        to,
        lottery.winners
    );
    events::emit_winners_selected(env, from, to, selected);
    Ok(selected)
}

pub fn is_selected(
    draw: u64,
    weight: u32,
    remaining_weight: u64,
    remaining: u32,
    slots_left: u32,
) -> bool {
    if slots_left == 0 {
        return false;
    }
    if slots_left >= remaining {
        return true;
    }
    if remaining_weight == 0 {
        return false;
    }
    (draw as u128 % remaining_weight as u128) < slots_left as u128 * weight as u128
}
