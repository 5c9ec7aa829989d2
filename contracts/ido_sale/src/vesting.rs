use soroban_sdk::{Address, Env, Vec};

use crate::collaborators::push_tokens;
use crate::errors::Error;
use crate::events;
use crate::math::{portion_amount, Uint256};
use crate::phase;
use crate::storage::*;
use crate::types::{Participation, SaleParams, VestingSchedule};

struct Portion {
    unlock_time: u64,
    percent: u32,
}

fn lookup_portion(vesting: &VestingSchedule, portion_id: u32) -> Result<Portion, Error> {
    if portion_id == 0 {
        return Err(Error::PortionIdZero);
    }
    let i = portion_id - 1;
    match (vesting.unlock_times.get(i), vesting.percents.get(i)) {
        (Some(unlock_time), Some(percent)) => Ok(Portion {
            unlock_time,
            percent,
        }),
        _ => Err(Error::PortionNotFound),
    }
}

fn load(env: &Env, caller: &Address) -> Result<(SaleParams, VestingSchedule, Participation), Error> {
    get_settings(env)?;
    caller.require_auth();
    let sale = require_sale(env)?;
    let vesting = require_vesting(env)?;
    let participation = get_participation(env, caller).ok_or(Error::NotParticipant)?;
    Ok((sale, vesting, participation))
}

pub fn withdraw_tokens(env: &Env, caller: &Address, portion_id: u32) -> Result<Uint256, Error> {
    if portion_id == 0 {
        return Err(Error::PortionIdZero);
    }
    let (sale, vesting, mut participation) = load(env, caller)?;
    let portion = lookup_portion(&vesting, portion_id)?;

    if !phase::is_unlocked(env.ledger().timestamp(), portion.unlock_time) {
        return Err(Error::TokensNotUnlocked);
    }
    if participation.is_claimed(portion_id) {
        return Err(Error::PortionAlreadyClaimed);
    }

    let amount = portion_amount(
        env,
        participation.amount_bought,
        portion.percent,
        sale.vesting_precision,
    );
    participation.mark_claimed(portion_id);
    set_participation(env, caller, &participation);

    push_tokens(env, &sale.token, caller, amount)?;
    events::emit_tokens_withdrawn(env, caller.clone(), amount);
    Ok(amount)
}

/// Withdraw every unlocked, unclaimed portion among `portion_ids` in one
/// transfer. Locked or already claimed ids are skipped; fails when none is
/// claimable.
pub fn withdraw_multiple_portions(
    env: &Env,
    caller: &Address,
    portion_ids: Vec<u32>,
) -> Result<Uint256, Error> {
    let (sale, vesting, mut participation) = load(env, caller)?;
    let now = env.ledger().timestamp();

    let mut total = Uint256::ZERO;
    let mut claimed_any = false;
    for portion_id in portion_ids.iter() {
        let portion = lookup_portion(&vesting, portion_id)?;
        if !phase::is_unlocked(now, portion.unlock_time) || participation.is_claimed(portion_id) {
            continue;
        }

        let amount = portion_amount(
            env,
            participation.amount_bought,
            portion.percent,
            sale.vesting_precision,
        );
        total = total.checked_add(amount)?;
        participation.mark_claimed(portion_id);
        claimed_any = true;
    }
    if !claimed_any {
        return Err(Error::NothingToWithdraw);
    }
    set_participation(env, caller, &participation);

    push_tokens(env, &sale.token, caller, total)?;
    events::emit_tokens_withdrawn(env, caller.clone(), total);
    Ok(total)
}
