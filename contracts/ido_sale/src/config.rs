//! One-shot sale configuration. Each setter validates everything before the
//! first write and refuses a second call.

use soroban_sdk::{log, Address, Env, Vec};

use crate::collaborators::{pull_tokens, require_admin};
use crate::errors::Error;
use crate::events;
use crate::math::Uint256;
use crate::storage::*;
use crate::types::*;

/// Portions are tracked in a `u64` claim bitmap.
pub const MAX_VESTING_PORTIONS: u32 = 64;

pub struct SaleParamsInput {
    pub token: Address,
    pub sale_owner: Address,
    pub token_price: Uint256,
    pub amount_of_tokens_to_sell: Uint256,
    pub sale_end: u64,
    pub token_unlock: u64,
    pub vesting_precision: u32,
}

pub fn set_sale_params(env: &Env, caller: &Address, input: SaleParamsInput) -> Result<(), Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;
    if get_sale(env).is_some() {
        return Err(Error::SaleAlreadyCreated);
    }

    let this = env.current_contract_address();
    if input.token == this || input.sale_owner == this {
        return Err(Error::InvalidAddress);
    }
    if input.token_price.is_zero() {
        return Err(Error::ZeroPrice);
    }
    if input.amount_of_tokens_to_sell.is_zero() {
        return Err(Error::ZeroTokensToSell);
    }
    let now = env.ledger().timestamp();
    if input.sale_end <= now {
        return Err(Error::SaleEndInPast);
    }
    if input.token_unlock <= input.sale_end {
        return Err(Error::UnlockBeforeSaleEnd);
    }
    if input.vesting_precision == 0 {
        return Err(Error::ZeroVestingPrecision);
    }

    let sale = SaleParams {
        token: input.token,
        sale_owner: input.sale_owner,
        token_price: input.token_price,
        amount_of_tokens_to_sell: input.amount_of_tokens_to_sell,
        sale_end: input.sale_end,
        token_unlock: input.token_unlock,
        vesting_precision: input.vesting_precision,
    };
    set_sale(env, &sale);
    set_aggregate(env, &SaleAggregate::default());

    events::emit_sale_created(
        env,
        sale.sale_owner,
        sale.token_price,
        sale.amount_of_tokens_to_sell,
        sale.sale_end,
        sale.token_unlock,
    );
    Ok(())
}

pub fn set_vesting_params(
    env: &Env,
    caller: &Address,
    unlock_times: Vec<u64>,
    percents: Vec<u32>,
    max_vesting_time_shift: u64,
) -> Result<(), Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;
    let sale = require_sale(env)?;
    if get_vesting(env).is_some() {
        return Err(Error::AlreadySet);
    }

    let portions = unlock_times.len();
    if portions == 0 || portions > MAX_VESTING_PORTIONS || portions != percents.len() {
        return Err(Error::InvalidVestingSchedule);
    }
    let mut previous: Option<u64> = None;
    for unlock in unlock_times.iter() {
        if unlock < sale.token_unlock || previous.is_some_and(|p| unlock <= p) {
            return Err(Error::InvalidVestingSchedule);
        }
        previous = Some(unlock);
    }

    let mut sum: u64 = 0;
    for percent in percents.iter() {
        sum += percent as u64;
    }
    if sum != sale.vesting_precision as u64 {
        return Err(Error::VestingPercentMismatch);
    }

    set_vesting(
        env,
        &VestingSchedule {
            unlock_times,
            percents,
            max_vesting_time_shift,
        },
    );
    events::emit_vesting_params_set(env, portions, sale.vesting_precision);
    Ok(())
}

/// Push every unlock time forward once, bounded by the configured allowance.
pub fn shift_vesting_unlocking_times(
    env: &Env,
    caller: &Address,
    time_to_shift: u64,
) -> Result<(), Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;
    let mut vesting = require_vesting(env)?;
    if time_to_shift == 0 || time_to_shift > vesting.max_vesting_time_shift {
        return Err(Error::InvalidVestingShift);
    }

    let mut shifted = Vec::new(env);
    for unlock in vesting.unlock_times.iter() {
        shifted.push_back(
            unlock
                .checked_add(time_to_shift)
                .ok_or(Error::InvalidVestingShift)?,
        );
    }
    vesting.unlock_times = shifted;
    vesting.max_vesting_time_shift = 0;
    set_vesting(env, &vesting);

    events::emit_vesting_shifted(env, time_to_shift);
    Ok(())
}

pub fn set_registration_time(env: &Env, caller: &Address, start: u64, end: u64) -> Result<(), Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;
    let sale = require_sale(env)?;
    if get_registration_window(env).is_some() {
        return Err(Error::AlreadySet);
    }

    let now = env.ledger().timestamp();
    if start < now || end <= start || end > sale.sale_end {
        return Err(Error::InvalidRegistrationWindow);
    }

    set_registration_window(env, &TimeWindow { start, end });
    events::emit_registration_time_set(env, start, end);
    Ok(())
}

pub fn set_purchase_round_params(
    env: &Env,
    caller: &Address,
    start: u64,
    end: u64,
    max_participation: Uint256,
) -> Result<(), Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;
    let sale = require_sale(env)?;
    let registration = require_registration_window(env)?;
    if get_purchase_round(env).is_some() {
        return Err(Error::AlreadySet);
    }

    if start < registration.end || end <= start || end > sale.sale_end {
        return Err(Error::InvalidPurchaseRound);
    }
    if max_participation.is_zero() {
        return Err(Error::InvalidPurchaseRound);
    }

    set_purchase_round(
        env,
        &PurchaseRound {
            window: TimeWindow { start, end },
            max_participation,
        },
    );
    events::emit_purchase_round_set(env, start, end, max_participation);
    Ok(())
}

pub fn set_lottery_params(env: &Env, caller: &Address, winning_slots: u32) -> Result<(), Error> {
    let settings = get_settings(env)?;
    require_admin(env, &settings, caller)?;
    require_sale(env)?;
    if get_lottery(env).is_some() {
        return Err(Error::AlreadySet);
    }
    if winning_slots == 0 {
        return Err(Error::ZeroWinningSlots);
    }

    set_lottery(
        env,
        &LotteryState {
            winning_slots,
            cursor: 0,
            winners: 0,
            weight_drawn: 0,
        },
    );
    events::emit_lottery_set(env, winning_slots);
    Ok(())
}

/// Sale owner funds the sale with the full `amount_of_tokens_to_sell`.
pub fn deposit_tokens(env: &Env, caller: &Address) -> Result<(), Error> {
    get_settings(env)?;
    let sale = require_sale(env)?;
    if *caller != sale.sale_owner {
        return Err(Error::NotSaleOwner);
    }
    caller.require_auth();

    let mut aggregate = get_aggregate(env);
    if aggregate.tokens_deposited {
        return Err(Error::TokensAlreadyDeposited);
    }

    pull_tokens(env, &sale.token, caller, sale.amount_of_tokens_to_sell)?;
    aggregate.tokens_deposited = true;
    set_aggregate(env, &aggregate);

    log!(env, "sale funded by owner");
    events::emit_tokens_deposited(env, sale.sale_owner, sale.amount_of_tokens_to_sell);
    Ok(())
}
