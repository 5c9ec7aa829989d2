//! Sale owner collects the raise and the unsold tokens once the sale ends.

use soroban_sdk::{Address, Env};

use crate::collaborators::push_tokens;
use crate::errors::Error;
use crate::events;
use crate::math::Uint256;
use crate::phase;
use crate::storage::*;
use crate::types::{SaleAggregate, SaleParams, Settings};

fn owner_after_end(
    env: &Env,
    caller: &Address,
) -> Result<(Settings, SaleParams, SaleAggregate), Error> {
    let settings = get_settings(env)?;
    let sale = require_sale(env)?;
    if *caller != sale.sale_owner {
        return Err(Error::NotSaleOwner);
    }
    caller.require_auth();
    phase::ensure_sale_ended(env.ledger().timestamp(), &sale)?;
    Ok((settings, sale, get_aggregate(env)))
}

pub fn withdraw_earnings(env: &Env, caller: &Address) -> Result<Uint256, Error> {
    let (settings, sale, mut aggregate) = owner_after_end(env, caller)?;
    if aggregate.earnings_withdrawn {
        return Err(Error::AlreadySettled);
    }

    aggregate.earnings_withdrawn = true;
    set_aggregate(env, &aggregate);

    push_tokens(env, &settings.payment_token, &sale.sale_owner, aggregate.total_raised)?;
    events::emit_earnings_withdrawn(env, sale.sale_owner, aggregate.total_raised);
    Ok(aggregate.total_raised)
}

pub fn withdraw_leftovers(env: &Env, caller: &Address) -> Result<Uint256, Error> {
    let (_, sale, mut aggregate) = owner_after_end(env, caller)?;
    if aggregate.leftover_withdrawn {
        return Err(Error::AlreadySettled);
    }
    if !aggregate.tokens_deposited {
        return Err(Error::TokensNotDeposited);
    }

    let leftover = sale
        .amount_of_tokens_to_sell
        .checked_sub(aggregate.total_tokens_sold)?;
    aggregate.leftover_withdrawn = true;
    set_aggregate(env, &aggregate);

    push_tokens(env, &sale.token, &sale.sale_owner, leftover)?;
    events::emit_leftovers_withdrawn(env, sale.sale_owner, leftover);
    Ok(leftover)
}
