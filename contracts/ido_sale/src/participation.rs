use soroban_sdk::{log, Address, BytesN, Env};

use crate::collaborators::{allowance, pull_tokens};
use crate::errors::Error;
use crate::events;
use crate::math::{tokens_for_payment, Uint256};
use crate::phase;
use crate::signature::{participation_digest, Ed25519Authority, MessageAuthenticator};
use crate::storage::*;
use crate::types::Participation;

/// Buy sale tokens with `amount_paid` of the payment token.
///
/// `amount` is the per-user limit, in sale tokens, that the authority signed
/// for this caller. Returns the number of tokens bought.
pub fn participate(
    env: &Env,
    caller: &Address,
    amount_paid: Uint256,
    amount: Uint256,
    signature: &BytesN<64>,
    signature_expiration: u64,
) -> Result<Uint256, Error> {
    let settings = get_settings(env)?;
    caller.require_auth();
    let sale = require_sale(env)?;
    let mut aggregate = get_aggregate(env);
    if !aggregate.tokens_deposited {
        return Err(Error::TokensNotDeposited);
    }

    let round = require_purchase_round(env)?;
    let now = env.ledger().timestamp();
    phase::ensure_purchase_open(now, &round)?;

    let digest = participation_digest(
        env,
        signature_expiration,
        caller,
        &amount,
        &env.current_contract_address(),
    );
    Ed25519Authority {
        public_key: settings.authority_key,
    }
    .verify(env, &digest, signature, signature_expiration)?;

    if get_allocation(env, caller).unwrap_or(0) == 0 {
        return Err(Error::NoAllocation);
    }
    if get_participation(env, caller).is_some() {
        return Err(Error::AlreadyParticipated);
    }

    let amount_bought = tokens_for_payment(env, amount_paid, sale.token_price);
    if amount_bought.is_zero() {
        return Err(Error::ZeroTokens);
    }
    if amount_bought > amount || allowance(env, &settings.payment_token, caller) < amount_paid {
        return Err(Error::ExceedingAllowance);
    }

    let total_raised = aggregate.total_raised.checked_add(amount_paid)?;
    if total_raised > round.max_participation {
        return Err(Error::CrossingMaxParticipation);
    }
    let total_tokens_sold = aggregate.total_tokens_sold.checked_add(amount_bought)?;
    if total_tokens_sold > sale.amount_of_tokens_to_sell {
        return Err(Error::SoldOut);
    }

    pull_tokens(env, &settings.payment_token, caller, amount_paid)?;

    set_participation(
        env,
        caller,
        &Participation {
            amount_bought,
            amount_paid,
            time_participated: now,
            claimed_portions: 0,
        },
    );
    aggregate.total_raised = total_raised;
    aggregate.total_tokens_sold = total_tokens_sold;
    aggregate.number_of_participants += 1;
    set_aggregate(env, &aggregate);

    log!(env, "participant #{} bought tokens", aggregate.number_of_participants);
    events::emit_tokens_sold(env, caller.clone(), amount_bought);
    Ok(amount_bought)
}
