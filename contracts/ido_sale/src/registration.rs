use soroban_sdk::{Address, BytesN, Env};

use crate::errors::Error;
use crate::events;
use crate::phase;
use crate::signature::{registration_digest, Ed25519Authority, MessageAuthenticator};
use crate::storage::*;
use crate::types::Registrant;

pub fn register_user(
    env: &Env,
    caller: &Address,
    weight: u32,
    signature: &BytesN<64>,
    signature_expiration: u64,
) -> Result<u32, Error> {
    let settings = get_settings(env)?;
    caller.require_auth();

    let window = require_registration_window(env)?;
    let now = env.ledger().timestamp();
    phase::ensure_registration_open(now, &window)?;

    if weight == 0 {
        return Err(Error::ZeroWeight);
    }
    let digest = registration_digest(
        env,
        signature_expiration,
        caller,
        weight,
        &env.current_contract_address(),
    );
    Ed25519Authority {
        public_key: settings.authority_key,
    }
    .verify(env, &digest, signature, signature_expiration)?;

    if get_registrant(env, caller).is_some() {
        return Err(Error::AlreadyRegistered);
    }

    let mut aggregate = get_aggregate(env);
    let index = aggregate.number_of_registrants;
    push_registrant(
        env,
        &Registrant {
            user: caller.clone(),
            registered_at: now,
            index,
            weight,
        },
    );
    aggregate.number_of_registrants += 1;
    aggregate.total_weight += weight as u64;
    set_aggregate(env, &aggregate);

    events::emit_user_registered(env, caller.clone(), weight);
    Ok(index)
}
