//! Interfaces of the contracts the sale calls out to.

use soroban_sdk::{contractclient, token, Address, Env};

use crate::errors::Error;
use crate::math::Uint256;
use crate::types::Settings;

/// "Is this identity allowed to administer the sale?"
#[contractclient(name = "AdminCapabilityClient")]
pub trait AdminCapability {
    fn is_admin(env: Env, user: Address) -> bool;
}

/// Shared pseudo-random source; each call advances its state. Only
/// consumers registered with the source may draw.
#[contractclient(name = "RandomSourceClient")]
pub trait RandomSource {
    fn next(env: Env, consumer: Address) -> u64;
}

/// Caller signs and holds the admin capability.
pub fn require_admin(env: &Env, settings: &Settings, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if !AdminCapabilityClient::new(env, &settings.admin_registry).is_admin(caller) {
        return Err(Error::NotAdmin);
    }
    Ok(())
}

pub fn pull_tokens(env: &Env, token: &Address, from: &Address, amount: Uint256) -> Result<(), Error> {
    let amount = amount.to_i128()?;
    let this = env.current_contract_address();
    token::Client::new(env, token).transfer_from(&this, from, &this, &amount);
    Ok(())
}

pub fn push_tokens(env: &Env, token: &Address, to: &Address, amount: Uint256) -> Result<(), Error> {
    if amount.is_zero() {
        return Ok(());
    }
    let amount = amount.to_i128()?;
    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}

/// Amount `owner` has approved the sale to pull.
pub fn allowance(env: &Env, token: &Address, owner: &Address) -> Uint256 {
    let approved = token::Client::new(env, token).allowance(owner, &env.current_contract_address());
    Uint256::from_u128(approved.max(0) as u128)
}
