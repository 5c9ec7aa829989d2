use crate::config::{self, SaleParamsInput};
use crate::errors::{Error, LogRejection};
use crate::math::Uint256;
use crate::storage::*;
use crate::types::*;
use crate::{participation, phase, registration, selection, settlement, vesting};
use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, BytesN, Env, Vec};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Lottery-gated IDO sale with portioned vesting"
);

#[contract]
pub struct IdoSaleContract;

#[contractimpl]
impl IdoSaleContract {
    /// Wire the sale to its collaborators. Must be called exactly once, signed
    /// by the deployer.
    pub fn initialize(
        env: Env,
        deployer: Address,
        admin_registry: Address,
        rng: Address,
        authority_key: BytesN<32>,
        payment_token: Address,
    ) -> Result<(), Error> {
        if has_settings(&env) {
            return Err(Error::AlreadyInitialized).log_rejection(&env);
        }
        deployer.require_auth();
        set_settings(
            &env,
            &Settings {
                deployer: deployer.clone(),
                admin_registry,
                rng,
                authority_key,
                payment_token,
            },
        );
        log!(&env, "sale initialized by {}", deployer);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Configuration (admin)
    // ------------------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn set_sale_params(
        env: Env,
        caller: Address,
        token: Address,
        sale_owner: Address,
        token_price: Uint256,
        amount_of_tokens_to_sell: Uint256,
        sale_end: u64,
        token_unlock: u64,
        vesting_precision: u32,
    ) -> Result<(), Error> {
        config::set_sale_params(
            &env,
            &caller,
            SaleParamsInput {
                token,
                sale_owner,
                token_price,
                amount_of_tokens_to_sell,
                sale_end,
                token_unlock,
                vesting_precision,
            },
        )
        .log_rejection(&env)
    }

    pub fn set_vesting_params(
        env: Env,
        caller: Address,
        unlock_times: Vec<u64>,
        percents: Vec<u32>,
        max_vesting_time_shift: u64,
    ) -> Result<(), Error> {
        config::set_vesting_params(&env, &caller, unlock_times, percents, max_vesting_time_shift)
            .log_rejection(&env)
    }

    pub fn shift_vesting_unlocking_times(
        env: Env,
        caller: Address,
        time_to_shift: u64,
    ) -> Result<(), Error> {
        config::shift_vesting_unlocking_times(&env, &caller, time_to_shift)
            .log_rejection(&env)
    }

    pub fn set_registration_time(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
    ) -> Result<(), Error> {
        config::set_registration_time(&env, &caller, start, end)
            .log_rejection(&env)
    }

    pub fn set_purchase_round_params(
        env: Env,
        caller: Address,
        start: u64,
        end: u64,
        max_participation: Uint256,
    ) -> Result<(), Error> {
        config::set_purchase_round_params(&env, &caller, start, end, max_participation)
            .log_rejection(&env)
    }

    pub fn set_lottery_params(env: Env, caller: Address, winning_slots: u32) -> Result<(), Error> {
        config::set_lottery_params(&env, &caller, winning_slots)
            .log_rejection(&env)
    }

    /// Sale owner pulls `amount_of_tokens_to_sell` into the sale.
    pub fn deposit_tokens(env: Env, caller: Address) -> Result<(), Error> {
        config::deposit_tokens(&env, &caller)
            .log_rejection(&env)
    }

    // ------------------------------------------------------------------
    // Registration & lottery
    // ------------------------------------------------------------------

    /// Returns the registrant's index in the lottery arena. `weight` scales
    /// the registrant's lottery odds and is bound by the authority signature.
    pub fn register_user(
        env: Env,
        caller: Address,
        weight: u32,
        signature: BytesN<64>,
        signature_expiration: u64,
    ) -> Result<u32, Error> {
        registration::register_user(&env, &caller, weight, &signature, signature_expiration)
            .log_rejection(&env)
    }

    /// Returns how many winners this batch produced.
    pub fn select_winners(
        env: Env,
        caller: Address,
        start_index: u32,
        end_index: u32,
        batch_size: u32,
    ) -> Result<u32, Error> {
        selection::select_winners(&env, &caller, start_index, end_index, batch_size)
            .log_rejection(&env)
    }

    // ------------------------------------------------------------------
    // Purchase & vesting
    // ------------------------------------------------------------------

    pub fn participate(
        env: Env,
        caller: Address,
        amount_paid: Uint256,
        amount: Uint256,
        signature: BytesN<64>,
        signature_expiration: u64,
    ) -> Result<Uint256, Error> {
        participation::participate(
            &env,
            &caller,
            amount_paid,
            amount,
            &signature,
            signature_expiration,
        )
        .log_rejection(&env)
    }

    pub fn withdraw_tokens(env: Env, caller: Address, portion_id: u32) -> Result<Uint256, Error> {
        vesting::withdraw_tokens(&env, &caller, portion_id)
            .log_rejection(&env)
    }

    pub fn withdraw_multiple_portions(
        env: Env,
        caller: Address,
        portion_ids: Vec<u32>,
    ) -> Result<Uint256, Error> {
        vesting::withdraw_multiple_portions(&env, &caller, portion_ids)
            .log_rejection(&env)
    }

    // ------------------------------------------------------------------
    // Sale owner
    // ------------------------------------------------------------------

    pub fn withdraw_earnings(env: Env, caller: Address) -> Result<Uint256, Error> {
        settlement::withdraw_earnings(&env, &caller)
            .log_rejection(&env)
    }

    pub fn withdraw_leftovers(env: Env, caller: Address) -> Result<Uint256, Error> {
        settlement::withdraw_leftovers(&env, &caller)
            .log_rejection(&env)
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    pub fn get_settings(env: Env) -> Result<Settings, Error> {
        get_settings(&env)
    }

    pub fn get_current_sale(env: Env) -> Result<SaleView, Error> {
        Ok(SaleView {
            params: require_sale(&env)?,
            aggregate: get_aggregate(&env),
        })
    }

    pub fn get_phase(env: Env) -> Phase {
        phase::derive(
            env.ledger().timestamp(),
            get_sale(&env).as_ref(),
            get_registration_window(&env).as_ref(),
            get_purchase_round(&env).as_ref(),
        )
    }

    pub fn get_registration(env: Env) -> Result<RegistrationInfo, Error> {
        Ok(RegistrationInfo {
            window: require_registration_window(&env)?,
            number_of_registrants: get_aggregate(&env).number_of_registrants,
        })
    }

    pub fn get_purchase_round(env: Env) -> Result<PurchaseRound, Error> {
        require_purchase_round(&env)
    }

    pub fn get_vesting(env: Env) -> Result<VestingSchedule, Error> {
        require_vesting(&env)
    }

    pub fn get_number_of_vesting_portions(env: Env) -> u32 {
        get_vesting(&env)
            .map(|v| v.unlock_times.len())
            .unwrap_or(0)
    }

    pub fn get_vesting_portion_percent(env: Env, portion_id: u32) -> Result<u32, Error> {
        let vesting = require_vesting(&env)?;
        portion_index(portion_id).and_then(|i| vesting.percents.get(i).ok_or(Error::PortionNotFound))
    }

    pub fn get_vesting_portion_unlock_time(env: Env, portion_id: u32) -> Result<u64, Error> {
        let vesting = require_vesting(&env)?;
        portion_index(portion_id)
            .and_then(|i| vesting.unlock_times.get(i).ok_or(Error::PortionNotFound))
    }

    pub fn get_registrant(env: Env, index: u32) -> Option<Registrant> {
        get_registrant_at(&env, index).and_then(|user| get_registrant(&env, &user))
    }

    pub fn is_registered(env: Env, user: Address) -> bool {
        get_registrant(&env, &user).is_some()
    }

    /// 0 until the lottery reached this user, then 1 for winners.
    pub fn get_allocation(env: Env, user: Address) -> u32 {
        get_allocation(&env, &user).unwrap_or(0)
    }

    pub fn get_selection(env: Env) -> Result<LotteryState, Error> {
        get_lottery(&env).ok_or(Error::LotteryNotSet)
    }

    pub fn get_user_info(env: Env, user: Address) -> UserInfo {
        let participation = get_participation(&env, &user);
        UserInfo {
            is_registered: get_registrant(&env, &user).is_some(),
            allocation: get_allocation(&env, &user).unwrap_or(0),
            has_participated: participation.is_some(),
            participation: participation.unwrap_or_default(),
        }
    }

    pub fn get_participation(env: Env, user: Address) -> Result<Participation, Error> {
        get_participation(&env, &user).ok_or(Error::NotParticipant)
    }
}

fn portion_index(portion_id: u32) -> Result<u32, Error> {
    portion_id.checked_sub(1).ok_or(Error::PortionIdZero)
}
