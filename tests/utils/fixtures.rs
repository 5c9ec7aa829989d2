/// Fixtures deploying a launchpad: admin registry, lottery RNG, payment token
/// and any number of sales wired to them
use ed25519_dalek::{Signer, SigningKey};
use ido_admin::{AdminRegistry, AdminRegistryClient};
use ido_sale::{
    participation_digest, registration_digest, Error, IdoSaleContract, IdoSaleContractClient,
    Uint256,
};
use lottery_rng::{LotteryRng, LotteryRngClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, BytesN, Env,
};

use super::constants::*;

pub fn amount(value: u128) -> Uint256 {
    Uint256::from_u128(value)
}

/// Timeline of one sale, absolute ledger timestamps.
#[derive(Clone, Debug)]
pub struct Schedule {
    pub registration: (u64, u64),
    pub purchase: (u64, u64),
    pub sale_end: u64,
    pub token_unlock: u64,
    pub unlock_times: [u64; 4],
    pub percents: [u32; 4],
}

impl Schedule {
    pub fn starting_at(t: u64) -> Self {
        let token_unlock = t + 97 * DAY;
        Self {
            registration: (t + DAY, t + 8 * DAY),
            purchase: (t + 9 * DAY, t + 16 * DAY),
            sale_end: t + 90 * DAY,
            token_unlock,
            unlock_times: [
                token_unlock + DAY,
                token_unlock + 8 * DAY,
                token_unlock + 15 * DAY,
                token_unlock + 22 * DAY,
            ],
            percents: [100, 200, 300, 400],
        }
    }
}

pub struct SaleHandle {
    pub client: IdoSaleContractClient<'static>,
    pub owner: Address,
    pub token: token::Client<'static>,
    pub schedule: Schedule,
}

pub struct Launchpad {
    pub env: Env,
    pub admin: Address,
    pub registry: AdminRegistryClient<'static>,
    pub rng: LotteryRngClient<'static>,
    pub payment: token::Client<'static>,
    pub payment_admin: token::StellarAssetClient<'static>,
    pub authority: SigningKey,
}

fn stellar_asset(env: &Env) -> (token::Client<'static>, token::StellarAssetClient<'static>) {
    let issuer = Address::generate(env);
    let address = env.register_stellar_asset_contract_v2(issuer).address();
    (
        token::Client::new(env, &address),
        token::StellarAssetClient::new(env, &address),
    )
}

impl Launchpad {
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().set_timestamp(GENESIS);

        let admin = Address::generate(&env);
        let registry =
            AdminRegistryClient::new(&env, &env.register_contract(None, AdminRegistry));
        registry.initialize(&vec![&env, admin.clone()]);

        let rng = LotteryRngClient::new(&env, &env.register_contract(None, LotteryRng));
        rng.initialize(&admin, &RNG_SEED);

        let (payment, payment_admin) = stellar_asset(&env);

        Self {
            admin,
            registry,
            rng,
            payment,
            payment_admin,
            authority: SigningKey::from_bytes(&[42u8; 32]),
            env,
        }
    }

    pub fn warp(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// Deploy, configure and fund a sale with `winning_slots` lottery slots.
    pub fn launch_sale(&self, schedule: Schedule, winning_slots: u32) -> SaleHandle {
        let sale = self.deploy_sale(schedule, winning_slots);
        self.rng.add_consumer(&sale.client.address);
        sale
    }

    /// Like `launch_sale`, without granting the sale access to the RNG.
    pub fn deploy_sale(&self, schedule: Schedule, winning_slots: u32) -> SaleHandle {
        let env = &self.env;
        let client = IdoSaleContractClient::new(env, &env.register_contract(None, IdoSaleContract));
        client.initialize(
            &self.admin,
            &self.registry.address,
            &self.rng.address,
            &BytesN::from_array(env, &self.authority.verifying_key().to_bytes()),
            &self.payment.address,
        );

        let owner = Address::generate(env);
        let (token, token_admin) = stellar_asset(env);
        client.set_sale_params(
            &self.admin,
            &token.address,
            &owner,
            &amount(PRICE),
            &amount(TOKENS_TO_SELL),
            &schedule.sale_end,
            &schedule.token_unlock,
            &VESTING_PRECISION,
        );

        let mut unlock_times = vec![env];
        let mut percents = vec![env];
        for (time, percent) in schedule.unlock_times.iter().zip(schedule.percents.iter()) {
            unlock_times.push_back(*time);
            percents.push_back(*percent);
        }
        client.set_vesting_params(&self.admin, &unlock_times, &percents, &(7 * DAY));
        client.set_registration_time(&self.admin, &schedule.registration.0, &schedule.registration.1);
        client.set_purchase_round_params(
            &self.admin,
            &schedule.purchase.0,
            &schedule.purchase.1,
            &amount(MAX_PARTICIPATION),
        );
        client.set_lottery_params(&self.admin, &winning_slots);

        token_admin.mint(&owner, &(TOKENS_TO_SELL as i128));
        token.approve(&owner, &client.address, &(TOKENS_TO_SELL as i128), &1_000);
        client.deposit_tokens(&owner);

        SaleHandle {
            client,
            owner,
            token,
            schedule,
        }
    }

    fn sign(&self, digest: BytesN<32>) -> BytesN<64> {
        let signature = self.authority.sign(&digest.to_array());
        BytesN::from_array(&self.env, &signature.to_bytes())
    }

    pub fn registration_signature(
        &self,
        sale: &SaleHandle,
        user: &Address,
        weight: u32,
    ) -> BytesN<64> {
        self.sign(registration_digest(
            &self.env,
            SIG_EXPIRATION,
            user,
            weight,
            &sale.client.address,
        ))
    }

    pub fn participation_signature(
        &self,
        sale: &SaleHandle,
        user: &Address,
        limit: u128,
    ) -> BytesN<64> {
        self.sign(participation_digest(
            &self.env,
            SIG_EXPIRATION,
            user,
            &amount(limit),
            &sale.client.address,
        ))
    }

    /// Registers freshly generated users with weight 1; the clock must be
    /// inside the registration window.
    pub fn register_users(&self, sale: &SaleHandle, count: u32) -> std::vec::Vec<Address> {
        let weights = std::vec![1u32; count as usize];
        self.register_weighted(sale, &weights)
    }

    /// One fresh user per entry of `weights`.
    pub fn register_weighted(&self, sale: &SaleHandle, weights: &[u32]) -> std::vec::Vec<Address> {
        weights
            .iter()
            .map(|weight| {
                let user = Address::generate(&self.env);
                let signature = self.registration_signature(sale, &user, *weight);
                sale.client
                    .register_user(&user, weight, &signature, &SIG_EXPIRATION);
                user
            })
            .collect()
    }

    /// Mints `pay` of the payment token to `buyer`, approves the sale and
    /// participates with a `limit` signed by the authority.
    pub fn buy(
        &self,
        sale: &SaleHandle,
        buyer: &Address,
        pay: u128,
        limit: u128,
    ) -> Result<Uint256, Error> {
        self.payment_admin.mint(buyer, &(pay as i128));
        self.payment
            .approve(buyer, &sale.client.address, &(pay as i128), &1_000);
        let signature = self.participation_signature(sale, buyer, limit);
        match sale.client.try_participate(
            buyer,
            &amount(pay),
            &amount(limit),
            &signature,
            &SIG_EXPIRATION,
        ) {
            Ok(Ok(bought)) => Ok(bought),
            Err(Ok(error)) => Err(error),
            other => panic!("participate was not decided by the sale: {:?}", other),
        }
    }
}

impl Default for Launchpad {
    fn default() -> Self {
        Self::new()
    }
}
