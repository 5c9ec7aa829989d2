#![no_std]


pub mod generator;

pub use generator::Xoroshiro128StarStar;

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, log, Address, Env, Symbol,
};

contractmeta!(
    key = "Description",
    val = "Seeded xoroshiro128** source for IDO winner selection"
);

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 120 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - 7 * DAY_IN_LEDGERS;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    UnknownConsumer = 3,
    AlreadyConsumer = 4,
}

#[contracttype]
pub enum DataKey {
    Admin,
    State,             // (u64, u64)
    Draws,             // u64
    Consumer(Address), // bool
}

#[contract]
pub struct LotteryRng;

#[contractimpl]
impl LotteryRng {
    /// Seed the generator. `admin` decides which contracts may draw.
    pub fn initialize(env: Env, admin: Address, seed: u64) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::State) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        let rng = Xoroshiro128StarStar::from_seed(seed);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::State, &rng.state());
        env.storage().instance().set(&DataKey::Draws, &0u64);
        bump_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "rng_seeded"),), (admin,));
        Ok(())
    }

    pub fn add_consumer(env: Env, consumer: Address) -> Result<(), Error> {
        require_admin(&env)?;
        let key = DataKey::Consumer(consumer.clone());
        if env.storage().instance().has(&key) {
            return Err(Error::AlreadyConsumer);
        }
        env.storage().instance().set(&key, &true);
        bump_instance(&env);

        env.events()
            .publish((Symbol::new(&env, "consumer_added"),), (consumer,));
        Ok(())
    }

    pub fn remove_consumer(env: Env, consumer: Address) -> Result<(), Error> {
        require_admin(&env)?;
        let key = DataKey::Consumer(consumer.clone());
        if !env.storage().instance().has(&key) {
            return Err(Error::UnknownConsumer);
        }
        env.storage().instance().remove(&key);

        env.events()
            .publish((Symbol::new(&env, "consumer_removed"),), (consumer,));
        Ok(())
    }

    pub fn is_consumer(env: Env, consumer: Address) -> bool {
        env.storage().instance().has(&DataKey::Consumer(consumer))
    }

    /// Draws the next value for a registered consumer. Every call advances
    /// the shared state.
    pub fn next(env: Env, consumer: Address) -> Result<u64, Error> {
        let (s0, s1) = read_state(&env)?;
        consumer.require_auth();
        if !env.storage().instance().has(&DataKey::Consumer(consumer)) {
            return Err(Error::UnknownConsumer);
        }

        let mut rng = Xoroshiro128StarStar::from_state(s0, s1);
        let value = rng.next_u64();

        let draws: u64 = env.storage().instance().get(&DataKey::Draws).unwrap_or(0);
        env.storage().instance().set(&DataKey::State, &rng.state());
        env.storage().instance().set(&DataKey::Draws, &(draws + 1));
        bump_instance(&env);

        log!(&env, "rng draw #{}", draws + 1);
        Ok(value)
    }

    /// Number of values drawn since seeding.
    pub fn draws(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::Draws).unwrap_or(0)
    }
}

fn read_state(env: &Env) -> Result<(u64, u64), Error> {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

fn require_admin(env: &Env) -> Result<(), Error> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)?;
    admin.require_auth();
    Ok(())
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
