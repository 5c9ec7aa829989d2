#![no_std]


use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, log, Address, Env, Symbol,
    Vec,
};

contractmeta!(
    key = "Description",
    val = "Admin registry gating IDO sale configuration"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAdmin = 3,
    EmptyAdminList = 4,
    AlreadyAdmin = 5,
    AdminNotFound = 6,
    LastAdmin = 7,
    TooManyAdmins = 8,
}

#[contracttype]
pub enum DataKey {
    Admins, // Vec<Address>
}

/// Upper bound on the admin list so `is_admin` stays a cheap scan.
const MAX_ADMINS: u32 = 32;

#[contract]
pub struct AdminRegistry;

#[contractimpl]
impl AdminRegistry {
    /// Seed the registry. Must be called exactly once with at least one admin.
    pub fn initialize(env: Env, admins: Vec<Address>) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admins) {
            return Err(Error::AlreadyInitialized);
        }
        if admins.is_empty() {
            return Err(Error::EmptyAdminList);
        }

        let mut unique = Vec::new(&env);
        for admin in admins.iter() {
            if !unique.contains(&admin) {
                unique.push_back(admin);
            }
        }
        if unique.len() > MAX_ADMINS {
            return Err(Error::TooManyAdmins);
        }
        env.storage().instance().set(&DataKey::Admins, &unique);
        log!(&env, "admin registry initialized with {} admins", unique.len());
        Ok(())
    }

    /// Capability check consumed by the sale contract.
    pub fn is_admin(env: Env, user: Address) -> bool {
        read_admins(&env)
            .map(|admins| admins.contains(&user))
            .unwrap_or(false)
    }

    pub fn get_admins(env: Env) -> Result<Vec<Address>, Error> {
        read_admins(&env).ok_or(Error::NotInitialized)
    }

    pub fn add_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        let mut admins = require_admin(&env, &caller)?;
        if admins.contains(&new_admin) {
            return Err(Error::AlreadyAdmin);
        }
        if admins.len() >= MAX_ADMINS {
            return Err(Error::TooManyAdmins);
        }
        admins.push_back(new_admin.clone());
        env.storage().instance().set(&DataKey::Admins, &admins);

        env.events()
            .publish((Symbol::new(&env, "admin_added"),), (caller, new_admin));
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), Error> {
        let admins = require_admin(&env, &caller)?;
        let position = admins.first_index_of(&admin).ok_or(Error::AdminNotFound)?;
        if admins.len() == 1 {
            return Err(Error::LastAdmin);
        }

        let mut updated = admins;
        updated.remove(position);
        env.storage().instance().set(&DataKey::Admins, &updated);

        env.events()
            .publish((Symbol::new(&env, "admin_removed"),), (caller, admin));
        Ok(())
    }
}

fn read_admins(env: &Env) -> Option<Vec<Address>> {
    env.storage().instance().get(&DataKey::Admins)
}

fn require_admin(env: &Env, caller: &Address) -> Result<Vec<Address>, Error> {
    let admins = read_admins(env).ok_or(Error::NotInitialized)?;
    caller.require_auth();
    if !admins.contains(caller) {
        return Err(Error::NotAdmin);
    }
    Ok(admins)
}
