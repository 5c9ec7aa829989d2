#![no_std]

mod collaborators;
mod config;
mod contract;
mod errors;
mod events;
mod math;
mod participation;
mod phase;
mod registration;
mod selection;
mod settlement;
mod signature;
mod storage;
mod types;
mod vesting;


pub use collaborators::{AdminCapability, RandomSource};
pub use config::MAX_VESTING_PORTIONS;
pub use contract::{IdoSaleContract, IdoSaleContractClient};
pub use errors::Error;
pub use math::{Uint256, PRICE_DECIMALS};
pub use signature::{participation_digest, registration_digest};
pub use types::*;
