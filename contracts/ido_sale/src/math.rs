use core::cmp::Ordering;

use soroban_sdk::{contracttype, Env, U256};

use crate::errors::Error;

/// Fixed-point scale of `token_price`: 18 decimals.
pub const PRICE_DECIMALS: u32 = 18;

/// 256-bit unsigned amount as it crosses the contract boundary: two 128-bit
/// limbs, low first. Products are computed on the host's `U256`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[contracttype]
pub struct Uint256 {
    pub low: u128,
    pub high: u128,
}

impl Uint256 {
    pub const ZERO: Uint256 = Uint256 { low: 0, high: 0 };

    pub const fn from_u128(value: u128) -> Self {
        Self {
            low: value,
            high: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    pub fn checked_add(self, other: Self) -> Result<Self, Error> {
        let (low, carry) = self.low.overflowing_add(other.low);
        let high = self
            .high
            .checked_add(other.high)
            .and_then(|h| h.checked_add(carry as u128))
            .ok_or(Error::AmountOverflow)?;
        Ok(Self { low, high })
    }

    pub fn checked_sub(self, other: Self) -> Result<Self, Error> {
        let (low, borrow) = self.low.overflowing_sub(other.low);
        let high = self
            .high
            .checked_sub(other.high)
            .and_then(|h| h.checked_sub(borrow as u128))
            .ok_or(Error::AmountOverflow)?;
        Ok(Self { low, high })
    }

    /// Token interfaces on this host move `i128`.
    pub fn to_i128(self) -> Result<i128, Error> {
        if self.high != 0 || self.low > i128::MAX as u128 {
            return Err(Error::AmountOverflow);
        }
        Ok(self.low as i128)
    }

    pub fn to_u256(self, env: &Env) -> U256 {
        U256::from_parts(
            env,
            (self.high >> 64) as u64,
            self.high as u64,
            (self.low >> 64) as u64,
            self.low as u64,
        )
    }

    pub fn from_u256(value: &U256) -> Self {
        let mut buf = [0u8; 32];
        value.to_be_bytes().copy_into_slice(&mut buf);

        let mut high = [0u8; 16];
        let mut low = [0u8; 16];
        high.copy_from_slice(&buf[..16]);
        low.copy_from_slice(&buf[16..]);
        Self {
            low: u128::from_be_bytes(low),
            high: u128::from_be_bytes(high),
        }
    }
}

impl Ord for Uint256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.high
            .cmp(&other.high)
            .then_with(|| self.low.cmp(&other.low))
    }
}

impl PartialOrd for Uint256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// floor(a * b / divisor) with a full 256-bit intermediate.
pub fn mul_div(env: &Env, a: Uint256, b: Uint256, divisor: Uint256) -> Uint256 {
    let product = a.to_u256(env).mul(&b.to_u256(env));
    Uint256::from_u256(&product.div(&divisor.to_u256(env)))
}

/// Sale tokens bought for `amount_paid` at `token_price` (floor).
pub fn tokens_for_payment(env: &Env, amount_paid: Uint256, token_price: Uint256) -> Uint256 {
    let scale = Uint256::from_u256(&U256::from_u32(env, 10).pow(PRICE_DECIMALS));
    mul_div(env, amount_paid, scale, token_price)
}

/// Share of `amount_bought` released by one vesting portion (floor).
pub fn portion_amount(env: &Env, amount_bought: Uint256, percent: u32, precision: u32) -> Uint256 {
    mul_div(
        env,
        amount_bought,
        Uint256::from_u128(percent as u128),
        Uint256::from_u128(precision as u128),
    )
}
