//! Authorization digests signed by the off-chain authority.
//!
//! Every field is widened to a 32-byte word and the words are folded left to
//! right with `H(a, b) = sha256(a || b)`:
//!
//! ```text
//! registration:  H(H(H(expiration, user), weight), sale)
//! participation: H(H(H(H(expiration, user), amount.low), amount.high), sale)
//! ```
//!
//! Signers must reproduce this nesting exactly; the builders are public so the
//! same code can be used off-chain.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

use crate::errors::Error;
use crate::math::Uint256;

pub fn word_u64(env: &Env, value: u64) -> BytesN<32> {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    BytesN::from_array(env, &word)
}

pub fn word_u128(env: &Env, value: u128) -> BytesN<32> {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    BytesN::from_array(env, &word)
}

pub fn word_address(env: &Env, address: &Address) -> BytesN<32> {
    env.crypto().sha256(&address.clone().to_xdr(env)).into()
}

pub fn hash_pair(env: &Env, left: &BytesN<32>, right: &BytesN<32>) -> BytesN<32> {
    let mut buf = Bytes::from_array(env, &left.to_array());
    buf.extend_from_array(&right.to_array());
    env.crypto().sha256(&buf).into()
}

/// `H(...H(H(first, rest[0]), rest[1])..., rest[n])`.
pub fn hash_chain(env: &Env, first: &BytesN<32>, rest: &[BytesN<32>]) -> BytesN<32> {
    rest.iter()
        .fold(first.clone(), |acc, word| hash_pair(env, &acc, word))
}

pub fn registration_digest(
    env: &Env,
    expiration: u64,
    user: &Address,
    weight: u32,
    sale: &Address,
) -> BytesN<32> {
    hash_chain(
        env,
        &word_u64(env, expiration),
        &[
            word_address(env, user),
            word_u64(env, weight as u64),
            word_address(env, sale),
        ],
    )
}

pub fn participation_digest(
    env: &Env,
    expiration: u64,
    user: &Address,
    amount: &Uint256,
    sale: &Address,
) -> BytesN<32> {
    hash_chain(
        env,
        &word_u64(env, expiration),
        &[
            word_address(env, user),
            word_u128(env, amount.low),
            word_u128(env, amount.high),
            word_address(env, sale),
        ],
    )
}

/// Verification capability bound to one authority.
pub trait MessageAuthenticator {
    /// Fails with `SignatureExpired` past `expiration`. A signature that does
    /// not match the authority aborts the invocation inside the host.
    fn verify(
        &self,
        env: &Env,
        digest: &BytesN<32>,
        signature: &BytesN<64>,
        expiration: u64,
    ) -> Result<(), Error>;
}

pub struct Ed25519Authority {
    pub public_key: BytesN<32>,
}

impl MessageAuthenticator for Ed25519Authority {
    fn verify(
        &self,
        env: &Env,
        digest: &BytesN<32>,
        signature: &BytesN<64>,
        expiration: u64,
    ) -> Result<(), Error> {
        if env.ledger().timestamp() > expiration {
            return Err(Error::SignatureExpired);
        }
        let message = Bytes::from_array(env, &digest.to_array());
        env.crypto()
            .ed25519_verify(&self.public_key, &message, signature);
        Ok(())
    }
}
