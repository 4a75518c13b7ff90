//! Random field elements
//!
//! The entropy source is any [`RngCore`] + [`CryptoRng`], so callers can pass
//! a seeded generator in tests while production paths use
//! [`rand::rngs::OsRng`].

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Result, SssError};
use crate::field::byte_len;

/// Extra random bytes drawn beyond the prime's length to flatten modulo bias
const EXTRA_BYTES: usize = 8;

/// Draws a uniformly distributed element of `[0, prime)`
///
/// Reads `byte_len(prime) + 8` fresh bytes on every call and reduces them
/// modulo the prime.
///
/// # Errors
/// Returns [`SssError::RandomUnavailable`] if the source fails to produce bytes.
pub fn random_field_element<R>(rng: &mut R, prime: &BigUint) -> Result<BigUint>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buf = Zeroizing::new(vec![0u8; byte_len(prime) + EXTRA_BYTES]);
    rng.try_fill_bytes(&mut buf)
        .map_err(SssError::RandomUnavailable)?;
    Ok(BigUint::from_bytes_be(&buf) % prime)
}
