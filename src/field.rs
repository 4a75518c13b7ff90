//! Prime field arithmetic over arbitrary-precision integers
//!
//! All values handed out by [`Field`] are reduced into `[0, prime)`.

use std::sync::LazyLock;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::error::{Result, SssError};

/// 12th Mersenne prime (2^127 - 1), used when a configuration sets no prime
pub static DEFAULT_PRIME: LazyLock<BigUint> =
    LazyLock::new(|| (BigUint::one() << 127usize) - BigUint::one());

/// Small primes used for trial division and as Miller-Rabin witnesses
const SMALL_PRIMES: [u32; 20] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71,
];

/// Number of bytes needed to hold `value` in big-endian form (0 for zero)
#[must_use]
pub fn byte_len(value: &BigUint) -> usize {
    value.bits().div_ceil(8) as usize
}

/// Minimal big-endian bytes of `value`; zero encodes as an empty slice
#[must_use]
pub fn to_minimal_bytes(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.to_bytes_be()
    }
}

/// Miller-Rabin probable prime test
///
/// Trial-divides by the first 20 primes, then runs one Miller-Rabin round
/// for each of them as a witness. Deterministic for every value below
/// 3.3 * 10^24 and probabilistic above.
#[must_use]
pub fn is_probable_prime(n: &BigUint) -> bool {
    if *n < BigUint::from(2u32) {
        return false;
    }
    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if *n == p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - BigUint::one();
    // n is odd and > 71 here, so n - 1 is even and non-zero
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for a in SMALL_PRIMES {
        let mut x = BigUint::from(a).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Arithmetic modulo a prime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    prime: BigUint,
}

impl Field {
    /// Creates a field over `prime`
    ///
    /// No primality check happens here; configuration validation owns that.
    #[must_use]
    pub fn new(prime: BigUint) -> Self {
        Self { prime }
    }

    #[must_use]
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    /// Largest number of message bytes a single chunk may hold
    ///
    /// One byte less than the prime's length, so every chunk value is below
    /// the prime.
    #[must_use]
    pub fn max_chunk_bytes(&self) -> usize {
        byte_len(&self.prime).saturating_sub(1)
    }

    #[must_use]
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.prime
    }

    #[must_use]
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.prime
    }

    #[must_use]
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let b = self.reduce(b);
        if a >= b {
            a - b
        } else {
            &self.prime - (b - a)
        }
    }

    #[must_use]
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.prime
    }

    /// Modular inverse via the extended Euclidean algorithm
    ///
    /// # Errors
    /// Returns [`SssError::NoInverse`] when `a` is a multiple of the prime or
    /// shares a factor with it.
    pub fn inverse(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(SssError::NoInverse);
        }

        let modulus = BigInt::from(self.prime.clone());
        let (mut old_r, mut r) = (BigInt::from(a), modulus.clone());
        let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

        while !r.is_zero() {
            let quotient = &old_r / &r;
            let next_r = &old_r - &quotient * &r;
            old_r = std::mem::replace(&mut r, next_r);
            let next_s = &old_s - &quotient * &s;
            old_s = std::mem::replace(&mut s, next_s);
        }

        if !old_r.is_one() {
            return Err(SssError::NoInverse);
        }

        let mut inverse = old_s % &modulus;
        if inverse.is_negative() {
            inverse += &modulus;
        }
        inverse.to_biguint().ok_or(SssError::NoInverse)
    }
}
