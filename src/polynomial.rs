//! Random polynomials, share evaluation and Lagrange interpolation

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use crate::error::Result;
use crate::field::Field;
use crate::random::random_field_element;

/// Polynomial whose constant term is a secret chunk
///
/// Lives only while one chunk's shares are generated. `Debug` prints the
/// degree and nothing else.
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Wraps explicit coefficients, lowest degree first
    #[must_use]
    pub fn from_coefficients(coefficients: Vec<BigUint>) -> Self {
        Self { coefficients }
    }

    /// Builds `[secret, r1, .., r(threshold-1)]` with every `ri` freshly drawn
    ///
    /// The result needs exactly `threshold` points to be reconstructed.
    ///
    /// # Errors
    /// Returns [`crate::SssError::RandomUnavailable`] if a draw fails.
    pub fn random<R>(secret: BigUint, threshold: u32, field: &Field, rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut coefficients = Vec::with_capacity(threshold as usize);
        coefficients.push(secret);
        for _ in 1..threshold {
            coefficients.push(random_field_element(rng, field.prime())?);
        }
        Ok(Self { coefficients })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluates the polynomial at `x` with Horner's method
    #[must_use]
    pub fn evaluate(&self, x: &BigUint, field: &Field) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, coeff| {
                field.add(&field.mul(&acc, x), coeff)
            })
    }

    /// Evaluates at `x = 1..=share_count`
    ///
    /// `x = 0` is the secret itself and is never issued.
    #[must_use]
    pub fn shares(&self, share_count: u32, field: &Field) -> Vec<(u32, BigUint)> {
        (1..=share_count)
            .map(|x| (x, self.evaluate(&BigUint::from(x), field)))
            .collect()
    }
}

impl std::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Polynomial")
            .field("terms", &self.coefficients.len())
            .finish_non_exhaustive()
    }
}

/// Lagrange interpolation of `points` evaluated at `x`
///
/// `L(x) = sum_i y_i * prod_{j != i} (x - x_j) / (x_i - x_j)`, all in the field.
/// The x coordinates must be pairwise distinct modulo the prime; their order
/// does not matter.
///
/// # Errors
/// Returns [`crate::SssError::NoInverse`] when two x coordinates collide.
pub fn interpolate_at(
    points: &[(BigUint, BigUint)],
    x: &BigUint,
    field: &Field,
) -> Result<BigUint> {
    let mut result = BigUint::zero();
    for (i, (xi, yi)) in points.iter().enumerate() {
        let mut numerator = BigUint::one();
        let mut denominator = BigUint::one();
        for (j, (xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = field.mul(&numerator, &field.sub(x, xj));
            denominator = field.mul(&denominator, &field.sub(xi, xj));
        }
        let term = field.mul(&field.mul(yi, &numerator), &field.inverse(&denominator)?);
        result = field.add(&result, &term);
    }
    Ok(result)
}

/// Recovers the constant term from `points`
///
/// # Errors
/// Returns [`crate::SssError::NoInverse`] when two x coordinates collide.
pub fn interpolate_at_zero(points: &[(BigUint, BigUint)], field: &Field) -> Result<BigUint> {
    interpolate_at(points, &BigUint::zero(), field)
}
