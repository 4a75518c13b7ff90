//! Configuration validation for hiding and recovering messages

use num_bigint::BigUint;

use super::{Limits, ShareCount, Threshold};
use crate::codec::ShareFormat;
use crate::error::{Result, SssError};
use crate::field::{DEFAULT_PRIME, Field, byte_len, is_probable_prime};
use crate::message::chunk_count;

/// Operation a configuration is validated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Hide,
    Recover,
}

/// Validated pair of threshold and share count for a single chunk
///
/// Enforces the invariant that threshold < `share_count` at the type level.
#[derive(Debug, Clone, Copy)]
pub struct SplitConfig {
    threshold: Threshold,
    share_count: ShareCount,
}

impl SplitConfig {
    /// Creates a new split configuration
    ///
    /// # Errors
    /// Returns [`SssError::InvalidThreshold`] if threshold is not below share count
    ///
    /// # Examples
    ///
    /// ```rust
    /// use primeshare::domain::{ShareCount, SplitConfig, Threshold};
    ///
    /// let config = SplitConfig::new(
    ///     Threshold::new(3).unwrap(),
    ///     ShareCount::new(5).unwrap()
    /// ).unwrap();
    ///
    /// assert_eq!(*config.threshold(), 3);
    /// assert_eq!(*config.share_count(), 5);
    ///
    /// // Invalid: threshold must stay below share_count
    /// let result = SplitConfig::new(
    ///     Threshold::new(5).unwrap(),
    ///     ShareCount::new(5).unwrap()
    /// );
    /// assert!(result.is_err());
    /// ```
    pub fn new(threshold: Threshold, share_count: ShareCount) -> Result<Self> {
        if *threshold >= *share_count {
            return Err(SssError::InvalidThreshold(format!(
                "threshold {} must be lower than share count {}",
                *threshold, *share_count
            )));
        }
        Ok(Self {
            threshold,
            share_count,
        })
    }

    /// Gets the threshold value
    #[must_use]
    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Gets the share count value
    #[must_use]
    pub fn share_count(&self) -> ShareCount {
        self.share_count
    }
}

/// Everything `hide` needs once a configuration has been checked against a message
#[derive(Debug, Clone)]
pub struct HidePlan {
    pub field: Field,
    pub format: ShareFormat,
    pub chunk_size: usize,
    pub chunk_count: usize,
    /// Shares and threshold applied to every chunk
    pub per_chunk: SplitConfig,
}

/// Caller-supplied parameters for hide and recover
///
/// `share_count` and `threshold` are totals for the whole message. A message
/// split into `c` chunks gives every chunk `share_count / c` shares with a
/// threshold of `ceil(threshold / c)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub share_count: u32,
    pub threshold: u32,
    /// Field prime; [`DEFAULT_PRIME`] when unset
    pub prime: Option<BigUint>,
    pub format: ShareFormat,
}

impl Config {
    #[must_use]
    pub fn new(share_count: u32, threshold: u32) -> Self {
        Self {
            share_count,
            threshold,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_prime(mut self, prime: BigUint) -> Self {
        self.prime = Some(prime);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ShareFormat) -> Self {
        self.format = format;
        self
    }

    /// The configured prime, or the default one
    #[must_use]
    pub fn prime(&self) -> &BigUint {
        self.prime.as_ref().unwrap_or(&*DEFAULT_PRIME)
    }

    /// Resolves and checks the prime, returning the field it defines
    ///
    /// # Errors
    /// Returns [`SssError::InvalidPrime`] if the prime is shorter than 2 bytes,
    /// is not a probable prime, or yields chunks wider than the share format
    /// can record.
    pub fn field(&self) -> Result<Field> {
        let prime = self.prime();
        let len = byte_len(prime);
        if len < 2 {
            return Err(SssError::InvalidPrime(format!(
                "prime must be at least 2 bytes long (got {len})"
            )));
        }
        if !is_probable_prime(prime) {
            return Err(SssError::InvalidPrime(format!(
                "{prime} is not a probable prime"
            )));
        }
        let field = Field::new(prime.clone());
        if field.max_chunk_bytes() > self.format.max_index() as usize {
            return Err(SssError::InvalidPrime(format!(
                "{len}-byte prime is too large for the {:?} share format",
                self.format
            )));
        }
        Ok(field)
    }

    /// Largest number of chunks a message may be split into
    fn max_chunk_count(&self) -> usize {
        self.format
            .max_chunks()
            .min(self.format.max_index() / ShareCount::MIN) as usize
    }

    fn max_message_length_in(&self, field: &Field) -> usize {
        field.max_chunk_bytes() * self.max_chunk_count()
    }

    /// Longest message that can be hidden with this prime and format
    ///
    /// # Errors
    /// Returns [`SssError::InvalidPrime`] if the prime does not validate.
    pub fn max_message_length(&self) -> Result<usize> {
        Ok(self.max_message_length_in(&self.field()?))
    }

    fn check_length(&self, message: &[u8], field: &Field) -> Result<usize> {
        let max = self.max_message_length_in(field);
        if message.len() > max {
            return Err(SssError::MessageTooLong {
                length: message.len(),
                max,
            });
        }
        Ok(chunk_count(message.len(), field.max_chunk_bytes()))
    }

    /// Largest share count a single chunk may receive
    fn max_shares_per_chunk(&self, field: &Field) -> u32 {
        let below_prime = u32::try_from(&(field.prime() - 1u32)).unwrap_or(u32::MAX);
        self.format.max_index().min(below_prime)
    }

    /// Feasible share and threshold bounds for hiding `message`
    ///
    /// # Errors
    /// Returns [`SssError::InvalidPrime`] or [`SssError::MessageTooLong`].
    pub fn limits(&self, message: &[u8]) -> Result<Limits> {
        let field = self.field()?;
        let chunks = u32::try_from(self.check_length(message, &field)?)
            .map_err(|_| SssError::EncodingFailed)?;
        let per_chunk = (self.format.max_index() / chunks).min(self.max_shares_per_chunk(&field));
        let max_shares = per_chunk * chunks;
        Ok(Limits {
            min_shares: ShareCount::MIN * chunks,
            max_shares,
            min_threshold: Threshold::MIN * chunks,
            max_threshold: max_shares - chunks,
        })
    }

    /// Checks the configuration for `operation`
    ///
    /// Recovery only needs a valid prime. Hiding checks share count,
    /// threshold and prime, and when a message is given, its length and how
    /// the shares divide across its chunks.
    ///
    /// # Errors
    /// Returns the first [`SssError`] configuration variant that applies.
    pub fn validate(&self, operation: Operation, message: Option<&[u8]>) -> Result<()> {
        match operation {
            Operation::Recover => self.field().map(|_| ()),
            Operation::Hide => self.hide_plan(message.unwrap_or_default()).map(|_| ()),
        }
    }

    /// Validates the configuration for hiding `message` and derives the per-chunk split
    ///
    /// # Errors
    /// Returns [`SssError::InvalidShareCount`], [`SssError::InvalidThreshold`],
    /// [`SssError::InvalidPrime`] or [`SssError::MessageTooLong`].
    pub fn hide_plan(&self, message: &[u8]) -> Result<HidePlan> {
        let share_count = ShareCount::new(self.share_count)?;
        let max_shares = self.format.max_index();
        if *share_count > max_shares {
            return Err(SssError::InvalidShareCount(format!(
                "share count must be at most {max_shares} (got {})",
                *share_count
            )));
        }
        let threshold = Threshold::new(self.threshold)?;
        if *threshold >= *share_count {
            return Err(SssError::InvalidThreshold(format!(
                "threshold {} must be lower than share count {}",
                *threshold, *share_count
            )));
        }

        let field = self.field()?;
        let chunk_count = self.check_length(message, &field)?;
        let chunks = u32::try_from(chunk_count).map_err(|_| SssError::EncodingFailed)?;

        if *share_count % chunks != 0 || *share_count < ShareCount::MIN * chunks {
            return Err(SssError::InvalidShareCount(format!(
                "{} shares cannot be split across {chunks} chunks (need a multiple of {chunks}, at least {})",
                *share_count,
                ShareCount::MIN * chunks
            )));
        }
        if *threshold < Threshold::MIN * chunks || *threshold > *share_count - chunks {
            return Err(SssError::InvalidThreshold(format!(
                "threshold must be between {} and {} for {chunks} chunks (got {})",
                Threshold::MIN * chunks,
                *share_count - chunks,
                *threshold
            )));
        }

        let shares_per_chunk = *share_count / chunks;
        if shares_per_chunk > self.max_shares_per_chunk(&field) {
            return Err(SssError::InvalidShareCount(format!(
                "{shares_per_chunk} shares per chunk do not fit below the prime"
            )));
        }
        let per_chunk = SplitConfig::new(
            Threshold::new(threshold.div_ceil(chunks))?,
            ShareCount::new(shares_per_chunk)?,
        )?;

        Ok(HidePlan {
            chunk_size: field.max_chunk_bytes(),
            field,
            format: self.format,
            chunk_count,
            per_chunk,
        })
    }
}
