//! Threshold newtype for Shamir Secret Sharing

use crate::error::{Result, SssError};

/// Shares needed to reconstruct one chunk (>= 2)
///
/// Invariant: threshold >= 2 (enforced at construction)
/// A threshold of 1 provides no security benefit since any single share can recover the entire secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u32);

impl Threshold {
    /// Minimum valid threshold
    pub const MIN: u32 = 2;

    /// Creates a new threshold, returning an error if value < 2
    ///
    /// # Errors
    /// Returns [`SssError::InvalidThreshold`] if the threshold is less than 2
    ///
    /// # Examples
    ///
    /// ```rust
    /// use primeshare::domain::Threshold;
    ///
    /// let threshold = Threshold::new(3).unwrap();
    /// assert_eq!(*threshold, 3);
    ///
    /// // Invalid: threshold must be at least 2
    /// assert!(Threshold::new(1).is_err());
    /// assert!(Threshold::new(0).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self> {
        if value < Self::MIN {
            return Err(SssError::InvalidThreshold(format!(
                "threshold must be at least {} (got {value})",
                Self::MIN
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for Threshold {
    type Target = u32;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
