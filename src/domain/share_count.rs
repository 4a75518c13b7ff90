//! `ShareCount` newtype for Shamir Secret Sharing

use crate::error::{Result, SssError};

/// Number of shares generated for one chunk (>= 3)
///
/// The lower bound follows from `2 <= threshold < share_count`. The upper
/// bound depends on the share format and is checked by [`super::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShareCount(u32);

impl ShareCount {
    /// Minimum valid share count
    pub const MIN: u32 = 3;

    /// Creates a new share count
    ///
    /// # Errors
    /// Returns [`SssError::InvalidShareCount`] if count is below 3
    ///
    /// # Examples
    ///
    /// ```rust
    /// use primeshare::domain::ShareCount;
    ///
    /// let count = ShareCount::new(5).unwrap();
    /// assert_eq!(*count, 5);
    ///
    /// assert!(ShareCount::new(0).is_err());
    /// assert!(ShareCount::new(2).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self> {
        if value < Self::MIN {
            return Err(SssError::InvalidShareCount(format!(
                "share count must be at least {} (got {value})",
                Self::MIN
            )));
        }
        Ok(Self(value))
    }
}

impl std::ops::Deref for ShareCount {
    type Target = u32;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
