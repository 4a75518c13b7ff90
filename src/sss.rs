//! Hiding and recovering messages
//!
//! These are the public entry points. They are stateless: every big integer
//! lives inside one call, so concurrent calls need no locking.
//!
//! # Examples
//!
//! ```rust
//! use primeshare::{Config, hide, recover};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::new(5, 3);
//! let shares = hide(b"attack at dawn", Some(&config))?;
//! assert_eq!(shares.len(), 5);
//!
//! // any 3 shares, in any order
//! let subset = [&shares[4], &shares[0], &shares[2]];
//! assert_eq!(recover(&subset, Some(&config))?, b"attack at dawn");
//! # Ok(())
//! # }
//! ```
//!
//! Recovery cannot tell whether enough shares were supplied. Fewer than the
//! threshold for a chunk silently yields the wrong bytes; making sure enough
//! genuine shares are passed is the caller's responsibility.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::codec::{self, Share};
use crate::domain::{Config, Limits};
use crate::error::{Result, SssError};
use crate::field::Field;
use crate::message::{Chunk, decode_message, encode_message};
use crate::polynomial::{Polynomial, interpolate_at_zero};

/// Splits `message` into encoded shares using operating system randomness
///
/// See [`hide_with_rng`].
///
/// # Errors
/// Same as [`hide_with_rng`].
pub fn hide(message: &[u8], config: Option<&Config>) -> Result<Vec<String>> {
    hide_with_rng(message, config, &mut OsRng)
}

/// Splits `message` into encoded shares drawing coefficients from `rng`
///
/// Returns `config.share_count` shares ordered by chunk, then by x. Every
/// configuration check runs before the first random draw.
///
/// # Errors
/// - [`SssError::ConfigRequired`] if `config` is `None`
/// - any validation error from [`Config::hide_plan`]
/// - [`SssError::RandomUnavailable`] if `rng` fails
/// - [`SssError::EncodingFailed`] if chunking does not match the plan
pub fn hide_with_rng<R>(message: &[u8], config: Option<&Config>, rng: &mut R) -> Result<Vec<String>>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let config = config.ok_or(SssError::ConfigRequired)?;
    let plan = config.hide_plan(message)?;

    let chunks = encode_message(message, plan.chunk_size);
    if chunks.is_empty() || chunks.len() != plan.chunk_count {
        return Err(SssError::EncodingFailed);
    }

    let threshold = *plan.per_chunk.threshold();
    let share_count = *plan.per_chunk.share_count();
    log::debug!(
        "hiding {} chunk(s): {} shares and threshold {} per chunk, {:?} format",
        chunks.len(),
        share_count,
        threshold,
        plan.format
    );

    let mut shares = Vec::with_capacity(chunks.len() * share_count as usize);
    for (index, chunk) in chunks.into_iter().enumerate() {
        let chunk_index = u32::try_from(index).map_err(|_| SssError::EncodingFailed)?;
        let width = u32::try_from(chunk.width).map_err(|_| SssError::EncodingFailed)?;

        let polynomial = Polynomial::random(chunk.value, threshold, &plan.field, rng)?;
        for (x, y) in polynomial.shares(share_count, &plan.field) {
            let share = Share {
                chunk: chunk_index,
                x,
                y,
                width,
            };
            shares.push(codec::encode(&share, plan.format)?.to_string());
        }
    }

    Ok(shares)
}

/// Points collected for one chunk, keyed by x
struct ChunkPoints {
    width: u32,
    points: BTreeMap<u32, BigUint>,
}

impl ChunkPoints {
    fn new(width: u32) -> Self {
        Self {
            width,
            points: BTreeMap::new(),
        }
    }

    fn insert(&mut self, position: usize, share: Share) -> Result<()> {
        if share.width != self.width {
            return Err(SssError::MalformedShare(format!(
                "share #{position} has chunk width {} but chunk {} was seen with width {}",
                share.width, share.chunk, self.width
            )));
        }
        match self.points.entry(share.x) {
            Entry::Vacant(slot) => {
                slot.insert(share.y);
            }
            Entry::Occupied(existing) if *existing.get() == share.y => {
                log::warn!(
                    "ignoring duplicate share #{position} (chunk {}, x {})",
                    share.chunk,
                    share.x
                );
            }
            Entry::Occupied(_) => {
                return Err(SssError::MalformedShare(format!(
                    "share #{position} conflicts with another share for chunk {} at x {}",
                    share.chunk, share.x
                )));
            }
        }
        Ok(())
    }
}

/// Rejects decoded shares that no hide over `field` could have produced
fn check_share(position: usize, share: &Share, field: &Field) -> Result<()> {
    if share.x == 0 {
        return Err(SssError::MalformedShare(format!(
            "share #{position}: x = 0 is reserved"
        )));
    }
    if BigUint::from(share.x) >= *field.prime() {
        return Err(SssError::MalformedShare(format!(
            "share #{position}: x = {} does not belong to the field",
            share.x
        )));
    }
    if share.y >= *field.prime() {
        return Err(SssError::MalformedShare(format!(
            "share #{position}: value does not belong to the field"
        )));
    }
    if share.width as usize > field.max_chunk_bytes() {
        return Err(SssError::MalformedShare(format!(
            "share #{position}: chunk width {} exceeds {} bytes",
            share.width,
            field.max_chunk_bytes()
        )));
    }
    Ok(())
}

/// Rebuilds a message from encoded shares
///
/// Shares may come in any order and mix chunks freely. Every supplied share
/// of a chunk takes part in its interpolation. `config` only contributes the
/// prime; `None` means the default one.
///
/// # Errors
/// - [`SssError::InvalidPrime`] if the prime does not validate
/// - [`SssError::NoShares`] if `shares` is empty
/// - [`SssError::MalformedShare`] on the first share that does not decode,
///   holds a coordinate outside the field (including the reserved x = 0),
///   claims a chunk width the field cannot produce, or contradicts another
///   share
/// - [`SssError::MissingChunk`] if a chunk index has no shares at all
pub fn recover<S: AsRef<str>>(shares: &[S], config: Option<&Config>) -> Result<Vec<u8>> {
    let default_config = Config::default();
    let config = config.unwrap_or(&default_config);
    let field = config.field()?;

    if shares.is_empty() {
        return Err(SssError::NoShares);
    }

    let mut groups: BTreeMap<u32, ChunkPoints> = BTreeMap::new();
    for (idx, raw) in shares.iter().enumerate() {
        let position = idx + 1;
        let (share, _format) = codec::decode(raw.as_ref()).map_err(|e| match e {
            SssError::MalformedShare(reason) => {
                SssError::MalformedShare(format!("share #{position}: {reason}"))
            }
            other => other,
        })?;
        check_share(position, &share, &field)?;
        groups
            .entry(share.chunk)
            .or_insert_with(|| ChunkPoints::new(share.width))
            .insert(position, share)?;
    }

    log::debug!(
        "recovering {} chunk(s) from {} share(s)",
        groups.len(),
        shares.len()
    );

    let last = groups.len().saturating_sub(1);
    let mut chunks = Vec::with_capacity(groups.len());
    for (expected, (index, group)) in (0u32..).zip(groups) {
        if index != expected {
            return Err(SssError::MissingChunk(expected));
        }
        // only the final chunk may be shorter than a full chunk
        if (expected as usize) < last && group.width as usize != field.max_chunk_bytes() {
            return Err(SssError::MalformedShare(format!(
                "chunk {index} has width {} but only the last chunk may be shorter than {}",
                group.width,
                field.max_chunk_bytes()
            )));
        }
        let points: Vec<(BigUint, BigUint)> = group
            .points
            .into_iter()
            .map(|(x, y)| (BigUint::from(x), y))
            .collect();
        let value = interpolate_at_zero(&points, &field)?;
        chunks.push(Chunk::new(value, group.width as usize));
    }

    Ok(decode_message(&chunks))
}

/// Share and threshold bounds for hiding `message` with the default configuration
///
/// # Errors
/// Returns [`SssError::MessageTooLong`] if the message cannot be hidden at all.
pub fn config_limits(message: &[u8]) -> Result<Limits> {
    Config::default().limits(message)
}

/// Longest message `hide` accepts for the configuration's prime and format
///
/// # Errors
/// Returns [`SssError::InvalidPrime`] if the prime does not validate.
pub fn max_message_length(config: Option<&Config>) -> Result<usize> {
    match config {
        Some(config) => config.max_message_length(),
        None => Config::default().max_message_length(),
    }
}

/// Chunk index an encoded share belongs to
///
/// # Errors
/// Returns [`SssError::MalformedShare`] if the share does not decode.
pub fn share_chunk_index(share: &str) -> Result<u32> {
    codec::decode(share).map(|(share, _)| share.chunk)
}
