use anyhow::{Context, Result, anyhow, bail};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::codec::{self, ShareFormat};
use crate::domain::{Config, Limits};
use crate::sss;

/// Parses a decimal prime given on the command line or from a host runtime
///
/// Only syntax is checked here; primality is checked when the configuration
/// is used.
///
/// # Errors
/// Returns an error if the string is empty or not a decimal number
pub fn parse_prime(s: &str) -> Result<BigUint> {
    let digits = s.trim();
    if digits.is_empty() {
        bail!("Prime must not be empty");
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| anyhow!("'{digits}' is not a valid decimal number"))
}

/// Share format selected by the `wide` switch
#[must_use]
pub fn share_format(wide: bool) -> ShareFormat {
    if wide {
        ShareFormat::Wide
    } else {
        ShareFormat::Compact
    }
}

/// Builds a configuration from loosely typed inputs
///
/// # Errors
/// Returns an error if `prime` does not parse
pub fn build_config(
    share_count: u32,
    threshold: u32,
    prime: Option<&str>,
    wide: bool,
) -> Result<Config> {
    let mut config = Config::new(share_count, threshold).with_format(share_format(wide));
    if let Some(prime) = prime {
        config = config.with_prime(parse_prime(prime).context("Failed to parse prime")?);
    }
    Ok(config)
}

/// Result of a hide operation (for JSON serialization)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HideResult {
    /// The generated shares as hex strings
    pub shares: Vec<String>,
    /// Total number of shares generated
    pub share_count: u32,
    /// Total threshold the shares were generated for
    pub threshold: u32,
    /// Number of chunks the message was split into
    pub chunk_count: u32,
    /// Shares issued for every chunk
    pub shares_per_chunk: u32,
    /// Shares of every chunk needed to recover it
    pub threshold_per_chunk: u32,
}

impl HideResult {
    /// One-line description of what recovery needs
    #[must_use]
    pub fn summary(&self) -> String {
        if self.chunk_count == 1 {
            format!(
                "Created {} shares, any {} of them recover the message",
                self.share_count, self.threshold
            )
        } else {
            format!(
                "Created {} shares over {} chunks, recovery needs {} of the {} shares of every chunk",
                self.share_count, self.chunk_count, self.threshold_per_chunk, self.shares_per_chunk
            )
        }
    }
}

/// Metadata readable from a single share without recovering anything
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShareInfo {
    pub chunk: u32,
    pub x: u32,
    pub width: u32,
    pub wide: bool,
}

/// Hide a message into shares
///
/// # Errors
/// Returns an error if the configuration is invalid for this message or
/// randomness is unavailable
pub fn hide_message(message: &[u8], config: &Config) -> Result<HideResult> {
    let shares = sss::hide(message, Some(config)).context("Failed to hide message")?;
    let chunk_count = match shares.last() {
        Some(last) => sss::share_chunk_index(last).context("Failed to read chunk layout")? + 1,
        None => bail!("Hiding produced no shares"),
    };
    Ok(HideResult {
        share_count: config.share_count,
        threshold: config.threshold,
        chunk_count,
        shares_per_chunk: config.share_count / chunk_count,
        threshold_per_chunk: config.threshold.div_ceil(chunk_count),
        shares,
    })
}

/// Recover a message from shares
///
/// # Errors
/// Returns an error if any share is malformed, a chunk is missing, or the
/// prime is invalid
pub fn recover_message<S: AsRef<str>>(shares: &[S], config: &Config) -> Result<Zeroizing<Vec<u8>>> {
    if shares.is_empty() {
        bail!("No shares provided");
    }
    let message = sss::recover(shares, Some(config)).context("Failed to recover message")?;
    Ok(Zeroizing::new(message))
}

/// Recover a message that is expected to be UTF-8 text
///
/// # Errors
/// Same as [`recover_message`], plus an error when the bytes are not UTF-8
pub fn recover_text<S: AsRef<str>>(shares: &[S], config: &Config) -> Result<Zeroizing<String>> {
    let bytes = recover_message(shares, config)?;
    let text = std::str::from_utf8(&bytes).context("Recovered message is not valid UTF-8")?;
    Ok(Zeroizing::new(text.to_owned()))
}

/// Share and threshold bounds for hiding `message`
///
/// # Errors
/// Returns an error if the message is too long for the format
pub fn message_limits(message: &[u8], wide: bool) -> Result<Limits> {
    Config::default()
        .with_format(share_format(wide))
        .limits(message)
        .context("Failed to compute limits")
}

/// Longest message the configuration can hide
///
/// # Errors
/// Returns an error if the prime is invalid
pub fn max_length(config: &Config) -> Result<usize> {
    sss::max_message_length(Some(config)).context("Failed to compute maximum message length")
}

/// Reads the metadata of a share
///
/// # Errors
/// Returns an error if the share does not decode
pub fn inspect_share(share: &str) -> Result<ShareInfo> {
    let (share, format) = codec::decode(share).context("Failed to parse share")?;
    Ok(ShareInfo {
        chunk: share.chunk,
        x: share.x,
        width: share.width,
        wide: format == ShareFormat::Wide,
    })
}

/// JSON envelope handed to host runtimes
///
/// Exactly one of `data` and `error` is set.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
            },
            Err(e) => Self {
                data: None,
                error: Some(format!("{e:#}")),
            },
        }
    }
}

impl<T: Serialize> Response<T> {
    /// Serializes the envelope
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Serialization failed")
    }
}
