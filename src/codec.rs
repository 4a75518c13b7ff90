//! Share string encoding
//!
//! Each share is a hex string of a fixed-layout byte record:
//!
//! ```text
//! y (big-endian, minimal) || width (W) || x (W) || chunk (W) || tag (1) || crc32 (4)
//! ```
//!
//! - `y` is the polynomial value; zero is stored as no bytes at all
//! - `width` is the byte length of the message chunk the share belongs to
//! - `x` is the evaluation point and `chunk` the chunk index
//! - `tag` names the [`ShareFormat`], which fixes the index width `W`
//! - `crc32` (CRC-32/ISO-HDLC) covers every preceding byte
//!
//! The trailer has a fixed size once the tag is known, so `y` is whatever
//! precedes it and no external length metadata is needed.
//!
//! # Examples
//!
//! ```rust
//! use num_bigint::BigUint;
//! use primeshare::codec::{Share, ShareFormat, decode, encode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let share = Share {
//!     chunk: 0,
//!     x: 3,
//!     y: BigUint::from(0xdead_beefu32),
//!     width: 12,
//! };
//! let encoded = encode(&share, ShareFormat::Compact)?;
//! assert_eq!(encoded.as_str(), "deadbeef0c030001e51a1a95");
//!
//! let (decoded, format) = decode(encoded.as_str())?;
//! assert_eq!(decoded, share);
//! assert_eq!(format, ShareFormat::Compact);
//! # Ok(())
//! # }
//! ```

use crc::{CRC_32_ISO_HDLC, Crc};
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::error::{Result, SssError};
use crate::field::to_minimal_bytes;

/// CRC32 algorithm for share integrity checking
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Bytes after the index fields: format tag plus checksum
const TRAILER_LEN: usize = 1 + 4;

/// Layout version of a share record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShareFormat {
    /// One byte each for width, x and chunk index
    #[default]
    Compact,
    /// Two bytes each for width, x and chunk index
    Wide,
}

impl ShareFormat {
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Compact => 0x01,
            Self::Wide => 0x02,
        }
    }

    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(Self::Compact),
            0x02 => Some(Self::Wide),
            _ => None,
        }
    }

    /// Bytes used by each index field
    #[must_use]
    pub const fn index_width(self) -> usize {
        match self {
            Self::Compact => 1,
            Self::Wide => 2,
        }
    }

    /// Largest value an index field can hold
    #[must_use]
    pub const fn max_index(self) -> u32 {
        match self {
            Self::Compact => u8::MAX as u32,
            Self::Wide => u16::MAX as u32,
        }
    }

    /// Number of distinct chunk indices the format can address
    #[must_use]
    pub const fn max_chunks(self) -> u32 {
        self.max_index() + 1
    }

    /// Shortest valid record: empty `y` plus the fixed trailer
    #[must_use]
    pub const fn min_record_len(self) -> usize {
        3 * self.index_width() + TRAILER_LEN
    }
}

/// One decoded point of one chunk's polynomial
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    pub chunk: u32,
    pub x: u32,
    pub y: BigUint,
    pub width: u32,
}

impl std::fmt::Debug for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Share")
            .field("chunk", &self.chunk)
            .field("x", &self.x)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// An encoded share string
///
/// Wraps the hex in `Zeroizing` to ensure secure memory cleanup.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareString(Zeroizing<String>);

impl ShareString {
    /// Gets the share as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShareString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &*self.0)
    }
}

fn check_index(field: &'static str, value: u32, format: ShareFormat) -> Result<()> {
    if value > format.max_index() {
        return Err(SssError::IndexOutOfRange {
            field,
            value: u64::from(value),
            max: u64::from(format.max_index()),
        });
    }
    Ok(())
}

fn push_index(record: &mut Vec<u8>, value: u32, format: ShareFormat) {
    let bytes = value.to_be_bytes();
    record.extend_from_slice(&bytes[bytes.len() - format.index_width()..]);
}

fn read_index(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte))
}

/// Encodes a share as a hex string in the given format
///
/// # Errors
/// Returns [`SssError::IndexOutOfRange`] if the chunk index, x or width does
/// not fit the format's index width.
pub fn encode(share: &Share, format: ShareFormat) -> Result<ShareString> {
    check_index("x", share.x, format)?;
    check_index("chunk index", share.chunk, format)?;
    check_index("chunk width", share.width, format)?;

    let y = to_minimal_bytes(&share.y);
    let mut record = Zeroizing::new(Vec::with_capacity(y.len() + format.min_record_len()));
    record.extend_from_slice(&y);
    push_index(&mut record, share.width, format);
    push_index(&mut record, share.x, format);
    push_index(&mut record, share.chunk, format);
    record.push(format.tag());

    let checksum = CRC32.checksum(&record);
    record.extend_from_slice(&checksum.to_be_bytes());

    Ok(ShareString(Zeroizing::new(hex::encode(&*record))))
}

/// Decodes a hex share string into its share and format
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// Returns [`SssError::MalformedShare`] if the string is not hex, is shorter
/// than the minimum record, carries an unknown format tag, or fails the
/// checksum.
pub fn decode(share: &str) -> Result<(Share, ShareFormat)> {
    let record = Zeroizing::new(
        hex::decode(share.trim())
            .map_err(|e| SssError::MalformedShare(format!("invalid hex: {e}")))?,
    );

    if record.len() < TRAILER_LEN {
        return Err(SssError::MalformedShare(format!(
            "record too short: {} bytes",
            record.len()
        )));
    }

    let (body, checksum_bytes) = record.split_at(record.len() - 4);
    let expected_checksum = CRC32.checksum(body);
    let actual_checksum = read_index(checksum_bytes);
    if expected_checksum != actual_checksum {
        return Err(SssError::MalformedShare(format!(
            "checksum verification failed: expected 0x{expected_checksum:08x}, got 0x{actual_checksum:08x}"
        )));
    }

    let tag = body[body.len() - 1];
    let format = ShareFormat::from_tag(tag)
        .ok_or_else(|| SssError::MalformedShare(format!("unknown format tag 0x{tag:02x}")))?;

    if record.len() < format.min_record_len() {
        return Err(SssError::MalformedShare(format!(
            "record too short: {} bytes (need at least {})",
            record.len(),
            format.min_record_len()
        )));
    }

    let w = format.index_width();
    let indices_start = body.len() - 1 - 3 * w;
    let (y, indices) = body[..body.len() - 1].split_at(indices_start);

    let share = Share {
        y: BigUint::from_bytes_be(y),
        width: read_index(&indices[..w]),
        x: read_index(&indices[w..2 * w]),
        chunk: read_index(&indices[2 * w..]),
    };
    Ok((share, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(chunk: u32, x: u32, y: u64, width: u32) -> Share {
        Share {
            chunk,
            x,
            y: BigUint::from(y),
            width,
        }
    }

    #[test]
    fn test_round_trip_all_compact_x() {
        for x in 0..=255 {
            for y in [0u64, 1, 0xff, 0x00ff_ff00, u64::MAX] {
                let original = share(7, x, y, 15);
                let encoded = encode(&original, ShareFormat::Compact).unwrap();
                let (decoded, format) = decode(encoded.as_str()).unwrap();
                assert_eq!(decoded, original);
                assert_eq!(format, ShareFormat::Compact);
            }
        }
    }

    #[test]
    fn test_round_trip_boundaries() {
        for format in [ShareFormat::Compact, ShareFormat::Wide] {
            let max = format.max_index();
            for (chunk, x, width) in [(0, 0, 0), (max, max, max), (0, max, 1), (max, 1, 0)] {
                let original = share(chunk, x, 0, width);
                let encoded = encode(&original, format).unwrap();
                assert_eq!(decode(encoded.as_str()).unwrap(), (original, format));
            }
        }
    }

    #[test]
    fn test_zero_y_is_minimal_record() {
        let encoded = encode(&share(0, 0, 0, 0), ShareFormat::Compact).unwrap();
        assert_eq!(encoded.as_str().len(), 2 * ShareFormat::Compact.min_record_len());
        let encoded = encode(&share(0, 0, 0, 0), ShareFormat::Wide).unwrap();
        assert_eq!(encoded.as_str().len(), 2 * ShareFormat::Wide.min_record_len());
    }

    #[test]
    fn test_large_y_round_trip() {
        let y = crate::field::DEFAULT_PRIME.clone() - BigUint::from(1u32);
        let original = Share {
            chunk: 1000,
            x: 300,
            y,
            width: 15,
        };
        let encoded = encode(&original, ShareFormat::Wide).unwrap();
        assert_eq!(decode(encoded.as_str()).unwrap().0, original);
    }

    #[test]
    fn test_layout_is_stable() {
        let encoded = encode(&share(2, 1, 0xabcd, 3), ShareFormat::Compact).unwrap();
        assert!(encoded.as_str().starts_with("abcd03010201"));
        let encoded = encode(&share(2, 1, 0xabcd, 3), ShareFormat::Wide).unwrap();
        assert!(encoded.as_str().starts_with("abcd000300010002"));
    }

    #[test]
    fn test_index_out_of_range() {
        let err = encode(&share(0, 256, 1, 1), ShareFormat::Compact).unwrap_err();
        assert!(matches!(
            err,
            SssError::IndexOutOfRange {
                field: "x",
                value: 256,
                max: 255
            }
        ));
        assert!(matches!(
            encode(&share(256, 1, 1, 1), ShareFormat::Compact),
            Err(SssError::IndexOutOfRange { field: "chunk index", .. })
        ));
        assert!(matches!(
            encode(&share(0, 1, 1, 65536), ShareFormat::Wide),
            Err(SssError::IndexOutOfRange { field: "chunk width", .. })
        ));
        assert!(encode(&share(256, 256, 1, 256), ShareFormat::Wide).is_ok());
    }

    #[test]
    fn test_invalid_hex() {
        assert!(matches!(decode("not hex"), Err(SssError::MalformedShare(_))));
        assert!(matches!(decode("abc"), Err(SssError::MalformedShare(_))));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(decode(""), Err(SssError::MalformedShare(_))));
        assert!(matches!(decode("01020304"), Err(SssError::MalformedShare(_))));
    }

    #[test]
    fn test_short_record_with_valid_checksum() {
        // tag for the wide format but only one index byte in front of it
        let mut record = vec![0x05, 0x02];
        record.extend_from_slice(&CRC32.checksum(&record).to_be_bytes());
        let err = decode(&hex::encode(record)).unwrap_err();
        assert!(err.to_string().contains("record too short"));
    }

    #[test]
    fn test_unknown_tag() {
        let mut record = vec![0x01, 0x01, 0x00, 0x09];
        record.extend_from_slice(&CRC32.checksum(&record).to_be_bytes());
        let err = decode(&hex::encode(record)).unwrap_err();
        assert!(err.to_string().contains("unknown format tag"));
    }

    #[test]
    fn test_checksum_detects_corruption() {
        let encoded = encode(&share(0, 1, 0xdead_beef, 4), ShareFormat::Compact).unwrap();
        let mut corrupted = encoded.as_str().to_string();
        let replacement = if corrupted.starts_with('0') { "1" } else { "0" };
        corrupted.replace_range(0..1, replacement);
        let err = decode(&corrupted).unwrap_err();
        assert!(err.to_string().contains("checksum verification failed"));
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let original = share(1, 2, 3, 4);
        let encoded = encode(&original, ShareFormat::Compact).unwrap();
        let padded = format!("  {encoded}\n");
        assert_eq!(decode(&padded).unwrap().0, original);
    }

    #[test]
    fn test_debug_hides_y() {
        let printed = format!("{:?}", share(0, 1, 123_456_789, 4));
        assert!(!printed.contains("123456789"));
    }
}
