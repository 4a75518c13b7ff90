//! Property tests for share string encoding/decoding

use num_bigint::BigUint;
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use primeshare::SssError;
use primeshare::codec::{self, Share, ShareFormat};

/// Wrapper for shares whose indices fit the format they come with
#[derive(Clone, Debug)]
struct FittingShare(Share, ShareFormat);

impl Arbitrary for FittingShare {
    fn arbitrary(g: &mut Gen) -> Self {
        let format = if bool::arbitrary(g) {
            ShareFormat::Wide
        } else {
            ShareFormat::Compact
        };
        let cap = format.max_index() + 1;
        let y_bytes: Vec<u8> = Vec::arbitrary(g);
        let share = Share {
            chunk: u32::arbitrary(g) % cap,
            x: u32::arbitrary(g) % cap,
            y: BigUint::from_bytes_be(&y_bytes),
            width: u32::arbitrary(g) % cap,
        };
        FittingShare(share, format)
    }
}

/// Test that every encodable share decodes to itself and its format
#[quickcheck]
fn prop_encode_decode_round_trip(input: FittingShare) -> bool {
    let FittingShare(share, format) = input;
    let Ok(encoded) = codec::encode(&share, format) else {
        return false;
    };

    // Lowercase hex only
    if !encoded
        .as_str()
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return false;
    }

    let Ok((decoded, decoded_format)) = codec::decode(encoded.as_str()) else {
        return false;
    };
    decoded == share && decoded_format == format
}

/// Test that distinct shares never share an encoding
#[quickcheck]
fn prop_encoding_is_injective(a: FittingShare, b: FittingShare) -> bool {
    let (Ok(ea), Ok(eb)) = (codec::encode(&a.0, a.1), codec::encode(&b.0, b.1)) else {
        return false;
    };
    (a.0 == b.0 && a.1 == b.1) == (ea.as_str() == eb.as_str())
}

/// Test that indices beyond the compact range are refused instead of truncated
#[quickcheck]
fn prop_compact_rejects_wide_indices(x: u16) -> bool {
    let share = Share {
        chunk: 0,
        x: u32::from(x),
        y: BigUint::from(1u32),
        width: 1,
    };
    match codec::encode(&share, ShareFormat::Compact) {
        Ok(_) => x <= 255,
        Err(SssError::IndexOutOfRange { field: "x", .. }) => x > 255,
        Err(_) => false,
    }
}

/// Test that changing any single hex digit is detected
#[quickcheck]
fn prop_single_digit_corruption_detected(input: FittingShare, position: usize, delta: u8) -> bool {
    let FittingShare(share, format) = input;
    let Ok(encoded) = codec::encode(&share, format) else {
        return false;
    };
    let mut digits: Vec<u8> = encoded.as_str().bytes().collect();
    let position = position % digits.len();
    let Some(value) = (digits[position] as char).to_digit(16) else {
        return false;
    };
    // any other nibble value
    let replaced = (value + 1 + u32::from(delta) % 15) % 16;
    let Some(replacement) = char::from_digit(replaced, 16) else {
        return false;
    };
    digits[position] = replacement as u8;

    let Ok(corrupted) = String::from_utf8(digits) else {
        return false;
    };
    matches!(
        codec::decode(&corrupted),
        Err(SssError::MalformedShare(_))
    )
}

/// Test that arbitrary strings never panic the decoder
#[quickcheck]
fn prop_decode_arbitrary_input_does_not_panic(input: String) -> bool {
    let _ = codec::decode(&input);
    true
}
