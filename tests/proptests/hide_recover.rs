//! Property tests for hide/recover workflows

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use primeshare::{Config, hide, hide_with_rng, recover, share_chunk_index};

/// Bytes per chunk with the default prime
const CHUNK_BYTES: usize = 15;

/// Wrapper for messages spanning at most four chunks
#[derive(Clone, Debug)]
struct Message(Vec<u8>);

impl Arbitrary for Message {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (4 * CHUNK_BYTES + 1);
        Message((0..len).map(|_| u8::arbitrary(g)).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Message))
    }
}

/// Wrapper for valid per-chunk share count and threshold pairs
#[derive(Clone, Copy, Debug)]
struct ValidShamirParams {
    threshold: u32,
    share_count: u32,
}

impl Arbitrary for ValidShamirParams {
    fn arbitrary(g: &mut Gen) -> Self {
        // Keep it reasonable for testing: 3..=12 shares per chunk
        let share_count = (u32::arbitrary(g) % 10) + 3;
        // 2..share_count
        let threshold = (u32::arbitrary(g) % (share_count - 2)) + 2;
        ValidShamirParams {
            threshold,
            share_count,
        }
    }
}

fn chunks_of(message: &[u8]) -> u32 {
    u32::try_from(message.len().div_ceil(CHUNK_BYTES).max(1))
        .unwrap_or_else(|_| unreachable!("at most four chunks"))
}

/// Configuration whose per-chunk split is exactly `params`
fn config_for(message: &[u8], params: ValidShamirParams) -> Config {
    let chunks = chunks_of(message);
    Config::new(params.share_count * chunks, params.threshold * chunks)
}

/// Test that hiding and recovering with every share restores the message
#[quickcheck]
fn prop_hide_recover_round_trip(message: Message, params: ValidShamirParams) -> bool {
    let Message(message) = message;
    let config = config_for(&message, params);
    let Ok(shares) = hide(&message, Some(&config)) else {
        return false;
    };
    if shares.len() != config.share_count as usize {
        return false;
    }
    recover(&shares, Some(&config)).is_ok_and(|recovered| recovered == message)
}

/// Test that a random threshold-sized selection from every chunk suffices
#[quickcheck]
fn prop_random_share_selection_works(
    message: Message,
    params: ValidShamirParams,
    selection_seed: u64,
) -> bool {
    let Message(message) = message;
    let config = config_for(&message, params);
    let Ok(shares) = hide(&message, Some(&config)) else {
        return false;
    };

    let mut rng = StdRng::seed_from_u64(selection_seed);
    let per_chunk = params.share_count as usize;
    let mut selected = Vec::new();
    for chunk in shares.chunks(per_chunk) {
        let mut chunk = chunk.to_vec();
        chunk.shuffle(&mut rng);
        selected.extend(chunk.into_iter().take(params.threshold as usize));
    }
    selected.shuffle(&mut rng);

    recover(&selected, None).is_ok_and(|recovered| recovered == message)
}

/// Test that shares are grouped by chunk, then ordered within each chunk
#[quickcheck]
fn prop_shares_ordered_by_chunk(message: Message, params: ValidShamirParams) -> bool {
    let Message(message) = message;
    let config = config_for(&message, params);
    let Ok(shares) = hide(&message, Some(&config)) else {
        return false;
    };
    let indices: Result<Vec<u32>, _> = shares.iter().map(|s| share_chunk_index(s)).collect();
    let Ok(indices) = indices else {
        return false;
    };
    let expected: Vec<u32> = (0..chunks_of(&message))
        .flat_map(|chunk| std::iter::repeat_n(chunk, params.share_count as usize))
        .collect();
    indices == expected
}

/// Test that the same seed gives the same shares
#[quickcheck]
fn prop_seeded_hide_is_deterministic(
    message: Message,
    params: ValidShamirParams,
    seed: u64,
) -> bool {
    let Message(message) = message;
    let config = config_for(&message, params);
    let first = hide_with_rng(&message, Some(&config), &mut StdRng::seed_from_u64(seed));
    let second = hide_with_rng(&message, Some(&config), &mut StdRng::seed_from_u64(seed));
    match (first, second) {
        (Ok(first), Ok(second)) => first == second,
        _ => false,
    }
}
