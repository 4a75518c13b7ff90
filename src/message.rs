//! Splitting messages into field-sized chunks and joining them back

use num_bigint::BigUint;

/// One field-sized piece of a message
///
/// `width` is the number of message bytes the chunk stands for. It is
/// carried separately because the integer value drops leading zero bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    pub value: BigUint,
    pub width: usize,
}

impl Chunk {
    #[must_use]
    pub fn new(value: BigUint, width: usize) -> Self {
        Self { value, width }
    }

    /// Restores the exact bytes of this chunk, left-padded to `width`
    ///
    /// A value wider than `width` (only possible when it was interpolated
    /// from too few shares) keeps its low-order `width` bytes.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let raw = crate::field::to_minimal_bytes(&self.value);
        if raw.len() >= self.width {
            return raw[raw.len() - self.width..].to_vec();
        }
        let mut bytes = vec![0u8; self.width - raw.len()];
        bytes.extend_from_slice(&raw);
        bytes
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Number of chunks `encode_message` produces for a message of `len` bytes
#[must_use]
pub fn chunk_count(len: usize, chunk_size: usize) -> usize {
    if chunk_size == 0 {
        return 0;
    }
    len.div_ceil(chunk_size).max(1)
}

/// Splits `message` into consecutive big-endian chunks of at most `chunk_size` bytes
///
/// An empty message yields a single zero-valued chunk of width 0. A zero
/// `chunk_size` yields no chunks.
#[must_use]
pub fn encode_message(message: &[u8], chunk_size: usize) -> Vec<Chunk> {
    if chunk_size == 0 {
        return Vec::new();
    }
    if message.len() <= chunk_size {
        return vec![Chunk::new(BigUint::from_bytes_be(message), message.len())];
    }
    message
        .chunks(chunk_size)
        .map(|part| Chunk::new(BigUint::from_bytes_be(part), part.len()))
        .collect()
}

/// Concatenates the bytes of every chunk in order
#[must_use]
pub fn decode_message(chunks: &[Chunk]) -> Vec<u8> {
    chunks.iter().flat_map(Chunk::to_bytes).collect()
}
