//! Shamir secret sharing of arbitrary messages over a prime field
//!
//! A message is cut into chunks that fit below the prime, every chunk becomes
//! the constant term of a random polynomial, and each share is one point of
//! that polynomial encoded as a checksummed hex record. Any `threshold`
//! shares of a chunk rebuild it with Lagrange interpolation.

#[cfg(feature = "cli")]
pub mod cli;
pub mod codec;
pub mod commands;
pub mod domain;
pub mod error;
pub mod field;
pub mod message;
pub mod polynomial;
pub mod random;
pub mod sss;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use codec::{Share, ShareFormat};
pub use domain::{Config, Limits, Operation};
pub use error::{Result, SssError};
pub use field::DEFAULT_PRIME;
pub use sss::{config_limits, hide, hide_with_rng, max_message_length, recover, share_chunk_index};
