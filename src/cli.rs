use clap::{Parser, Subcommand};
use num_bigint::BigUint;

use crate::commands::parse_prime;
use crate::domain::Threshold;

/// Validates that threshold is at least 2
/// A threshold of 1 defeats the purpose of Shamir Secret Sharing
/// (any single share would be able to recover the entire secret)
fn validate_threshold(s: &str) -> Result<Threshold, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    Threshold::new(value).map_err(|e| e.to_string())
}

fn validate_prime(s: &str) -> Result<BigUint, String> {
    parse_prime(s).map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(name = "primeshare")]
#[command(about = "Hide messages in Shamir Secret Shares over a prime field")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hide a message read from stdin into shares
    Hide {
        /// Total number of shares to create
        #[arg(short, long)]
        shares: u32,

        /// Threshold: minimum number of shares needed to recover (must be >= 2)
        #[arg(short, long, value_parser = validate_threshold)]
        threshold: Threshold,

        /// Field prime in decimal (defaults to 2^127 - 1)
        #[arg(short, long, value_parser = validate_prime)]
        prime: Option<BigUint>,

        /// Use two-byte indices, for long messages or many shares
        #[arg(long)]
        wide: bool,
    },
    /// Recover a message from shares read from stdin
    Recover {
        /// Field prime the shares were created with, in decimal
        #[arg(short, long, value_parser = validate_prime)]
        prime: Option<BigUint>,
    },
    /// Show share and threshold bounds for a message read from stdin
    Limits {
        /// Compute bounds for the wide share format
        #[arg(long)]
        wide: bool,
    },
    /// Show the longest message that can be hidden
    MaxLength {
        /// Field prime in decimal (defaults to 2^127 - 1)
        #[arg(short, long, value_parser = validate_prime)]
        prime: Option<BigUint>,

        /// Use the wide share format
        #[arg(long)]
        wide: bool,
    },
    /// Print the chunk, x and width recorded in a share
    Inspect {
        /// The share to inspect
        share: String,
    },
}
