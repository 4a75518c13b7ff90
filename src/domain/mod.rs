//! Domain types for Shamir Secret Sharing
//!
//! This module contains validated newtypes and configuration for secure secret sharing:
//! - [`Threshold`] - Minimum shares required to rebuild one chunk (>= 2)
//! - [`ShareCount`] - Shares generated for one chunk (>= 3)
//! - [`SplitConfig`] - Validated threshold and share count pair
//! - [`Config`] - Caller parameters, validated per [`Operation`]
//! - [`Limits`] - Bounds derived from a message before hiding it

mod config;
mod limits;
mod share_count;
mod threshold;

pub use config::{Config, HidePlan, Operation, SplitConfig};
pub use limits::Limits;
pub use share_count::ShareCount;
pub use threshold::Threshold;
