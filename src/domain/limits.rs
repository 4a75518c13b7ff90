//! Feasible configuration bounds for a prospective message

use serde::{Deserialize, Serialize};

/// Share count and threshold bounds a caller can offer before hiding
///
/// Valid share counts are the multiples of the chunk count between
/// `min_shares` and `max_shares`. The upper threshold bound shown here is
/// for `max_shares`; for a chosen share count `n` with `c` chunks it is `n - c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub min_shares: u32,
    pub max_shares: u32,
    pub min_threshold: u32,
    pub max_threshold: u32,
}
