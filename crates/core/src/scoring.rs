//! Scoring module
//!
//! A cascade pass scores a flat amount per cleared cell plus a bonus for every
//! cell beyond the minimum run. Bigger clears are worth more per cell; chained
//! passes simply add up.

use crate::types::{BONUS_PER_EXTRA_TILE, MIN_RUN, POINTS_PER_TILE};

/// Points for one pass that cleared `match_count` distinct cells
pub fn pass_score(match_count: usize) -> u32 {
    let count = u32::try_from(match_count).unwrap_or(u32::MAX);
    let extra = count.saturating_sub(MIN_RUN as u32);
    count
        .saturating_mul(POINTS_PER_TILE)
        .saturating_add(extra.saturating_mul(BONUS_PER_EXTRA_TILE))
}
