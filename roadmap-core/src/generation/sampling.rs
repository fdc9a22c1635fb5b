//! Bounded rejection sampling over node ids.
//!
//! Draws uniformly until an eligible id turns up, but only for a fixed number
//! of attempts. After that it scans forward from the last draw, wrapping
//! around once, so the search always terminates.

use tracing::debug;

use crate::{Result, error::RoadmapError, random::RandomSource};

/// Picks an id in `0..len` accepted by `eligible`.
///
/// # Errors
/// Returns [`RoadmapError::SamplingExhausted`] when no id in `0..len` is
/// eligible.
pub(crate) fn sample_eligible(
    rng: &mut RandomSource,
    len: usize,
    retry_budget: usize,
    purpose: &'static str,
    mut eligible: impl FnMut(usize) -> bool,
) -> Result<usize> {
    let mut last_draw = 0;
    for _ in 0..retry_budget {
        let Some(candidate) = rng.index_below(len) else {
            break;
        };
        if eligible(candidate) {
            return Ok(candidate);
        }
        last_draw = candidate;
    }

    debug!(
        purpose,
        retry_budget,
        start = last_draw,
        "retry budget spent, scanning for an eligible node"
    );
    let start = last_draw.min(len);
    (start..len)
        .chain(0..start)
        .find(|&candidate| eligible(candidate))
        .ok_or(RoadmapError::SamplingExhausted { purpose })
}
