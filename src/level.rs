//! Random level generation (§4.2).

use rand::Rng;

/// Default ceiling on a node's top level, matching the reference implementation's
/// `HOPSCOTCH_VAL_LIST_DEFAULT_MAX_LEVEL`.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// Default geometric parameter, matching the reference implementation's
/// `HOPSCOTCH_VAL_LIST_DEFAULT_RAND_LEVEL_P`.
pub const DEFAULT_P: f64 = 0.5;

/// Draws a node's top level from a geometric distribution with parameter `p`, clamped to
/// `max_level - 1`.
///
/// Samples uniformly from `[0, 1)` via [`rand::thread_rng`] (itself thread-local, so no explicit
/// per-thread state is needed here) and increments the level while the sample is below `p`.
pub(crate) fn random_top_level(max_level: usize, p: f64) -> usize {
    let mut level = 0usize;
    let mut rng = rand::thread_rng();
    while level < max_level && rng.gen::<f64>() < p {
        level += 1;
    }
    level.min(max_level - 1)
}
