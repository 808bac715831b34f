//! Seeded random source for layout generation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Random source used by the layout generator.
///
/// Pcg64's output stream is stable across platforms and releases, so a
/// given seed always reproduces the same layout.
pub type ChartRng = Pcg64;

/// Build the generator for a configured seed.
pub fn seeded_rng(seed: u64) -> ChartRng {
    Pcg64::seed_from_u64(seed)
}

/// Uniform integer in `[lo, hi)`. Returns `lo` when the range is empty.
pub(crate) fn range_int(rng: &mut impl Rng, lo: i32, hi: i32) -> i32 {
    if hi <= lo { lo } else { rng.gen_range(lo..hi) }
}

/// Uniform float in `[0, 1)`.
pub(crate) fn value(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..1.0)
}
