//! Winner selection and target rotation.
//!
//! Segment `i` spans `[i * seg, (i + 1) * seg)` degrees, measured clockwise
//! from the top of the wheel. The pointer is fixed at the top (0°). Rotating
//! the wheel clockwise by `r` degrees puts wheel angle `(-r) mod 360` under
//! the pointer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Whole turns the wheel makes before settling.
pub const FULL_TURNS: u32 = 5;

/// Largest jitter, as a fraction of one segment. Below 0.5 so the pointer
/// never leaves the winning segment.
pub const JITTER_FRACTION: f64 = 0.4;

/// Source of the two random draws a spin needs.
pub trait RandomSource {
    /// Uniform index in `[0, len)`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
    /// Uniform offset in `[-bound, bound]`. `bound` is never negative.
    fn jitter(&mut self, bound: f64) -> f64;
}

/// [`RandomSource`] backed by any `rand` generator.
///
/// `gen_range` on an integer range is unbiased (widening multiply with
/// rejection), so no index is favoured.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// OS-seeded generator. Unlike `thread_rng` it is `Send`, so it can live
    /// inside a spawned task.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    fn jitter(&mut self, bound: f64) -> f64 {
        if bound <= 0.0 {
            return 0.0;
        }
        self.0.gen_range(-bound..=bound)
    }
}

/// The generator the application runs with.
pub type EntropySource = RngSource<StdRng>;

/// Everything decided up front for one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub winner_index: usize,
    pub segment_angle: f64,
    pub jitter: f64,
    pub total_rotation: f64,
}

impl SpinPlan {
    /// Draw a winner and jitter for a pool of `len` names. `len` must be > 0.
    pub fn draw(len: usize, rng: &mut impl RandomSource) -> Self {
        let winner_index = rng.pick_index(len).min(len - 1);
        let bound = JITTER_FRACTION * segment_angle(len);
        let jitter = rng.jitter(bound);
        Self::new(len, winner_index, jitter)
    }

    /// Build the plan for a known winner. Jitter is clamped to the safe band.
    pub fn new(len: usize, winner_index: usize, jitter: f64) -> Self {
        let segment_angle = segment_angle(len);
        let bound = JITTER_FRACTION * segment_angle;
        let jitter = jitter.clamp(-bound, bound);
        let center = segment_center(winner_index, segment_angle);
        let total_rotation = f64::from(FULL_TURNS) * 360.0 + (360.0 - center) + jitter;

        Self {
            winner_index,
            segment_angle,
            jitter,
            total_rotation,
        }
    }

    /// Final angle reduced to `[0, 360)`, the baseline for the next spin.
    pub fn normalized_rotation(&self) -> f64 {
        normalize(self.total_rotation)
    }
}

pub fn segment_angle(len: usize) -> f64 {
    360.0 / len as f64
}

pub fn segment_center(index: usize, segment_angle: f64) -> f64 {
    index as f64 * segment_angle + segment_angle / 2.0
}

pub fn normalize(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Index of the segment under the top pointer after rotating by `rotation`.
pub fn segment_under_pointer(rotation: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let under = normalize(-rotation);
    let idx = (under / segment_angle(len)).floor() as usize;
    idx.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        index: usize,
        jitter: f64,
    }

    impl RandomSource for Scripted {
        fn pick_index(&mut self, _len: usize) -> usize {
            self.index
        }

        fn jitter(&mut self, _bound: f64) -> f64 {
            self.jitter
        }
    }

    #[test]
    fn test_four_names_index_two() {
        let plan = SpinPlan::draw(4, &mut Scripted { index: 2, jitter: 0.0 });
        assert_eq!(plan.winner_index, 2);
        assert_eq!(plan.segment_angle, 90.0);
        assert_eq!(segment_center(2, 90.0), 225.0);
        assert_eq!(plan.total_rotation, 1935.0);
    }

    #[test]
    fn test_four_names_jitter_extremes_stay_in_band() {
        let low = SpinPlan::new(4, 2, -36.0);
        let high = SpinPlan::new(4, 2, 36.0);
        assert!((low.total_rotation - 1899.0).abs() < 1e-9);
        assert!((high.total_rotation - 1971.0).abs() < 1e-9);
        assert_eq!(segment_under_pointer(low.total_rotation, 4), 2);
        assert_eq!(segment_under_pointer(high.total_rotation, 4), 2);
    }

    #[test]
    fn test_jitter_is_clamped() {
        let plan = SpinPlan::new(4, 0, 80.0);
        assert!((plan.jitter - 36.0).abs() < 1e-9);
        let plan = SpinPlan::new(4, 0, -80.0);
        assert!((plan.jitter + 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_name_always_wins() {
        let plan = SpinPlan::draw(1, &mut RngSource(StdRng::seed_from_u64(7)));
        assert_eq!(plan.winner_index, 0);
        assert_eq!(plan.segment_angle, 360.0);
        assert_eq!(segment_under_pointer(plan.total_rotation, 1), 0);
    }

    #[test]
    fn test_pointer_lands_on_winner_for_many_sizes() {
        let mut rng = RngSource(StdRng::seed_from_u64(0x5eed));
        for len in 1..=64usize {
            for _ in 0..50 {
                let plan = SpinPlan::draw(len, &mut rng);
                assert!(plan.winner_index < len);
                assert!(plan.jitter.abs() <= JITTER_FRACTION * plan.segment_angle + 1e-9);
                assert_eq!(
                    segment_under_pointer(plan.total_rotation, len),
                    plan.winner_index,
                    "len={} plan={:?}",
                    len,
                    plan
                );
                // pointer offset from the segment center matches the jitter
                let under = normalize(-plan.total_rotation);
                let center = segment_center(plan.winner_index, plan.segment_angle);
                let offset = normalize(under - center + 180.0) - 180.0;
                assert!((offset + plan.jitter).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_rotation_spans_at_least_five_turns() {
        let mut rng = RngSource(StdRng::seed_from_u64(3));
        for len in [1usize, 2, 3, 7, 100] {
            let plan = SpinPlan::draw(len, &mut rng);
            assert!(plan.total_rotation >= 1800.0);
            assert!(plan.total_rotation < 2160.0 + plan.segment_angle);
        }
    }

    #[test]
    fn test_index_draw_covers_every_slot() {
        let mut rng = RngSource(StdRng::seed_from_u64(11));
        let mut seen = [0usize; 5];
        for _ in 0..5_000 {
            seen[rng.pick_index(5)] += 1;
        }
        // each slot within a generous band around 1000
        assert!(seen.iter().all(|&n| (800..1200).contains(&n)), "{:?}", seen);
    }

    #[test]
    fn test_normalized_rotation() {
        let plan = SpinPlan::new(4, 2, 0.0);
        assert_eq!(plan.normalized_rotation(), 135.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(720.0), 0.0);
    }
}
