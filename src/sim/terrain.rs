//! Procedural ground generation
//!
//! Terrain is an ordered run of flat segments scrolling left. Each new segment
//! takes a bounded random step from the previous height, so the jump arc can
//! always clear a transition.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// A contiguous span of ground with a single height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub start_x: f32,
    pub end_x: f32,
    /// Distance from the viewport bottom to the ground surface
    pub height: f32,
}

impl GroundSegment {
    #[inline]
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }

    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start_x && x < self.end_x
    }
}

/// Generation bounds, copied out of `Tuning` at run start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    pub min_height: f32,
    pub max_height: f32,
    pub width_min: f32,
    pub width_max: f32,
    pub max_delta: f32,
    pub baseline_height: f32,
    pub margin: f32,
}

impl From<&Tuning> for TerrainParams {
    fn from(tuning: &Tuning) -> Self {
        Self {
            min_height: tuning.min_ground_height,
            max_height: tuning.max_ground_height,
            width_min: tuning.segment_width_min,
            width_max: tuning.segment_width_max,
            max_delta: tuning.max_height_delta,
            baseline_height: tuning.baseline_height,
            margin: tuning.frontier_margin,
        }
    }
}

/// The live ground segments of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    pub params: TerrainParams,
    /// Ordered left to right, contiguous
    pub segments: Vec<GroundSegment>,
}

impl Terrain {
    /// Empty terrain; call `fill` before querying
    pub fn new(params: TerrainParams) -> Self {
        Self {
            params,
            segments: Vec::new(),
        }
    }

    /// Rightmost generated x (0 when empty)
    pub fn frontier(&self) -> f32 {
        self.segments.last().map(|s| s.end_x).unwrap_or(0.0)
    }

    /// Scroll the terrain left, retire segments that left the screen, and
    /// extend the frontier to cover the viewport
    pub fn advance(&mut self, dt: f32, scroll_speed: f32, viewport_width: f32, rng: &mut impl Rng) {
        let shift = scroll_speed * dt;
        for segment in &mut self.segments {
            segment.start_x -= shift;
            segment.end_x -= shift;
        }
        self.segments.retain(|s| s.end_x > 0.0);
        self.fill(viewport_width, rng);
    }

    /// Append segments until the frontier reaches viewport width + margin
    pub fn fill(&mut self, viewport_width: f32, rng: &mut impl Rng) {
        let target = viewport_width + self.params.margin;
        while self.frontier() < target {
            self.push_segment(rng);
        }
    }

    /// Discard all segments and regenerate from x = 0 at the baseline height
    pub fn rebuild(&mut self, viewport_width: f32, rng: &mut impl Rng) {
        self.segments.clear();
        self.fill(viewport_width, rng);
    }

    fn push_segment(&mut self, rng: &mut impl Rng) {
        let p = &self.params;
        let width = rng.random_range(p.width_min..=p.width_max);

        let (start_x, height) = match self.segments.last() {
            Some(prev) => {
                let lo = (prev.height - p.max_delta).max(p.min_height);
                let hi = (prev.height + p.max_delta).min(p.max_height);
                (prev.end_x, rng.random_range(lo..=hi))
            }
            None => (0.0, p.baseline_height),
        };

        self.segments.push(GroundSegment {
            start_x,
            end_x: start_x + width,
            height,
        });
    }

    /// Ground height at world x, or `None` over a gap
    pub fn height_at(&self, x: f32) -> Option<f32> {
        self.segments.iter().find(|s| s.contains(x)).map(|s| s.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: f32 = 960.0;

    fn terrain() -> Terrain {
        Terrain::new(TerrainParams::from(&Tuning::default()))
    }

    fn assert_invariants(terrain: &Terrain, viewport_width: f32) {
        let p = terrain.params;
        assert!(terrain.frontier() >= viewport_width + p.margin);
        let first = terrain.segments.first().unwrap();
        assert!(first.start_x <= 0.0 && first.end_x > 0.0);
        for pair in terrain.segments.windows(2) {
            assert_eq!(pair[0].end_x, pair[1].start_x);
            assert!((pair[1].height - pair[0].height).abs() <= p.max_delta + 1e-3);
        }
        for s in &terrain.segments {
            assert!(s.height >= p.min_height && s.height <= p.max_height);
        }
    }

    #[test]
    fn test_first_segment_uses_baseline() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut t = terrain();
        t.fill(VIEWPORT, &mut rng);
        assert_eq!(t.segments[0].start_x, 0.0);
        assert_eq!(t.segments[0].height, t.params.baseline_height);
        assert_invariants(&t, VIEWPORT);
    }

    #[test]
    fn test_height_at_gap_is_none() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut t = terrain();
        assert_eq!(t.height_at(10.0), None);
        t.fill(VIEWPORT, &mut rng);
        assert_eq!(t.height_at(10.0), Some(t.params.baseline_height));
        assert_eq!(t.height_at(-1.0), None);
        assert_eq!(t.height_at(t.frontier()), None);
    }

    #[test]
    fn test_offscreen_segments_are_retired() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut t = terrain();
        t.fill(VIEWPORT, &mut rng);
        let first_width = t.segments[0].width();
        // Scroll exactly past the first segment
        t.advance(1.0, first_width, VIEWPORT, &mut rng);
        assert!(t.segments.iter().all(|s| s.end_x > 0.0));
        assert_invariants(&t, VIEWPORT);
    }

    #[test]
    fn test_large_scroll_refills_in_one_step() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut t = terrain();
        t.fill(VIEWPORT, &mut rng);
        t.advance(1.0, 5000.0, VIEWPORT, &mut rng);
        assert_invariants(&t, VIEWPORT);
    }

    #[test]
    fn test_rebuild_for_wider_viewport() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut t = terrain();
        t.fill(VIEWPORT, &mut rng);
        t.advance(0.5, 420.0, VIEWPORT, &mut rng);
        t.rebuild(1920.0, &mut rng);
        assert_eq!(t.segments[0].start_x, 0.0);
        assert_invariants(&t, 1920.0);
    }

    proptest! {
        #[test]
        fn prop_coverage_and_bounded_delta(
            seed in any::<u64>(),
            steps in proptest::collection::vec((0.0f32..0.1, 0.0f32..1200.0), 1..200),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut t = terrain();
            t.fill(VIEWPORT, &mut rng);
            for (dt, speed) in steps {
                t.advance(dt, speed, VIEWPORT, &mut rng);
                prop_assert!(t.frontier() >= VIEWPORT + t.params.margin);
                for pair in t.segments.windows(2) {
                    prop_assert_eq!(pair[0].end_x, pair[1].start_x);
                    prop_assert!((pair[1].height - pair[0].height).abs() <= t.params.max_delta + 1e-3);
                }
                prop_assert!(t.height_at(0.0).is_some());
            }
        }
    }
}
