//! Arc-length placement along a traced path
//!
//! Entities are dropped at `s0, s0 + ds, s0 + 2·ds, ...` along the polyline
//! and then pushed out of any wall they sit too close to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::trace::Path;
use super::wall::WallModel;
use crate::consts::{ARC_EPSILON, CLEARANCE_ITERATIONS, MIN_PUSH, MIN_SEGMENT_LERP};

/// A placed entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub pos: Vec2,
    /// Index of the path vertex preceding this entity's segment.
    ///
    /// Approximates how many reflections happened before reaching it.
    pub bounce_index_before_hit: usize,
}

/// Place `count` entities along `path`, keeping `clearance` from every wall.
///
/// Returns an empty list when the path has no segments.
pub fn place_along_path(
    walls: &WallModel,
    path: &Path,
    s0: f32,
    ds: f32,
    count: usize,
    clearance: f32,
) -> Vec<PlacedEntity> {
    let pts = &path.vertices;
    if pts.len() < 2 {
        return Vec::new();
    }

    let last = pts.len() - 1;
    let mut placed = Vec::with_capacity(count);
    // Arc length at the start of segment `seg` (which runs pts[seg-1] -> pts[seg])
    let mut run = 0.0;
    let mut seg = 1;
    let mut seg_len = pts[0].distance(pts[1]);

    for i in 0..count {
        let target = s0 + i as f32 * ds;

        while seg < last && run + seg_len < target - ARC_EPSILON {
            run += seg_len;
            seg += 1;
            seg_len = pts[seg - 1].distance(pts[seg]);
        }

        // Past the end of the final segment this clamps to the last vertex
        let t = ((target - run) / seg_len.max(MIN_SEGMENT_LERP)).clamp(0.0, 1.0);
        let pos = pts[seg - 1].lerp(pts[seg], t);

        placed.push(PlacedEntity {
            pos: nudge_from_walls(walls, pos, clearance, CLEARANCE_ITERATIONS),
            bounce_index_before_hit: seg - 1,
        });
    }

    placed
}

/// Push `p` away from the wall it violates `min_dist` against the most.
///
/// Repeats up to `iterations` times, stopping once nothing is too close.
pub fn nudge_from_walls(walls: &WallModel, mut p: Vec2, min_dist: f32, iterations: u32) -> Vec2 {
    for _ in 0..iterations {
        let mut best_push = 0.0;
        let mut push_dir = Vec2::ZERO;

        for seg in walls.segments() {
            let closest = seg.closest_point(p);
            let shortfall = min_dist - p.distance(closest);
            if shortfall > best_push {
                best_push = shortfall;
                // Push to whichever side of the wall the point is already on
                push_dir = if seg.is_degenerate() {
                    (p - closest).normalize_or_zero()
                } else if (p - closest).dot(seg.normal) < 0.0 {
                    -seg.normal
                } else {
                    seg.normal
                };
            }
        }

        if best_push <= MIN_PUSH {
            break;
        }
        p += push_dir * best_push;
    }
    p
}

/// Smallest wall distance over all placed entities (`+inf` with no walls)
pub fn min_clearance(walls: &WallModel, placed: &[PlacedEntity]) -> f32 {
    placed
        .iter()
        .map(|e| walls.min_distance(e.pos))
        .fold(f32::INFINITY, f32::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specular::wall::WallSegment;
    use proptest::prelude::*;

    fn no_walls() -> WallModel {
        WallModel::new(Vec::new())
    }

    fn l_path() -> Path {
        // 10 along +x, then 10 along +y
        Path {
            vertices: vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            headings: vec![Vec2::X, Vec2::Y, Vec2::Y],
            length: 20.0,
        }
    }

    #[test]
    fn test_single_vertex_path_places_nothing() {
        let path = Path::new(Vec2::ZERO, Vec2::X);
        assert!(place_along_path(&no_walls(), &path, 1.0, 1.0, 5, 0.5).is_empty());
    }

    #[test]
    fn test_spacing_along_straight_path() {
        let path = Path::straight(Vec2::ZERO, Vec2::X, 20.0);
        let placed = place_along_path(&no_walls(), &path, 2.5, 2.0, 5, 0.36);
        assert_eq!(placed.len(), 5);
        for (i, e) in placed.iter().enumerate() {
            let expected = 2.5 + i as f32 * 2.0;
            assert!((e.pos.x - expected).abs() < 1e-5);
            assert!(e.pos.y.abs() < 1e-6);
            assert_eq!(e.bounce_index_before_hit, 0);
        }
    }

    #[test]
    fn test_crosses_bounce_vertex() {
        let placed = place_along_path(&no_walls(), &l_path(), 4.0, 4.0, 4, 0.0);
        let positions: Vec<Vec2> = placed.iter().map(|e| e.pos).collect();
        let expected = [
            Vec2::new(4.0, 0.0),
            Vec2::new(8.0, 0.0),
            Vec2::new(10.0, 2.0),
            Vec2::new(10.0, 6.0),
        ];
        for (got, want) in positions.iter().zip(expected) {
            assert!((*got - want).length() < 1e-5, "{got:?} != {want:?}");
        }
        let indices: Vec<usize> = placed.iter().map(|e| e.bounce_index_before_hit).collect();
        assert_eq!(indices, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_target_exactly_on_vertex_stays_on_earlier_segment() {
        let placed = place_along_path(&no_walls(), &l_path(), 10.0, 1.0, 1, 0.0);
        assert_eq!(placed[0].bounce_index_before_hit, 0);
        assert!((placed[0].pos - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_clamps_to_path_end() {
        let placed = place_along_path(&no_walls(), &l_path(), 15.0, 5.0, 4, 0.0);
        let end = Vec2::new(10.0, 10.0);
        assert!((placed[0].pos - Vec2::new(10.0, 5.0)).length() < 1e-5);
        for e in &placed[1..] {
            assert!((e.pos - end).length() < 1e-5);
            assert_eq!(e.bounce_index_before_hit, 1);
        }
    }

    #[test]
    fn test_nudge_pushes_out_to_clearance() {
        let walls = WallModel::new([WallSegment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0))]);
        // Below the wall: push must go further down, not through it
        let p = nudge_from_walls(&walls, Vec2::new(0.0, -0.1), 0.5, 3);
        assert!((p - Vec2::new(0.0, -0.5)).length() < 1e-5);

        let p = nudge_from_walls(&walls, Vec2::new(1.0, 0.2), 0.5, 3);
        assert!((p - Vec2::new(1.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn test_nudge_pushes_radially_from_point_wall() {
        let walls = WallModel::new([WallSegment::new(Vec2::ZERO, Vec2::ZERO)]);
        let p = nudge_from_walls(&walls, Vec2::new(0.3, 0.4), 1.0, 3);
        assert!((p - Vec2::new(0.6, 0.8)).length() < 1e-5);

        let placed = [PlacedEntity {
            pos: Vec2::new(0.0, 0.25),
            bounce_index_before_hit: 0,
        }];
        assert!((min_clearance(&walls, &placed) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_nudge_leaves_clear_points_alone() {
        let walls = WallModel::new([WallSegment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0))]);
        let p = Vec2::new(0.0, 2.0);
        assert_eq!(nudge_from_walls(&walls, p, 0.5, 3), p);
    }

    #[test]
    fn test_bounce_indices_non_decreasing() {
        let path = Path {
            vertices: vec![
                Vec2::ZERO,
                Vec2::new(3.0, 0.0),
                Vec2::new(3.0, 3.0),
                Vec2::new(0.0, 3.0),
            ],
            headings: vec![Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_X],
            length: 9.0,
        };
        let placed = place_along_path(&no_walls(), &path, 0.5, 1.0, 12, 0.0);
        assert!(
            placed
                .windows(2)
                .all(|w| w[0].bounce_index_before_hit <= w[1].bounce_index_before_hit)
        );
        assert_eq!(placed.last().unwrap().bounce_index_before_hit, 2);
    }

    #[test]
    fn test_min_clearance() {
        let walls = WallModel::new([WallSegment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0))]);
        let placed = [
            PlacedEntity {
                pos: Vec2::new(0.0, 2.0),
                bounce_index_before_hit: 0,
            },
            PlacedEntity {
                pos: Vec2::new(1.0, -0.75),
                bounce_index_before_hit: 0,
            },
        ];
        assert!((min_clearance(&walls, &placed) - 0.75).abs() < 1e-6);
        assert_eq!(min_clearance(&no_walls(), &placed), f32::INFINITY);
    }

    proptest! {
        #[test]
        fn prop_spacing_on_straight_path(
            s0 in 0.0f32..5.0,
            ds in 0.1f32..4.0,
            count in 1usize..20,
        ) {
            let length = s0 + count as f32 * ds + 10.0;
            let path = Path::straight(Vec2::ZERO, Vec2::X, length);
            let placed = place_along_path(&no_walls(), &path, s0, ds, count, 0.0);

            prop_assert_eq!(placed.len(), count);
            prop_assert!((placed[0].pos.x - s0).abs() < 1e-4);
            for w in placed.windows(2) {
                prop_assert!((w[1].pos.x - w[0].pos.x - ds).abs() < 1e-3);
            }
            prop_assert!(placed.iter().all(|e| e.pos.y.abs() < 1e-6));
        }
    }
}
