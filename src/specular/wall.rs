//! Wall segment geometry
//!
//! Walls are straight mirror segments. A `WallModel` is rebuilt for every
//! generation pass and only answers queries afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HIT_EPSILON, MIN_SEGMENT_LENGTH, PARALLEL_EPSILON, SEGMENT_PARAM_SLACK};

/// A single reflective wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    pub a: Vec2,
    pub b: Vec2,
    /// Unit normal, tangent rotated +90°. Zero for a degenerate segment.
    pub normal: Vec2,
}

impl WallSegment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        let tangent = (b - a).normalize_or_zero();
        Self {
            a,
            b,
            normal: Vec2::new(-tangent.y, tangent.x),
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    /// Too short to carry a normal; acts as a point obstacle
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length() < MIN_SEGMENT_LENGTH
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let t = ((p - self.a).dot(ab) / ab.length_squared().max(PARALLEL_EPSILON)).clamp(0.0, 1.0);
        self.a + ab * t
    }

    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        (p - self.closest_point(p)).length()
    }

    /// Solve `origin + t·dir = a + u·(b - a)` for the ray parameter `t`.
    ///
    /// Parallel rays, degenerate segments and hits outside the segment span
    /// are misses.
    pub fn ray_intersection(&self, origin: Vec2, dir: Vec2) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }
        let edge = self.b - self.a;
        let denom = dir.perp_dot(edge);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let ap = self.a - origin;
        let t = ap.perp_dot(edge) / denom;
        let u = ap.perp_dot(dir) / denom;
        if t < 0.0 || !(-SEGMENT_PARAM_SLACK..=1.0 + SEGMENT_PARAM_SLACK).contains(&u) {
            return None;
        }
        Some(t)
    }
}

/// A ray hit against the wall set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parametric distance along the (unit) ray direction
    pub distance: f32,
    pub point: Vec2,
    pub normal: Vec2,
}

/// The static wall set for one generation pass
#[derive(Debug, Clone, Default)]
pub struct WallModel {
    segments: Vec<WallSegment>,
}

impl WallModel {
    /// Build the model.
    ///
    /// Degenerate segments are kept: rays pass through them, but they still
    /// count for wall distance and clearance.
    pub fn new(segments: impl IntoIterator<Item = WallSegment>) -> Self {
        let segments: Vec<WallSegment> = segments.into_iter().collect();
        for seg in segments.iter().filter(|s| s.is_degenerate()) {
            log::warn!("Degenerate wall segment at {:?} treated as a point", seg.a);
        }
        if segments.is_empty() {
            log::warn!("No walls configured; placement will use a fallback path");
        }
        Self { segments }
    }

    /// Build from raw endpoint pairs
    pub fn from_endpoints(pairs: &[(Vec2, Vec2)]) -> Self {
        Self::new(pairs.iter().map(|&(a, b)| WallSegment::new(a, b)))
    }

    pub fn segments(&self) -> &[WallSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Nearest forward hit along `dir`. Exact ties keep the earlier segment.
    pub fn nearest_intersection(&self, origin: Vec2, dir: Vec2) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for seg in &self.segments {
            let Some(t) = seg.ray_intersection(origin, dir) else {
                continue;
            };
            if t <= HIT_EPSILON {
                continue;
            }
            if best.is_none_or(|b| t < b.distance) {
                best = Some(Hit {
                    distance: t,
                    point: origin + dir * t,
                    normal: seg.normal,
                });
            }
        }
        best
    }

    /// Distance from `p` to the closest wall, `+inf` with no walls
    pub fn min_distance(&self, p: Vec2) -> f32 {
        self.segments
            .iter()
            .map(|s| s.distance_to(p))
            .fold(f32::INFINITY, f32::min)
    }
}
