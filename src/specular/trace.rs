//! Specular path tracing
//!
//! A ray is launched from the origin and reflected off the nearest wall
//! until the bounce cap or the required length is reached, or until it
//! escapes into open space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::wall::WallModel;
use crate::consts::SURFACE_NUDGE;

/// Reflect a direction off a surface: d' = d - 2(d·n)n
///
/// The sign of `normal` does not matter.
#[inline]
pub fn reflect(dir: Vec2, normal: Vec2) -> Vec2 {
    dir - 2.0 * dir.dot(normal) * normal
}

/// A traced polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Origin followed by every bounce point
    pub vertices: Vec<Vec2>,
    /// Unit heading of the leg leaving each vertex (same length as `vertices`)
    pub headings: Vec<Vec2>,
    /// Distance travelled between the first and last vertex
    pub length: f32,
}

impl Path {
    pub fn new(origin: Vec2, heading: Vec2) -> Self {
        Self {
            vertices: vec![origin],
            headings: vec![heading],
            length: 0.0,
        }
    }

    /// Straight two-vertex path
    pub fn straight(origin: Vec2, heading: Vec2, length: f32) -> Self {
        let heading = heading.normalize_or_zero();
        Self {
            vertices: vec![origin, origin + heading * length],
            headings: vec![heading, heading],
            length,
        }
    }

    /// First vertex, `None` for an empty (e.g. deserialized) path
    #[inline]
    pub fn origin(&self) -> Option<Vec2> {
        self.vertices.first().copied()
    }

    /// Number of reflections recorded in the path
    #[inline]
    pub fn bounces(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Whether the path has at least one segment to place along
    #[inline]
    pub fn has_segments(&self) -> bool {
        self.vertices.len() >= 2
    }
}

/// Trace a mirror-reflecting path through `walls`.
pub fn trace(
    walls: &WallModel,
    origin: Vec2,
    dir: Vec2,
    max_bounces: u32,
    min_length: f32,
) -> Path {
    let mut d = dir.normalize_or_zero();
    let mut path = Path::new(origin, d);
    let mut p = origin;
    let mut bounces = 0u32;

    while bounces < max_bounces && path.length < min_length {
        let Some(hit) = walls.nearest_intersection(p, d) else {
            break;
        };

        path.vertices.push(hit.point);
        path.length += hit.distance;

        d = reflect(d, hit.normal).normalize_or_zero();
        path.headings.push(d);

        // Step off the surface so the next ray doesn't re-hit it
        p = hit.point + d * SURFACE_NUDGE;
        bounces += 1;
    }

    path
}
