//! Specular Spawn - enemy placement along mirror-bounce shot paths
//!
//! Core modules:
//! - `specular`: Deterministic geometry core (walls, tracing, placement, search)
//! - `config`: Spawn parameters and spawner toggles
//! - `layout`: Level wall layouts and JSON scenarios
//! - `spawner`: Scene-facing collaborator that spawns through an injected sink

pub mod config;
pub mod error;
pub mod layout;
pub mod spawner;
pub mod specular;

pub use config::{SpawnConfig, SpawnerOptions};
pub use error::SpawnError;
pub use layout::{Level, WallLayout};
pub use spawner::{RecordingSink, SpawnSink, SpecularPathSpawner};
pub use specular::{PlacementResult, Selection, WallModel, WallSegment, generate};

use glam::Vec2;

/// Numeric tolerances and fixed search constants
pub mod consts {
    /// Minimum ray parameter counted as a hit
    pub const HIT_EPSILON: f32 = 1e-4;
    /// Ray/segment determinant below this is treated as parallel
    pub const PARALLEL_EPSILON: f32 = 1e-8;
    /// Slack on the segment parameter so hits on endpoints still count
    pub const SEGMENT_PARAM_SLACK: f32 = 1e-6;
    /// Segments shorter than this have no normal and block no rays
    pub const MIN_SEGMENT_LENGTH: f32 = 1e-6;
    /// Offset applied to the next ray origin after a bounce
    pub const SURFACE_NUDGE: f32 = 1e-3;

    /// Slack when deciding whether a target lies past the current segment
    pub const ARC_EPSILON: f32 = 1e-6;
    /// Floor on segment length when interpolating
    pub const MIN_SEGMENT_LERP: f32 = 1e-5;
    /// Wall push-out passes per placed enemy
    pub const CLEARANCE_ITERATIONS: u32 = 3;
    /// Pushes at or below this are skipped
    pub const MIN_PUSH: f32 = 1e-4;

    /// Tolerance on the clearance check
    pub const CLEARANCE_TOLERANCE: f32 = 1e-5;
    /// Draws per trial before settling on 45°
    pub const MAX_ANGLE_RESAMPLES: u32 = 64;
    /// Extra path length past the last enemy
    pub const PATH_LENGTH_MARGIN: f32 = 3.0;
    /// Extra length of the straight fallback path
    pub const FALLBACK_EXTRA_LENGTH: f32 = 1.0;
}

/// Unit vector at angle `theta` (radians, counter-clockwise from +x)
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
