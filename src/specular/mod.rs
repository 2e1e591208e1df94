//! Specular-path placement core
//!
//! Pure and deterministic:
//! - No host runtime, rendering, or instantiation
//! - Seeded angle source only
//! - Walls and candidates live for one `generate` call

pub mod place;
pub mod search;
pub mod sequence;
pub mod trace;
pub mod wall;

pub use place::{PlacedEntity, min_clearance, nudge_from_walls, place_along_path};
pub use search::{Candidate, PlacementResult, Selection, generate, generate_with, straight_fallback};
pub use sequence::{AngleSource, sample_angle_avoid_axis, seeded};
pub use trace::{Path, reflect, trace};
pub use wall::{Hit, WallModel, WallSegment};
