//! Level layout description
//!
//! Walls come either as free segments or as rectangular blocks whose four
//! edges carry their own physics flags. Only reflective edges become mirror
//! segments. A `Level` bundles the layout with the shot origin and config
//! so a whole spawn pass can be loaded from one JSON file.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{SpawnConfig, SpawnerOptions};
use crate::error::SpawnError;
use crate::specular::WallSegment;

/// A free wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentDef {
    pub a: Vec2,
    pub b: Vec2,
}

/// Physical behaviour of a block edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallPhysics {
    /// Blocks movement
    pub solid: bool,
    /// Reflects shots
    pub reflective: bool,
}

impl WallPhysics {
    pub const NONE: Self = Self {
        solid: false,
        reflective: false,
    };
    pub const MIRROR: Self = Self {
        solid: true,
        reflective: true,
    };
}

/// Level-design role of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallRole {
    /// Part of the intended solution
    #[default]
    Structural,
    /// Distractor
    Noise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WallEdge {
    pub physics: WallPhysics,
    pub role: WallRole,
}

/// Integer rectangle, `(x, y)` is the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockArea {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// A rectangular wall block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallBlock {
    pub area: BlockArea,
    #[serde(default)]
    pub top: WallEdge,
    #[serde(default)]
    pub bottom: WallEdge,
    #[serde(default)]
    pub left: WallEdge,
    #[serde(default)]
    pub right: WallEdge,
}

impl WallBlock {
    /// Block with four mirror edges
    pub fn mirror(area: BlockArea) -> Self {
        let edge = WallEdge {
            physics: WallPhysics::MIRROR,
            role: WallRole::Structural,
        };
        Self {
            area,
            top: edge,
            bottom: edge,
            left: edge,
            right: edge,
        }
    }

    /// The four edges in bottom, right, top, left order
    pub fn edges(&self) -> [(WallEdge, SegmentDef); 4] {
        let a = &self.area;
        let (x0, y0) = (a.x as f32, a.y as f32);
        let (x1, y1) = ((a.x + a.width) as f32, (a.y + a.height) as f32);
        let bl = Vec2::new(x0, y0);
        let br = Vec2::new(x1, y0);
        let tr = Vec2::new(x1, y1);
        let tl = Vec2::new(x0, y1);
        [
            (self.bottom, SegmentDef { a: bl, b: br }),
            (self.right, SegmentDef { a: br, b: tr }),
            (self.top, SegmentDef { a: tr, b: tl }),
            (self.left, SegmentDef { a: tl, b: bl }),
        ]
    }
}

/// All walls of a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallLayout {
    pub segments: Vec<SegmentDef>,
    pub blocks: Vec<WallBlock>,
}

impl WallLayout {
    /// Free segments plus every reflective block edge
    pub fn to_segments(&self) -> Vec<WallSegment> {
        self.collect(|_| true)
    }

    /// Like `to_segments`, skipping block edges marked as noise
    pub fn structural_segments(&self) -> Vec<WallSegment> {
        self.collect(|edge| edge.role == WallRole::Structural)
    }

    fn collect(&self, keep: impl Fn(&WallEdge) -> bool) -> Vec<WallSegment> {
        let free = self.segments.iter().map(|s| WallSegment::new(s.a, s.b));
        let edges = self
            .blocks
            .iter()
            .flat_map(|block| block.edges())
            .filter(|(edge, _)| edge.physics.reflective && keep(edge))
            .map(|(_, s)| WallSegment::new(s.a, s.b));
        free.chain(edges).collect()
    }
}

/// A complete spawn scenario
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    /// Shot origin
    pub origin: Option<Vec2>,
    pub walls: WallLayout,
    pub config: SpawnConfig,
    pub options: SpawnerOptions,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, SpawnError> {
        let level: Self = serde_json::from_str(json)?;
        level.config.validate()?;
        Ok(level)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpawnError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let level = Self::from_json(&json)?;
        log::info!(
            "Loaded level from {} ({} segments, {} blocks)",
            path.as_ref().display(),
            level.walls.segments.len(),
            level.walls.blocks.len()
        );
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> BlockArea {
        BlockArea {
            x: 1,
            y: 2,
            width: 3,
            height: 4,
        }
    }

    #[test]
    fn test_mirror_block_yields_four_edges() {
        let layout = WallLayout {
            segments: Vec::new(),
            blocks: vec![WallBlock::mirror(area())],
        };
        let segs = layout.to_segments();
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].a, Vec2::new(1.0, 2.0));
        assert_eq!(segs[0].b, Vec2::new(4.0, 2.0));
        assert_eq!(segs[2].a, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_non_reflective_edges_skipped() {
        let mut block = WallBlock::mirror(area());
        block.left.physics = WallPhysics {
            solid: true,
            reflective: false,
        };
        block.top.physics = WallPhysics::NONE;
        let layout = WallLayout {
            segments: vec![SegmentDef {
                a: Vec2::ZERO,
                b: Vec2::X,
            }],
            blocks: vec![block],
        };
        assert_eq!(layout.to_segments().len(), 3);
    }

    #[test]
    fn test_structural_filter() {
        let mut block = WallBlock::mirror(area());
        block.right.role = WallRole::Noise;
        let layout = WallLayout {
            segments: Vec::new(),
            blocks: vec![block],
        };
        assert_eq!(layout.to_segments().len(), 4);
        assert_eq!(layout.structural_segments().len(), 3);
    }

    #[test]
    fn test_level_from_json() {
        let json = r#"{
            "origin": [0.0, 0.0],
            "walls": {
                "segments": [ { "a": [5.0, -5.0], "b": [5.0, 5.0] } ],
                "blocks": [ {
                    "area": { "x": -8, "y": -8, "width": 2, "height": 16 },
                    "right": { "physics": { "solid": true, "reflective": true }, "role": "Noise" }
                } ]
            },
            "config": { "enemy_count": 3 },
            "options": { "clear_old_on_spawn": false }
        }"#;
        let level = Level::from_json(json).unwrap();
        assert_eq!(level.origin, Some(Vec2::ZERO));
        assert_eq!(level.config.enemy_count, 3);
        assert!(!level.options.clear_old_on_spawn);
        assert!(level.options.generate_on_start);
        // One free segment plus the single reflective block edge
        assert_eq!(level.walls.to_segments().len(), 2);
        assert_eq!(level.walls.structural_segments().len(), 1);
    }

    #[test]
    fn test_level_rejects_bad_config() {
        let json = r#"{ "config": { "angle_trials": 0 } }"#;
        assert!(matches!(
            Level::from_json(json),
            Err(SpawnError::InvalidConfig { field: "angle_trials", .. })
        ));
    }
}
