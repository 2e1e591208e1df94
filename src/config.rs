//! Spawn configuration
//!
//! One immutable `SpawnConfig` drives a whole generation pass. Spawner-side
//! toggles live in `SpawnerOptions` since the geometry never reads them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SpawnError;

/// Accepted range for `enemy_count`
pub const ENEMY_COUNT_RANGE: (usize, usize) = (1, 64);
/// Accepted range for `b_max`
pub const B_MAX_RANGE: (u32, u32) = (1, 128);
/// Accepted range for `angle_trials`
pub const ANGLE_TRIALS_RANGE: (u32, u32) = (1, 256);

/// Geometry and search parameters for one generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    // === Enemy placement ===
    /// Number of enemies to place
    pub enemy_count: usize,
    /// Arc-length offset of the first enemy
    pub s0: f32,
    /// Arc-length spacing between consecutive enemies
    pub ds: f32,
    pub r_enemy: f32,
    /// Projectile radius (not used by the geometry)
    pub r_proj: f32,
    /// Extra distance kept between an enemy's edge and any wall
    pub wall_margin: f32,

    // === Shot mechanics ===
    /// Bounces allowed before the first enemy
    pub b0: u32,
    /// Each enemy reached grants one more bounce
    pub bonus_bounce_on_hit: bool,
    /// Hard cap on traced bounces
    pub b_max: u32,

    // === Angle selection ===
    /// Launch angles tried before falling back
    pub angle_trials: u32,
    /// Minimum |cos θ| and |sin θ| for a launch angle
    pub min_axis_cos: f32,
    pub rng_seed: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enemy_count: 5,
            s0: 2.5,
            ds: 2.0,
            r_enemy: 0.3,
            r_proj: 0.1,
            wall_margin: 0.06,

            b0: 4,
            bonus_bounce_on_hit: true,
            b_max: 32,

            angle_trials: 36,
            min_axis_cos: 0.15,
            rng_seed: 2025,
        }
    }
}

impl SpawnConfig {
    /// Distance every enemy keeps from every wall
    #[inline]
    pub fn clearance(&self) -> f32 {
        self.r_enemy + self.wall_margin
    }

    /// Path length needed to fit every enemy, plus a margin past the last one
    pub fn needed_length(&self) -> f32 {
        self.s0
            + self.enemy_count.saturating_sub(1) as f32 * self.ds
            + crate::consts::PATH_LENGTH_MARGIN
    }

    /// Bounce budget for the enemy at `index`
    #[inline]
    pub fn allowed_bounces(&self, index: usize) -> usize {
        let bonus = if self.bonus_bounce_on_hit { index } else { 0 };
        self.b0 as usize + bonus
    }

    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), SpawnError> {
        let (lo, hi) = ENEMY_COUNT_RANGE;
        if !(lo..=hi).contains(&self.enemy_count) {
            return Err(SpawnError::invalid(
                "enemy_count",
                format!("{} not in {lo}..={hi}", self.enemy_count),
            ));
        }
        let (lo, hi) = B_MAX_RANGE;
        if !(lo..=hi).contains(&self.b_max) {
            return Err(SpawnError::invalid(
                "b_max",
                format!("{} not in {lo}..={hi}", self.b_max),
            ));
        }
        let (lo, hi) = ANGLE_TRIALS_RANGE;
        if !(lo..=hi).contains(&self.angle_trials) {
            return Err(SpawnError::invalid(
                "angle_trials",
                format!("{} not in {lo}..={hi}", self.angle_trials),
            ));
        }

        let lengths = [
            ("s0", self.s0),
            ("ds", self.ds),
            ("r_enemy", self.r_enemy),
            ("r_proj", self.r_proj),
            ("wall_margin", self.wall_margin),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(SpawnError::invalid(
                    field,
                    format!("{value} must be finite and non-negative"),
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.min_axis_cos) {
            return Err(SpawnError::invalid(
                "min_axis_cos",
                format!("{} not in [0, 1]", self.min_axis_cos),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, SpawnError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpawnError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded spawn config from {}", path.as_ref().display());
        Ok(config)
    }
}

/// Toggles owned by the spawner, not the geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerOptions {
    /// Run a spawn pass from `SpecularPathSpawner::start`
    pub generate_on_start: bool,
    /// Clear previously spawned enemies before spawning new ones
    pub clear_old_on_spawn: bool,
}

impl Default for SpawnerOptions {
    fn default() -> Self {
        Self {
            generate_on_start: true,
            clear_old_on_spawn: true,
        }
    }
}
