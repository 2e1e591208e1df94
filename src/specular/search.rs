//! Launch-angle search
//!
//! Tries seeded launch angles until one yields a placement that keeps its
//! clearance and bounce budget. Falls back to the clearest candidate seen,
//! then to a plain 45° line, so a result is always produced.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_4;

use super::place::{PlacedEntity, min_clearance, place_along_path};
use super::sequence::{AngleSource, sample_angle_avoid_axis, seeded};
use super::trace::{Path, trace};
use super::wall::WallModel;
use crate::config::SpawnConfig;
use crate::consts::{CLEARANCE_TOLERANCE, FALLBACK_EXTRA_LENGTH};
use crate::direction_from_angle;

/// One launch angle with its path and placement
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub theta: f32,
    pub path: Path,
    pub placed: Vec<PlacedEntity>,
    /// Smallest wall distance over the placed enemies
    pub min_clearance: f32,
}

impl Candidate {
    /// Trace and place for `theta`. `None` when the ray hits nothing.
    pub fn build(
        config: &SpawnConfig,
        walls: &WallModel,
        origin: Vec2,
        theta: f32,
    ) -> Option<Self> {
        let path = trace(
            walls,
            origin,
            direction_from_angle(theta),
            config.b_max,
            config.needed_length(),
        );
        if !path.has_segments() {
            return None;
        }
        Some(Self::from_path(config, walls, theta, path))
    }

    fn from_path(config: &SpawnConfig, walls: &WallModel, theta: f32, path: Path) -> Self {
        let placed = place_along_path(
            walls,
            &path,
            config.s0,
            config.ds,
            config.enemy_count,
            config.clearance(),
        );
        let min_clearance = min_clearance(walls, &placed);
        Self {
            theta,
            path,
            placed,
            min_clearance,
        }
    }

    pub fn clearance_ok(&self, config: &SpawnConfig) -> bool {
        self.min_clearance >= config.clearance() - CLEARANCE_TOLERANCE
    }

    pub fn budget_ok(&self, config: &SpawnConfig) -> bool {
        self.placed
            .iter()
            .enumerate()
            .all(|(i, e)| e.bounce_index_before_hit <= config.allowed_bounces(i))
    }

    pub fn is_valid(&self, config: &SpawnConfig) -> bool {
        self.clearance_ok(config) && self.budget_ok(config)
    }
}

/// Which tier of the search produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// First trial meeting clearance and bounce budget
    Accepted,
    /// No trial was valid; the clearest one was kept
    BestClearance,
    /// No trial hit a wall; straight 45° line
    Straight,
}

/// The chosen placement handed to the spawner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Enemy positions in placement order
    pub positions: Vec<Vec2>,
    /// Chosen launch angle (radians)
    pub theta: f32,
    /// Polyline of the chosen shot
    pub path: Vec<Vec2>,
    /// Path vertex preceding each enemy
    pub bounce_indices: Vec<usize>,
    /// Smallest enemy-to-wall distance, `None` when there are no walls
    pub min_clearance: Option<f32>,
    pub selection: Selection,
}

impl PlacementResult {
    fn from_candidate(candidate: Candidate, selection: Selection) -> Self {
        Self {
            positions: candidate.placed.iter().map(|e| e.pos).collect(),
            bounce_indices: candidate
                .placed
                .iter()
                .map(|e| e.bounce_index_before_hit)
                .collect(),
            theta: candidate.theta,
            path: candidate.path.vertices,
            min_clearance: candidate
                .min_clearance
                .is_finite()
                .then_some(candidate.min_clearance),
            selection,
        }
    }

    /// Chosen angle in degrees, for logs
    pub fn theta_degrees(&self) -> f32 {
        self.theta.to_degrees()
    }
}

/// Run the search with the seeded default angle source.
pub fn generate(config: &SpawnConfig, walls: &WallModel, origin: Vec2) -> PlacementResult {
    let mut rng = seeded(config.rng_seed);
    generate_with(config, walls, origin, &mut rng)
}

/// Run the search drawing angles from `source`.
pub fn generate_with(
    config: &SpawnConfig,
    walls: &WallModel,
    origin: Vec2,
    source: &mut impl AngleSource,
) -> PlacementResult {
    let mut best: Option<Candidate> = None;

    for trial in 0..config.angle_trials {
        let theta = sample_angle_avoid_axis(source, config.min_axis_cos);
        let Some(candidate) = Candidate::build(config, walls, origin, theta) else {
            log::debug!("Trial {trial}: θ={:.2}° hit no wall", theta.to_degrees());
            continue;
        };

        if candidate.is_valid(config) {
            log::debug!(
                "Trial {trial}: θ={:.2}° accepted (clearance {:.3})",
                theta.to_degrees(),
                candidate.min_clearance
            );
            return PlacementResult::from_candidate(candidate, Selection::Accepted);
        }
        log::debug!(
            "Trial {trial}: θ={:.2}° rejected (clearance {:.3}, budget ok: {})",
            theta.to_degrees(),
            candidate.min_clearance,
            candidate.budget_ok(config)
        );

        if best
            .as_ref()
            .is_none_or(|b| candidate.min_clearance > b.min_clearance)
        {
            best = Some(candidate);
        }
    }

    if let Some(candidate) = best {
        log::warn!("Using fallback candidate (best clearance)");
        return PlacementResult::from_candidate(candidate, Selection::BestClearance);
    }

    log::warn!("No trial reached a wall; using straight 45° path");
    straight_fallback(config, walls, origin)
}

/// Straight 45° line ignoring clearance and bounce budget
pub fn straight_fallback(
    config: &SpawnConfig,
    walls: &WallModel,
    origin: Vec2,
) -> PlacementResult {
    let theta = FRAC_PI_4;
    let path = Path::straight(
        origin,
        direction_from_angle(theta),
        config.needed_length() + FALLBACK_EXTRA_LENGTH,
    );
    let candidate = Candidate::from_path(config, walls, theta, path);
    PlacementResult::from_candidate(candidate, Selection::Straight)
}
