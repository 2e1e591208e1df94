//! Spawner collaborator
//!
//! Owns the scene-facing inputs (origin, enemy template, walls) and hands
//! placements to a `SpawnSink`. The geometry core never sees the sink.

use glam::Vec2;

use crate::config::{SpawnConfig, SpawnerOptions};
use crate::error::SpawnError;
use crate::specular::{PlacementResult, WallModel, WallSegment, generate};

/// Receives spawn and clear requests from the spawner
pub trait SpawnSink<T> {
    /// Remove every previously spawned enemy
    fn clear(&mut self);
    /// Instantiate `template` at `pos`
    fn spawn(&mut self, template: &T, pos: Vec2);
}

/// Sink that records what it was asked to spawn
#[derive(Debug, Clone)]
pub struct RecordingSink<T> {
    pub spawned: Vec<(T, Vec2)>,
    /// Number of `clear` calls received
    pub clears: u32,
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self {
            spawned: Vec::new(),
            clears: 0,
        }
    }
}

impl<T: Clone> SpawnSink<T> for RecordingSink<T> {
    fn clear(&mut self) {
        self.spawned.clear();
        self.clears += 1;
    }

    fn spawn(&mut self, template: &T, pos: Vec2) {
        self.spawned.push((template.clone(), pos));
    }
}

/// Places a wave of enemies along a specular shot path
#[derive(Debug, Clone)]
pub struct SpecularPathSpawner<T> {
    pub config: SpawnConfig,
    pub options: SpawnerOptions,
    /// Shot origin
    pub origin: Option<Vec2>,
    pub template: Option<T>,
    pub walls: Vec<WallSegment>,
    last: Option<PlacementResult>,
}

impl<T> SpecularPathSpawner<T> {
    pub fn new(config: SpawnConfig, options: SpawnerOptions) -> Self {
        Self {
            config,
            options,
            origin: None,
            template: None,
            walls: Vec::new(),
            last: None,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_template(mut self, template: T) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_walls(mut self, walls: Vec<WallSegment>) -> Self {
        self.walls = walls;
        self
    }

    /// Run a pass if `generate_on_start` is set
    pub fn start(
        &mut self,
        sink: &mut impl SpawnSink<T>,
    ) -> Result<Option<&PlacementResult>, SpawnError> {
        if !self.options.generate_on_start {
            return Ok(None);
        }
        self.generate_and_spawn(sink).map(Some)
    }

    /// Place a fresh wave and spawn it through `sink`.
    ///
    /// Fails before touching the sink if the origin or template is missing
    /// or the config is out of range.
    pub fn generate_and_spawn(
        &mut self,
        sink: &mut impl SpawnSink<T>,
    ) -> Result<&PlacementResult, SpawnError> {
        let (origin, template) = self.inputs()?;
        let result = self.run(origin)?;

        if self.options.clear_old_on_spawn {
            sink.clear();
        }
        for &pos in &result.positions {
            sink.spawn(template, pos);
        }
        log::info!(
            "Spawned {} enemies. Theta={:.2}°",
            result.positions.len(),
            result.theta_degrees()
        );

        Ok(&*self.last.insert(result))
    }

    /// Compute a placement without spawning anything
    pub fn place(&self) -> Result<PlacementResult, SpawnError> {
        let (origin, _) = self.inputs()?;
        self.run(origin)
    }

    /// Origin and template, both required before any pass
    fn inputs(&self) -> Result<(Vec2, &T), SpawnError> {
        let Some(origin) = self.origin else {
            log::error!("Shot origin is missing");
            return Err(SpawnError::MissingOrigin);
        };
        let Some(template) = self.template.as_ref() else {
            log::error!("Enemy template is missing");
            return Err(SpawnError::MissingTemplate);
        };
        Ok((origin, template))
    }

    fn run(&self, origin: Vec2) -> Result<PlacementResult, SpawnError> {
        self.config.validate()?;
        let walls = WallModel::new(self.walls.iter().copied());
        Ok(generate(&self.config, &walls, origin))
    }

    /// Angle of the last spawned wave (radians)
    pub fn chosen_angle(&self) -> Option<f32> {
        self.last.as_ref().map(|r| r.theta)
    }

    pub fn last_result(&self) -> Option<&PlacementResult> {
        self.last.as_ref()
    }
}
