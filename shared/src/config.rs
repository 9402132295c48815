//! Level + tuning configuration.
//!
//! Every field has a default, so a level file only needs to list what it changes:
//!
//! ```text
//! {
//!   "spawn": [0.0, 0.6, 0.0],
//!   "tuning": { "powerCap": 25.0 },
//!   "obstacles": [
//!     { "halfExtents": [25.0, 0.05, 25.0], "position": [0.0, -0.05, 0.0], "color": 8174141 }
//!   ]
//! }
//! ```

use nalgebra::Vector3;
use serde::Deserialize;

use crate::character::CharacterSpec;
use crate::constants::DEFAULT_SPAWN;
use crate::launch::LaunchTuning;
use crate::level::{ObstacleSpec, default_obstacles};
use crate::physics::PhysicsSettings;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub spawn: Vector3<f32>,
    pub tuning: LaunchTuning,
    pub character: CharacterSpec,
    pub physics: PhysicsSettings,
    pub obstacles: Vec<ObstacleSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn: Vector3::from(DEFAULT_SPAWN),
            tuning: LaunchTuning::default(),
            character: CharacterSpec::default(),
            physics: PhysicsSettings::default(),
            obstacles: default_obstacles(),
        }
    }
}

impl GameConfig {
    /// Parse a level file. Missing fields fall back to the built-in defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks everything the session assumes about its inputs.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.spawn.iter().all(|c| c.is_finite()) {
            return Err("Spawn point must be finite");
        }
        self.tuning.validate()?;
        self.character.validate()?;
        self.physics.validate()?;
        for obstacle in &self.obstacles {
            obstacle.validate()?;
        }
        Ok(())
    }
}
