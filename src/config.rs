use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::model::world::BlockType;

/// Runtime configuration, loadable from TOML.
///
/// Every section falls back to its defaults, so a config file only needs the values it changes:
///
/// ```toml
/// [world]
/// seed = 7
/// hill_count = 40
///
/// [physics]
/// gravity = 15.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub physics: PhysicsConfig,
    pub simulation: SimulationConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// half the side length of the square world
    pub half_size: i32,
    pub hill_count: u32,
    /// hill centers stay this far inside the outer walls
    pub hill_margin: i32,
    /// no hills within this radius of the origin
    pub spawn_clearing_radius: i32,
    pub hill_blocks: Vec<BlockType>,
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_size: 80,
            hill_count: 120,
            hill_margin: 10,
            spawn_clearing_radius: 5,
            hill_blocks: vec![BlockType::Grass, BlockType::Sand, BlockType::Brick],
            seed: 0x5eed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub walking_speed: f32,
    pub flying_speed: f32,
    pub gravity: f32,
    /// about the height of a block
    pub max_jump_height: f32,
    pub terminal_velocity: f32,
    /// in whole blocks
    pub player_height: i32,
}

impl PhysicsConfig {
    /// Initial upward speed that reaches `max_jump_height` under `gravity`
    pub fn jump_speed(&self) -> f32 {
        (2.0 * self.gravity * self.max_jump_height).sqrt()
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            walking_speed: 5.0,
            flying_speed: 15.0,
            gravity: 20.0,
            max_jump_height: 1.0,
            terminal_velocity: 50.0,
            player_height: 2,
        }
    }
}

/// Farthest the player can pick blocks, in blocks
pub const MAX_REACH: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// physics sub-steps per `advance`
    pub substeps: u32,
    /// longest frame time simulated in one `advance`, in seconds
    pub max_dt: f32,
    pub ticks_per_sec: u32,
    /// radius, in sectors, of the shown neighborhood around the player
    pub sector_pad: i32,
    /// how many blocks away the player can pick blocks
    pub reach: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            substeps: 8,
            max_dt: 0.2,
            ticks_per_sec: 60,
            sector_pad: 4,
            reach: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// degrees of rotation per pixel of mouse movement
    pub mouse_sensitivity: f32,
    /// blocks the player can place, selected with the number keys
    pub inventory: Vec<BlockType>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.15,
            inventory: vec![BlockType::Brick, BlockType::Grass, BlockType::Sand],
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> EngineResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));

        if self.simulation.substeps == 0 {
            return invalid("simulation.substeps must be at least 1");
        }
        if !(self.simulation.max_dt > 0.0) {
            return invalid("simulation.max_dt must be positive");
        }
        if self.simulation.ticks_per_sec == 0 {
            return invalid("simulation.ticks_per_sec must be at least 1");
        }
        if self.simulation.reach == 0 || self.simulation.reach > MAX_REACH {
            return Err(EngineError::InvalidConfig(format!(
                "simulation.reach must be between 1 and {MAX_REACH}"
            )));
        }
        if self.simulation.sector_pad < 0 {
            return invalid("simulation.sector_pad must not be negative");
        }
        if self.physics.player_height < 1 {
            return invalid("physics.player_height must be at least 1");
        }
        if self.world.half_size <= self.world.hill_margin {
            return invalid("world.half_size must exceed world.hill_margin");
        }
        if self.world.hill_blocks.is_empty() {
            return invalid("world.hill_blocks must not be empty");
        }
        if self.input.inventory.is_empty() {
            return invalid("input.inventory must not be empty");
        }
        Ok(())
    }
}
