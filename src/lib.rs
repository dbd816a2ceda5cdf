// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::EngineConfig;
pub use controller::{InputEvent, Simulation};
pub use error::{EngineError, EngineResult};
pub use model::{BlockType, Scene};
pub use utils::WorldCoord;
pub use view::{Batch, Renderer};
