// MODEL: World data and queries
pub mod world;
pub mod camera;
pub mod raycast;
pub mod scene;

pub use world::{BlockType, SectorCoord, WorldGenerator};
pub use camera::{Camera, Strafe};
pub use raycast::Hit;
pub use scene::Scene;
