// CONTROLLER: Input, game logic, and update loop
pub mod input;
pub mod physics;
pub mod camera_controller;
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputQueue, KeyBindings, MouseButton};
pub use physics::{collide, Collision, PhysicsSystem, PAD};
pub use camera_controller::{CameraController, GameState};
pub use frame_loop::{FocusedBlock, Simulation};
