use glam::Vec3;

use crate::model::{BlockType, Camera, SectorCoord, Strafe};

/// Player state - position, vertical velocity, orientation, inventory
pub struct GameState {
    /// top of the player column
    pub position: Vec3,
    /// vertical velocity
    pub dy: f32,
    pub flying: bool,
    pub strafe: Strafe,
    pub camera: Camera,
    pub inventory: Vec<BlockType>,
    pub selected_slot: usize,
    /// sector the player was in at the last update; `None` before the first one
    pub sector: Option<SectorCoord>,
}

impl GameState {
    pub fn new(position: Vec3, inventory: Vec<BlockType>) -> Self {
        Self {
            position,
            dy: 0.0,
            flying: false,
            strafe: Strafe::default(),
            camera: Camera::new(),
            inventory,
            selected_slot: 0,
            sector: None,
        }
    }

    pub fn toggle_fly(&mut self) -> bool {
        self.flying = !self.flying;
        self.flying
    }

    pub fn set_strafe(&mut self, forward_back: i8, left_right: i8) {
        self.strafe = Strafe::new(forward_back, left_right);
    }

    /// Select `inventory[index % len]`
    pub fn select_inventory_slot(&mut self, index: usize) {
        if self.inventory.is_empty() {
            return;
        }
        self.selected_slot = index % self.inventory.len();
    }

    /// Block placed by the player, `None` with an empty inventory
    pub fn selected_block(&self) -> Option<BlockType> {
        self.inventory.get(self.selected_slot).copied()
    }

    pub fn sight_vector(&self) -> Vec3 {
        self.camera.sight_vector()
    }

    pub fn motion_vector(&self) -> Vec3 {
        self.camera.motion_vector(self.strafe, self.flying)
    }
}

/// Turns raw pointer movement into camera rotation
pub struct CameraController {
    /// degrees per pixel
    pub mouse_sensitivity: f32,
}

impl CameraController {
    pub fn new(mouse_sensitivity: f32) -> Self {
        Self { mouse_sensitivity }
    }

    /// Apply mouse look delta to camera; moving the pointer up looks up
    pub fn apply_look(&self, camera: &mut Camera, dx: f32, dy: f32) {
        camera.look(dx * self.mouse_sensitivity, dy * self.mouse_sensitivity);
    }
}
