use glam::Vec3;

use crate::config::PhysicsConfig;
use crate::controller::GameState;
use crate::model::world::FACES;
use crate::utils::{normalize, WorldCoord};

/// How far the player has to overlap a neighboring block before it counts as a collision.
///
/// At 0 any contact collides, just under 0.5 lets the player sink into the ground like tall grass,
/// and from 0.5 on the player falls through.
pub const PAD: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub position: Vec3,
    /// a floor or ceiling was hit, so vertical motion has to stop
    pub vertical_stop: bool,
}

/// Push a column of `height` blocks at `position` out of the blocks around it.
///
/// `position` is the top of the column; the slices below it are checked down to `height - 1`.
pub fn collide<F>(position: Vec3, height: i32, is_solid: F) -> Collision
where
    F: Fn(&WorldCoord) -> bool,
{
    let mut p = position;
    let np = normalize(position);
    let mut vertical_stop = false;

    for face in FACES {
        let face = WorldCoord(face.0, face.1, face.2);
        for axis in 0..3 {
            if face[axis] == 0 {
                continue;
            }
            let direction = face[axis] as f32;
            let overlap = (p[axis] - np[axis] as f32) * direction;
            if overlap < PAD {
                continue;
            }
            for dy in 0..height {
                let mut neighbor = np;
                neighbor[1] -= dy;
                neighbor[axis] += face[axis];
                if !is_solid(&neighbor) {
                    continue;
                }
                p[axis] -= (overlap - PAD) * direction;
                if axis == 1 {
                    vertical_stop = true;
                }
                break;
            }
        }
    }

    Collision { position: p, vertical_stop }
}

/// Handles player physics (gravity, collision, jumping)
pub struct PhysicsSystem {
    pub walking_speed: f32,
    pub flying_speed: f32,
    pub gravity: f32,
    pub jump_speed: f32,
    pub terminal_velocity: f32,
    pub player_height: i32,
}

impl PhysicsSystem {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            walking_speed: config.walking_speed,
            flying_speed: config.flying_speed,
            gravity: config.gravity,
            jump_speed: config.jump_speed(),
            terminal_velocity: config.terminal_velocity,
            player_height: config.player_height,
        }
    }

    /// Start a jump if the player is standing still vertically
    pub fn jump(&self, player: &mut GameState) -> bool {
        if player.dy != 0.0 {
            return false;
        }
        player.dy = self.jump_speed;
        true
    }

    /// Advance the player by one sub-step of `dt` seconds
    pub fn update<F>(&self, player: &mut GameState, dt: f32, is_solid: F)
    where
        F: Fn(&WorldCoord) -> bool,
    {
        let speed = if player.flying { self.flying_speed } else { self.walking_speed };
        let mut displacement = player.motion_vector() * (dt * speed);

        if !player.flying {
            // speed up while falling until terminal velocity, slow down while rising
            player.dy -= dt * self.gravity;
            player.dy = player.dy.max(-self.terminal_velocity);
            displacement.y += player.dy * dt;
        }

        let collision = collide(player.position + displacement, self.player_height, is_solid);
        player.position = collision.position;
        if collision.vertical_stop {
            player.dy = 0.0;
        }
    }
}
