use std::ops::{Index, IndexMut};

use glam::Vec3;

/// coordinates of a block in world space
///
/// Every block key is integral; continuous positions are turned into keys with [`normalize`].
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy, Default)]
pub struct WorldCoord(pub i32, pub i32, pub i32);

impl WorldCoord {
    pub fn squared_distance(&self, other: &WorldCoord) -> i32 {
        (self.0 - other.0).pow(2) +
        (self.1 - other.1).pow(2) +
        (self.2 - other.2).pow(2)
    }

    /// Offset by a face direction (or any integral delta)
    pub fn offset(&self, d: (i32, i32, i32)) -> WorldCoord {
        WorldCoord(self.0 + d.0, self.1 + d.1, self.2 + d.2)
    }

    /// Center of the block in continuous space
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.0 as f32, self.1 as f32, self.2 as f32)
    }
}

impl Index<usize> for WorldCoord {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        match axis {
            0 => &self.0,
            1 => &self.1,
            2 => &self.2,
            _ => panic!("unknown axis index {axis} in a world coordinate"),
        }
    }
}

impl IndexMut<usize> for WorldCoord {
    fn index_mut(&mut self, axis: usize) -> &mut i32 {
        match axis {
            0 => &mut self.0,
            1 => &mut self.1,
            2 => &mut self.2,
            _ => panic!("trying to set unknown axis index {axis} in a world coordinate"),
        }
    }
}

/// Returns the block containing `position`.
///
/// Rounds half away from zero on every axis, so `0.5 -> 1` and `-0.5 -> -1`.
pub fn normalize(position: Vec3) -> WorldCoord {
    WorldCoord(
        position.x.round() as i32,
        position.y.round() as i32,
        position.z.round() as i32,
    )
}
