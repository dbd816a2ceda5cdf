use std::collections::{HashMap, HashSet};

use glam::Vec3;

use crate::utils::{normalize, WorldCoord};

/// Side length of a sector, in blocks
pub const SECTOR_SIZE: i32 = 16;

/// coordinates of a sector in sector space
///
/// Sectors are columns spanning the full world height, so only x and z are kept.
#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub struct SectorCoord(pub i32, pub i32);

impl SectorCoord {
    /// Corner of the sector in world block coordinates
    pub fn to_world_coord(&self) -> WorldCoord {
        WorldCoord(self.0 * SECTOR_SIZE, 0, self.1 * SECTOR_SIZE)
    }
}

impl WorldCoord {
    /// Sector containing this block
    pub fn to_sector_coord(&self) -> SectorCoord {
        SectorCoord(self.0.div_euclid(SECTOR_SIZE), self.2.div_euclid(SECTOR_SIZE))
    }
}

/// Sector containing a continuous position
pub fn sectorize(position: Vec3) -> SectorCoord {
    normalize(position).to_sector_coord()
}

/// All sectors whose offset from `center` satisfies dx² + dz² <= (pad + 1)²
pub fn sector_neighborhood(center: SectorCoord, pad: i32) -> HashSet<SectorCoord> {
    let r = pad + 1;
    let mut sectors = HashSet::new();
    for dx in -r..=r {
        for dz in -r..=r {
            if dx * dx + dz * dz > r * r {
                continue;
            }
            sectors.insert(SectorCoord(center.0 + dx, center.1 + dz));
        }
    }
    sectors
}

/// Mapping from sector to the blocks inside it, in insertion order.
#[derive(Debug, Default)]
pub struct SectorIndex {
    sectors: HashMap<SectorCoord, Vec<WorldCoord>>,
}

impl SectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: WorldCoord) {
        self.sectors
            .entry(position.to_sector_coord())
            .or_default()
            .push(position);
    }

    /// Removes `position` from its sector. The (possibly empty) list stays.
    pub fn remove(&mut self, position: &WorldCoord) {
        if let Some(blocks) = self.sectors.get_mut(&position.to_sector_coord()) {
            if let Some(idx) = blocks.iter().position(|p| p == position) {
                blocks.remove(idx);
            }
        }
    }

    pub fn blocks(&self, sector: &SectorCoord) -> &[WorldCoord] {
        self.sectors.get(sector).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SectorCoord, &Vec<WorldCoord>)> {
        self.sectors.iter()
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}
