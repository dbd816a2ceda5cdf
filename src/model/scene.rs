use std::collections::HashMap;

use glam::Vec3;

use crate::model::raycast::{self, Hit};
use crate::model::world::{sector_neighborhood, BlockType, SectorCoord, SectorIndex, FACES};
use crate::utils::WorldCoord;
use crate::view::{cube_vertices, DrawHandle, Renderer};

/// How many sectors around the player stay shown
pub const DEFAULT_SECTOR_PAD: i32 = 4;

/// All blocks of the world plus what is currently drawn.
///
/// States of a position:
///
/// not in `world` = empty cell
///
/// in `world` only = block exists but is hidden (fully enclosed, or its sector is out of view)
///
/// in `world`, `shown` and `drawables` = block is registered with the renderer
pub struct Scene<R: Renderer> {
    /// every block that exists
    world: HashMap<WorldCoord, BlockType>,

    /// same as `world`, but only the blocks that are shown
    shown: HashMap<WorldCoord, BlockType>,

    /// renderer handle of every shown block
    drawables: HashMap<WorldCoord, DrawHandle>,

    sectors: SectorIndex,
    sector_pad: i32,

    renderer: R,
}

impl<R: Renderer> Scene<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            world: HashMap::new(),
            shown: HashMap::new(),
            drawables: HashMap::new(),
            sectors: SectorIndex::new(),
            sector_pad: DEFAULT_SECTOR_PAD,
            renderer,
        }
    }

    pub fn with_sector_pad(mut self, pad: i32) -> Self {
        self.sector_pad = pad;
        self
    }

    pub fn sector_pad(&self) -> i32 {
        self.sector_pad
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Issue all registered draws
    pub fn flush(&mut self) {
        self.renderer.flush();
    }

    pub fn get_block(&self, position: &WorldCoord) -> Option<BlockType> {
        self.world.get(position).copied()
    }

    pub fn contains(&self, position: &WorldCoord) -> bool {
        self.world.contains_key(position)
    }

    pub fn is_shown(&self, position: &WorldCoord) -> bool {
        self.shown.contains_key(position)
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&WorldCoord, &BlockType)> {
        self.world.iter()
    }

    pub fn shown_blocks(&self) -> impl Iterator<Item = (&WorldCoord, &BlockType)> {
        self.shown.iter()
    }

    pub fn sectors(&self) -> &SectorIndex {
        &self.sectors
    }

    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    /// (shown blocks, all blocks)
    pub fn stats(&self) -> (usize, usize) {
        (self.shown.len(), self.world.len())
    }

    /// Add a block of type `block` at `position`.
    ///
    /// An existing block is removed first so its drawable and sector entry are released.
    pub fn add_block(&mut self, position: WorldCoord, block: BlockType) {
        if self.world.contains_key(&position) {
            self.remove_block(&position);
        }
        self.world.insert(position, block);
        self.sectors.insert(position);

        if self.exposed(&position) {
            self.show_block(&position);
        }
        self.check_neighbors(&position);
    }

    /// Remove the block at `position`, returning its type. Empty cells are left alone.
    pub fn remove_block(&mut self, position: &WorldCoord) -> Option<BlockType> {
        let block = self.world.remove(position)?;
        self.sectors.remove(position);

        if self.shown.contains_key(position) {
            self.hide_block(position);
        }
        self.check_neighbors(position);
        Some(block)
    }

    /// false if `position` is surrounded on all 6 sides by blocks, true otherwise
    pub fn exposed(&self, position: &WorldCoord) -> bool {
        FACES
            .iter()
            .any(|d| !self.world.contains_key(&position.offset(*d)))
    }

    /// Bring the neighbors of `position` up to date after it changed:
    /// exposed neighbors get shown, enclosed ones get hidden.
    pub fn check_neighbors(&mut self, position: &WorldCoord) {
        for d in FACES {
            let key = position.offset(d);
            if !self.world.contains_key(&key) {
                continue;
            }
            let shown = self.shown.contains_key(&key);
            if self.exposed(&key) {
                if !shown {
                    self.show_block(&key);
                }
            } else if shown {
                self.hide_block(&key);
            }
        }
    }

    /// Register the block at `position` with the renderer.
    ///
    /// Does nothing if there is no block or it is already shown.
    pub fn show_block(&mut self, position: &WorldCoord) {
        let Some(&block) = self.world.get(position) else {
            tracing::warn!("show_block on empty cell {:?}", position);
            return;
        };
        if self.shown.contains_key(position) {
            return;
        }

        let vertices = cube_vertices(position.center(), 0.5);
        let handle = self.renderer.register(&vertices, &block.tex_coords());
        self.drawables.insert(*position, handle);
        self.shown.insert(*position, block);
        tracing::trace!("show {:?} {:?}", block, position);
    }

    /// Unregister the block at `position`. Hiding does not remove it from the world.
    pub fn hide_block(&mut self, position: &WorldCoord) {
        if self.shown.remove(position).is_none() {
            return;
        }
        if let Some(handle) = self.drawables.remove(position) {
            self.renderer.unregister(handle);
        }
        tracing::trace!("hide {:?}", position);
    }

    /// Show every exposed, not yet shown block of `sector`
    pub fn show_sector(&mut self, sector: &SectorCoord) {
        let positions = self.sectors.blocks(sector).to_vec();
        for position in positions {
            if !self.shown.contains_key(&position) && self.exposed(&position) {
                self.show_block(&position);
            }
        }
    }

    /// Hide every shown block of `sector`
    pub fn hide_sector(&mut self, sector: &SectorCoord) {
        let positions = self.sectors.blocks(sector).to_vec();
        for position in positions {
            if self.shown.contains_key(&position) {
                self.hide_block(&position);
            }
        }
    }

    /// Move the view from sector `before` to sector `after`; `None` stands for no sector.
    ///
    /// Sectors near both `before` and `after` are left untouched.
    pub fn change_sectors(&mut self, before: Option<SectorCoord>, after: Option<SectorCoord>) {
        let pad = self.sector_pad;
        let before_set = before.map(|s| sector_neighborhood(s, pad)).unwrap_or_default();
        let after_set = after.map(|s| sector_neighborhood(s, pad)).unwrap_or_default();

        let show: Vec<SectorCoord> = after_set.difference(&before_set).copied().collect();
        let hide: Vec<SectorCoord> = before_set.difference(&after_set).copied().collect();
        tracing::debug!(
            "change sectors {:?} -> {:?}: showing {} sectors, hiding {}",
            before,
            after,
            show.len(),
            hide.len()
        );

        for sector in &show {
            self.show_sector(sector);
        }
        for sector in &hide {
            self.hide_sector(sector);
        }
    }

    /// Line of sight search from `origin` along `direction`, up to `max_distance` blocks.
    ///
    /// Returns the first block hit and the empty cell in front of it.
    pub fn hit_test(&self, origin: Vec3, direction: Vec3, max_distance: u32) -> Option<Hit> {
        raycast::hit_test(origin, direction, max_distance, |p| self.world.contains_key(p))
    }

    /// Panics unless all derived indices agree with the world.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (pos, block) in &self.world {
            assert_eq!(self.is_shown(pos), self.exposed(pos), "shown/exposed mismatch at {pos:?}");
            if let Some(shown) = self.shown.get(pos) {
                assert_eq!(shown, block, "stale shown type at {pos:?}");
            }
            let sector = self.sectors.blocks(&pos.to_sector_coord());
            assert_eq!(sector.iter().filter(|p| *p == pos).count(), 1, "sector entry for {pos:?}");
        }
        for pos in self.shown.keys() {
            assert!(self.world.contains_key(pos), "shown block {pos:?} missing from world");
            assert!(self.drawables.contains_key(pos), "shown block {pos:?} has no drawable");
        }
        assert_eq!(self.shown.len(), self.drawables.len());

        let indexed: usize = self.sectors.iter().map(|(_, blocks)| blocks.len()).sum();
        assert_eq!(indexed, self.world.len(), "sector index size");
        for (sector, blocks) in self.sectors.iter() {
            for pos in blocks {
                assert_eq!(pos.to_sector_coord(), *sector, "{pos:?} filed under wrong sector");
            }
        }
    }
}
