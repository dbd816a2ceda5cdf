// terrain.rs - one-shot world bring-up
//
// The world is built in three passes:
//
// PASS 1: Ground
//   -> a grass layer at y = -2 over a stone layer at y = -3, across the whole square
//
// PASS 2: Outer walls
//   -> stone columns from y = -2 to y = 2 on the perimeter
//
// PASS 3: Hills
//   -> `hill_count` tapered mounds with a random center, height, base radius and block type
//   -> each layer shrinks the radius by one
//   -> nothing is placed inside the spawn clearing around the origin
//
// Every block goes through `Scene::add_block` so sectors and visibility stay consistent.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

use super::block::BlockType;
use crate::config::WorldConfig;
use crate::model::Scene;
use crate::utils::WorldCoord;
use crate::view::Renderer;

/// Height of the ground the player spawns on
const GROUND_Y: i32 = 0;

pub struct WorldGenerator {
    config: WorldConfig,
}

impl WorldGenerator {
    pub fn new(config: WorldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Populate `scene` using the configured seed
    pub fn generate<R: Renderer>(&self, scene: &mut Scene<R>) {
        let mut rng = ChaCha12Rng::seed_from_u64(self.config.seed);
        self.generate_with(scene, &mut rng);
    }

    pub fn generate_with<R: Renderer>(&self, scene: &mut Scene<R>, rng: &mut impl Rng) {
        self.build_ground(scene);
        self.build_hills(scene, rng);

        let (shown, total) = scene.stats();
        tracing::info!(
            "generated world: {} blocks, {} shown, seed {}",
            total,
            shown,
            self.config.seed
        );
    }

    fn build_ground<R: Renderer>(&self, scene: &mut Scene<R>) {
        let n = self.config.half_size;
        let y = GROUND_Y;

        for x in -n..=n {
            for z in -n..=n {
                scene.add_block(WorldCoord(x, y - 2, z), BlockType::Grass);
                scene.add_block(WorldCoord(x, y - 3, z), BlockType::Stone);

                if x == -n || x == n || z == -n || z == n {
                    for dy in -2..=2 {
                        scene.add_block(WorldCoord(x, y + dy, z), BlockType::Stone);
                    }
                }
            }
        }
    }

    fn build_hills<R: Renderer>(&self, scene: &mut Scene<R>, rng: &mut impl Rng) {
        let o = self.config.half_size - self.config.hill_margin;
        let clearing = self.config.spawn_clearing_radius;

        for _ in 0..self.config.hill_count {
            let a = rng.gen_range(-o..o); // x position of the hill
            let b = rng.gen_range(-o..o); // z position of the hill
            let c = GROUND_Y - 1; // base of the hill
            let h = rng.gen_range(1..6); // height of the hill
            let mut s: i32 = rng.gen_range(4..8); // 2 * s is the side length of the hill
            let block = *self
                .config
                .hill_blocks
                .choose(rng)
                .unwrap_or(&BlockType::Grass);

            for y in c..c + h {
                for x in a - s..=a + s {
                    for z in b - s..=b + s {
                        let position = WorldCoord(x, y, z);
                        if position.squared_distance(&WorldCoord(a, y, b)) > (s + 1).pow(2) {
                            continue;
                        }
                        if position.squared_distance(&WorldCoord(0, y, 0)) < clearing.pow(2) {
                            continue;
                        }
                        scene.add_block(position, block);
                    }
                }
                // taper off
                s -= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Batch;

    fn small_config(seed: u64) -> WorldConfig {
        WorldConfig {
            half_size: 12,
            hill_count: 6,
            hill_margin: 3,
            spawn_clearing_radius: 3,
            seed,
            ..WorldConfig::default()
        }
    }

    fn generate(config: WorldConfig) -> Scene<Batch> {
        let mut scene = Scene::new(Batch::new());
        WorldGenerator::new(config).generate(&mut scene);
        scene
    }

    #[test]
    fn test_ground_and_walls() {
        let scene = generate(WorldConfig { hill_count: 0, ..small_config(1) });
        let n = 12;

        for x in -n..=n {
            for z in -n..=n {
                assert_eq!(scene.get_block(&WorldCoord(x, -3, z)), Some(BlockType::Stone));
                let border = x == -n || x == n || z == -n || z == n;
                let top = scene.get_block(&WorldCoord(x, -2, z));
                if border {
                    assert_eq!(top, Some(BlockType::Stone), "wall replaces grass at ({x}, {z})");
                    for y in -1..=2 {
                        assert_eq!(scene.get_block(&WorldCoord(x, y, z)), Some(BlockType::Stone));
                    }
                } else {
                    assert_eq!(top, Some(BlockType::Grass));
                    assert!(!scene.contains(&WorldCoord(x, -1, z)));
                }
            }
        }

        let side = (2 * n + 1) as usize;
        let wall_columns = 4 * (side - 1);
        assert_eq!(scene.len(), 2 * side * side + 4 * wall_columns);
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = generate(small_config(42));
        let b = generate(small_config(42));
        assert_eq!(a.len(), b.len());
        for (pos, block) in a.blocks() {
            assert_eq!(b.get_block(pos), Some(*block), "block at {pos:?}");
        }
    }

    #[test]
    fn test_hills_respect_spawn_clearing() {
        let scene = generate(WorldConfig { hill_count: 40, ..small_config(3) });
        for (pos, _) in scene.blocks() {
            if pos.1 >= -1 && pos.0.abs() < 12 && pos.2.abs() < 12 {
                assert!(pos.0.pow(2) + pos.2.pow(2) >= 9, "hill block inside spawn clearing at {pos:?}");
            }
        }
        assert!(scene.blocks().any(|(pos, _)| pos.1 == -1 && pos.0.abs() < 12 && pos.2.abs() < 12));
    }

    #[test]
    fn test_generated_world_is_consistent() {
        let scene = generate(small_config(9));
        scene.assert_consistent();
    }
}
