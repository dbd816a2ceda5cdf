use glam::Vec3;

use crate::config::EngineConfig;
use crate::controller::input::{InputEvent, InputQueue};
use crate::controller::{CameraController, GameState, PhysicsSystem};
use crate::model::world::sectorize;
use crate::model::{BlockType, Hit, Scene, WorldGenerator};
use crate::utils::WorldCoord;
use crate::view::{cube_vertices, CubeVertices, Renderer};

/// Half size of the outline drawn around the focused block, just outside its faces
const OUTLINE_SIZE: f32 = 0.51;

/// Block under the crosshair
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedBlock {
    pub block: WorldCoord,
    pub outline: CubeVertices,
}

/// Owns the world and the player and advances both in fixed sub-steps.
///
/// Input arrives through [`Simulation::push_event`] at any time and is applied at the start of the
/// next [`Simulation::advance`].
pub struct Simulation<R: Renderer> {
    scene: Scene<R>,
    player: GameState,
    physics: PhysicsSystem,
    camera_controller: CameraController,
    queue: InputQueue,
    config: EngineConfig,
    ticks: u64,
}

impl<R: Renderer> Simulation<R> {
    /// Generate the world described by `config` and place the player at the origin
    pub fn new(config: EngineConfig, renderer: R) -> Self {
        let mut scene = Scene::new(renderer);
        WorldGenerator::new(config.world.clone()).generate(&mut scene);
        Self::with_scene(config, scene)
    }

    /// Run on an already populated scene, using the configured sector pad
    pub fn with_scene(config: EngineConfig, scene: Scene<R>) -> Self {
        let scene = scene.with_sector_pad(config.simulation.sector_pad);
        let player = GameState::new(Vec3::ZERO, config.input.inventory.clone());
        let physics = PhysicsSystem::new(&config.physics);
        let camera_controller = CameraController::new(config.input.mouse_sensitivity);
        tracing::info!(
            "simulation ready: {} blocks, {} substeps per tick",
            scene.len(),
            config.simulation.substeps
        );

        Self {
            scene,
            player,
            physics,
            camera_controller,
            queue: InputQueue::new(),
            config,
            ticks: 0,
        }
    }

    pub fn scene(&self) -> &Scene<R> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene<R> {
        &mut self.scene
    }

    pub fn player(&self) -> &GameState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut GameState {
        &mut self.player
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of `advance` calls so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.queue.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Advance by one tick at the configured rate
    pub fn tick(&mut self) {
        self.advance(1.0 / self.config.simulation.ticks_per_sec as f32);
    }

    /// Apply queued input, follow the player across sectors, then simulate `dt` seconds.
    ///
    /// `dt` is capped at `max_dt` and split into `substeps` equal steps; negative or NaN counts as 0.
    pub fn advance(&mut self, dt: f32) {
        let events: Vec<InputEvent> = self.queue.drain().collect();
        for event in events {
            self.apply(event);
        }

        self.update_sector();

        let sim = &self.config.simulation;
        let dt = if dt.is_nan() { 0.0 } else { dt.clamp(0.0, sim.max_dt) };
        let step = dt / sim.substeps as f32;
        for _ in 0..sim.substeps {
            let scene = &self.scene;
            self.physics.update(&mut self.player, step, |p| scene.contains(p));
        }
        self.ticks += 1;
    }

    /// Issue all registered draws
    pub fn flush(&mut self) {
        self.scene.flush();
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Look { delta_yaw, delta_pitch } => self.look(delta_yaw, delta_pitch),
            InputEvent::MouseMove { dx, dy } => {
                self.camera_controller.apply_look(&mut self.player.camera, dx, dy);
            }
            InputEvent::SetStrafe { forward_back, left_right } => {
                self.set_strafe(forward_back, left_right);
            }
            InputEvent::Jump => {
                self.jump();
            }
            InputEvent::ToggleFly => {
                self.toggle_fly();
            }
            InputEvent::SelectSlot(index) => self.select_inventory_slot(index),
            InputEvent::PlaceBlock => {
                self.place_block();
            }
            InputEvent::RemoveBlock => {
                self.remove_block();
            }
        }
    }

    fn update_sector(&mut self) {
        let sector = sectorize(self.player.position);
        if self.player.sector == Some(sector) {
            return;
        }
        self.scene.change_sectors(self.player.sector, Some(sector));
        self.player.sector = Some(sector);
    }

    pub fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.player.camera.look(delta_yaw, delta_pitch);
    }

    pub fn set_strafe(&mut self, forward_back: i8, left_right: i8) {
        self.player.set_strafe(forward_back, left_right);
    }

    pub fn toggle_fly(&mut self) -> bool {
        let flying = self.player.toggle_fly();
        tracing::debug!("flying: {}", flying);
        flying
    }

    pub fn jump(&mut self) -> bool {
        self.physics.jump(&mut self.player)
    }

    pub fn select_inventory_slot(&mut self, index: usize) {
        self.player.select_inventory_slot(index);
        tracing::debug!("selected {:?}", self.player.selected_block());
    }

    /// What the player is looking at, within reach
    pub fn hit_test(&self) -> Option<Hit> {
        self.scene.hit_test(
            self.player.position,
            self.player.sight_vector(),
            self.config.simulation.reach,
        )
    }

    /// Put the selected block in front of the focused one; returns where it went
    pub fn place_block(&mut self) -> Option<WorldCoord> {
        let previous = self.hit_test()?.previous?;
        let block = self.player.selected_block()?;
        self.scene.add_block(previous, block);
        tracing::debug!("placed {:?} at {:?}", block, previous);
        Some(previous)
    }

    /// Remove the focused block unless it is indestructible
    pub fn remove_block(&mut self) -> Option<(WorldCoord, BlockType)> {
        let target = self.hit_test()?.block;
        let block = self.scene.get_block(&target)?;
        if !block.is_destructible() {
            tracing::warn!("refusing to remove indestructible {:?} at {:?}", block, target);
            return None;
        }
        self.scene.remove_block(&target);
        tracing::debug!("removed {:?} at {:?}", block, target);
        Some((target, block))
    }

    /// The block under the crosshair and the outline to draw around it
    pub fn focused_block(&self) -> Option<FocusedBlock> {
        let block = self.hit_test()?.block;
        Some(FocusedBlock {
            block,
            outline: cube_vertices(block.center(), OUTLINE_SIZE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::model::world::SectorCoord;
    use crate::view::render::testing::RecordingRenderer;

    fn empty_sim() -> Simulation<RecordingRenderer> {
        Simulation::with_scene(EngineConfig::default(), Scene::new(RecordingRenderer::default()))
    }

    #[test]
    fn test_new_generates_world() {
        let config = EngineConfig {
            world: WorldConfig {
                half_size: 12,
                hill_count: 4,
                hill_margin: 3,
                spawn_clearing_radius: 3,
                ..WorldConfig::default()
            },
            ..EngineConfig::default()
        };
        let mut sim = Simulation::new(config, RecordingRenderer::default());
        assert!(sim.scene().len() > 2 * 25 * 25);
        assert_eq!(sim.player().sector, None);

        // stand on the ground for a while
        for _ in 0..120 {
            sim.tick();
        }
        assert_eq!(sim.player().sector, Some(SectorCoord(0, 0)));
        assert_eq!(sim.player().dy, 0.0);
        // feet in cell -1 on the grass at y = -2
        assert!((sim.player().position.y - (-0.25)).abs() < 1e-3, "{:?}", sim.player().position);
        assert_eq!(sim.ticks(), 120);
        sim.scene().assert_consistent();
    }

    #[test]
    fn test_events_apply_on_advance_in_order() {
        let mut sim = empty_sim();
        sim.push_event(InputEvent::SelectSlot(1));
        sim.push_event(InputEvent::SelectSlot(2));
        sim.push_event(InputEvent::ToggleFly);
        sim.push_event(InputEvent::Look { delta_yaw: 90.0, delta_pitch: 10.0 });
        sim.push_event(InputEvent::MouseMove { dx: 0.0, dy: -200.0 });
        assert_eq!(sim.pending_events(), 5);
        assert_eq!(sim.player().selected_block(), Some(BlockType::Brick), "nothing applied before advance");

        sim.advance(0.0);
        assert_eq!(sim.pending_events(), 0);
        assert_eq!(sim.player().selected_block(), Some(BlockType::Sand));
        assert!(sim.player().flying);
        assert_eq!(sim.player().camera.yaw, 90.0);
        assert!((sim.player().camera.pitch - (10.0 - 30.0)).abs() < 1e-4);
    }

    #[test]
    fn test_advance_clamps_dt() {
        let mut sim = empty_sim();
        sim.push_event(InputEvent::ToggleFly);
        sim.push_event(InputEvent::SetStrafe { forward_back: 0, left_right: 1 });

        // a long stall only moves the player max_dt worth
        sim.advance(5.0);
        let moved = sim.player().position.x;
        assert!((moved - 15.0 * 0.2).abs() < 1e-4, "moved {moved}");

        sim.advance(-1.0);
        sim.advance(f32::NAN);
        assert_eq!(sim.player().position.x, moved);
    }

    #[test]
    fn test_substeps_land_like_small_frames() {
        let mut sim = empty_sim();
        for x in -3..=3 {
            for z in -3..=3 {
                sim.scene_mut().add_block(WorldCoord(x, -1, z), BlockType::Stone);
            }
        }
        sim.player_mut().position = Vec3::new(0.0, 5.0, 0.0);
        for _ in 0..60 {
            sim.advance(1.0 / 30.0);
        }
        assert_eq!(sim.player().dy, 0.0);
        assert!((sim.player().position.y - 0.75).abs() < 1e-3);
    }

    #[test]
    fn test_place_and_remove() {
        let mut sim = empty_sim();
        sim.scene_mut().add_block(WorldCoord(0, 0, -3), BlockType::Stone);

        // default camera looks down -z
        assert_eq!(sim.place_block(), Some(WorldCoord(0, 0, -2)));
        assert_eq!(sim.scene().get_block(&WorldCoord(0, 0, -2)), Some(BlockType::Brick));

        assert_eq!(sim.remove_block(), Some((WorldCoord(0, 0, -2), BlockType::Brick)));
        assert!(!sim.scene().contains(&WorldCoord(0, 0, -2)));

        // stone stays
        assert_eq!(sim.remove_block(), None);
        assert_eq!(sim.scene().get_block(&WorldCoord(0, 0, -3)), Some(BlockType::Stone));
        sim.scene().assert_consistent();
    }

    #[test]
    fn test_place_and_remove_through_events() {
        let mut sim = empty_sim();
        sim.scene_mut().add_block(WorldCoord(0, 0, -3), BlockType::Stone);
        sim.push_event(InputEvent::SelectSlot(2));
        sim.push_event(InputEvent::PlaceBlock);
        sim.push_event(InputEvent::Look { delta_yaw: 90.0, delta_pitch: 0.0 });
        sim.push_event(InputEvent::RemoveBlock);
        sim.player_mut().flying = true;
        sim.advance(0.0);

        assert_eq!(sim.scene().get_block(&WorldCoord(0, 0, -2)), Some(BlockType::Sand));
        assert_eq!(sim.scene().len(), 2, "nothing in reach after turning");
    }

    #[test]
    fn test_nothing_in_sight() {
        let mut sim = empty_sim();
        assert_eq!(sim.focused_block(), None);
        assert_eq!(sim.place_block(), None);
        assert_eq!(sim.remove_block(), None);
        assert!(sim.scene().is_empty());
    }

    #[test]
    fn test_focused_block_outline() {
        let mut sim = empty_sim();
        sim.scene_mut().add_block(WorldCoord(0, -2, 0), BlockType::Grass);
        sim.look(0.0, -90.0);

        let focused = sim.focused_block().expect("block below");
        assert_eq!(focused.block, WorldCoord(0, -2, 0));
        assert_eq!(focused.outline, cube_vertices(Vec3::new(0.0, -2.0, 0.0), 0.51));
    }

    #[test]
    fn test_jump_only_without_vertical_speed() {
        let mut sim = empty_sim();
        sim.player_mut().flying = true;
        assert!(sim.jump());
        assert!(!sim.jump());
    }

    #[test]
    fn test_crossing_sectors_hides_far_blocks() {
        let mut sim = empty_sim();
        sim.player_mut().flying = true;
        let far_west = SectorCoord(-5, 0).to_world_coord().offset((3, 0, 5));
        let far_east = SectorCoord(7, 0).to_world_coord().offset((3, 0, 5));
        sim.scene_mut().add_block(far_west, BlockType::Brick);
        sim.scene_mut().add_block(far_east, BlockType::Brick);
        sim.scene_mut().hide_block(&far_east);

        sim.advance(0.0);
        assert_eq!(sim.player().sector, Some(SectorCoord(0, 0)));
        assert!(sim.scene().is_shown(&far_west));
        assert!(!sim.scene().is_shown(&far_east));

        sim.player_mut().position = Vec3::new(40.0, 0.0, 0.0);
        sim.advance(0.0);
        assert_eq!(sim.player().sector, Some(SectorCoord(2, 0)));
        assert!(!sim.scene().is_shown(&far_west), "left the view");
        assert!(sim.scene().is_shown(&far_east), "came into view");
    }

    #[test]
    fn test_with_scene_applies_configured_pad() {
        let mut config = EngineConfig::default();
        config.simulation.sector_pad = 1;
        let scene = Scene::new(RecordingRenderer::default()).with_sector_pad(6);
        let mut sim = Simulation::with_scene(config, scene);
        assert_eq!(sim.scene().sector_pad(), 1);

        let near = SectorCoord(2, 0).to_world_coord().offset((3, 0, 5));
        let far = SectorCoord(3, 0).to_world_coord().offset((3, 0, 5));
        for p in [near, far] {
            sim.scene_mut().add_block(p, BlockType::Brick);
            sim.scene_mut().hide_block(&p);
        }

        sim.advance(0.0);
        assert!(sim.scene().is_shown(&near));
        assert!(!sim.scene().is_shown(&far), "outside a pad of 1");
    }
}
