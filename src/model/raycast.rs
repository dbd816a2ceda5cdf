use glam::Vec3;

use crate::utils::{normalize, WorldCoord};

/// Samples per block along the line of sight
const SAMPLES_PER_BLOCK: u32 = 8;

/// Result of a line of sight search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// the first solid block along the line
    pub block: WorldCoord,
    /// the cell sampled right before `block`; `None` if the search started inside `block`
    pub previous: Option<WorldCoord>,
}

/// March from `origin` along `direction` for at most `max_distance` blocks.
///
/// `direction` does not need to be unit length: each step moves `direction / 8`.
/// A sampled cell is only tested when it differs from the one before it.
pub fn hit_test<F>(origin: Vec3, direction: Vec3, max_distance: u32, is_solid: F) -> Option<Hit>
where
    F: Fn(&WorldCoord) -> bool,
{
    let step = direction / SAMPLES_PER_BLOCK as f32;
    let mut point = origin;
    let mut previous: Option<WorldCoord> = None;

    for _ in 0..max_distance.saturating_mul(SAMPLES_PER_BLOCK) {
        let key = normalize(point);
        if previous != Some(key) && is_solid(&key) {
            return Some(Hit { block: key, previous });
        }
        previous = Some(key);
        point += step;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn solid(blocks: &[WorldCoord]) -> HashSet<WorldCoord> {
        blocks.iter().copied().collect()
    }

    #[test]
    fn test_hit_straight_ahead() {
        let world = solid(&[WorldCoord(0, 0, 0)]);
        let hit = hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 8, |p| world.contains(p));
        assert_eq!(
            hit,
            Some(Hit { block: WorldCoord(0, 0, 0), previous: Some(WorldCoord(0, 0, 1)) })
        );
    }

    #[test]
    fn test_miss_looking_at_sky() {
        let world = solid(&[WorldCoord(0, 0, 0), WorldCoord(0, -1, 0)]);
        let hit = hit_test(Vec3::new(0.0, 2.0, 0.0), Vec3::Y, 8, |p| world.contains(p));
        assert_eq!(hit, None);
    }

    #[test]
    fn test_out_of_reach() {
        let world = solid(&[WorldCoord(0, 0, -10)]);
        assert_eq!(hit_test(Vec3::ZERO, Vec3::NEG_Z, 8, |p| world.contains(p)), None);

        let hit = hit_test(Vec3::ZERO, Vec3::NEG_Z, 11, |p| world.contains(p)).expect("in reach");
        assert_eq!(hit.block, WorldCoord(0, 0, -10));
        assert_eq!(hit.previous, Some(WorldCoord(0, 0, -9)));
    }

    #[test]
    fn test_huge_reach_does_not_overflow() {
        let world = solid(&[WorldCoord(0, 0, -3)]);
        let hit = hit_test(Vec3::ZERO, Vec3::NEG_Z, u32::MAX, |p| world.contains(p));
        assert_eq!(hit.map(|h| h.block), Some(WorldCoord(0, 0, -3)));
    }

    #[test]
    fn test_origin_inside_block() {
        let world = solid(&[WorldCoord(0, 0, 0)]);
        let hit = hit_test(Vec3::new(0.1, 0.2, -0.1), Vec3::X, 8, |p| world.contains(p));
        assert_eq!(hit, Some(Hit { block: WorldCoord(0, 0, 0), previous: None }));
    }

    #[test]
    fn test_direction_length_scales_step() {
        let world = solid(&[WorldCoord(0, 0, 0)]);
        let hit = hit_test(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0), 8, |p| world.contains(p));
        assert_eq!(hit.map(|h| h.previous), Some(Some(WorldCoord(0, 0, 1))));

        // half speed only covers half the distance
        let world = solid(&[WorldCoord(0, 0, -6)]);
        let slow = Vec3::new(0.0, 0.0, -0.5);
        assert_eq!(hit_test(Vec3::ZERO, slow, 8, |p| world.contains(p)), None);
    }

    #[test]
    fn test_only_tests_changed_cells() {
        let world = solid(&[WorldCoord(0, 0, 0)]);
        let lookups = std::cell::Cell::new(0);
        hit_test(Vec3::new(0.0, 5.0, 0.0), Vec3::Y, 3, |p| {
            lookups.set(lookups.get() + 1);
            world.contains(p)
        });
        // 5.0 ..= 7.875 covers cells 5, 6, 7 and 8
        assert_eq!(lookups.get(), 4);
    }
}
