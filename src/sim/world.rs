//! World generation: annulus scatter and constrained respawn

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::registry::ObstacleRegistry;
use super::state::{GameMode, ObstacleKind};
use crate::consts::*;
use crate::horizontal_distance_sq;

/// One jittered placement: uniform angle, uniform radius in the annulus,
/// then ±SPAWN_JITTER on each horizontal axis
pub fn scatter(rng: &mut Pcg32, inner: f32, outer: f32) -> Vec3 {
    let angle = rng.random_range(0.0..TAU);
    let radius = rng.random_range(inner..=outer);
    let x = angle.cos() * radius + rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER);
    let z = angle.sin() * radius + rng.random_range(-SPAWN_JITTER..=SPAWN_JITTER);
    Vec3::new(x, 0.0, z)
}

/// Batch placements. Overlaps between placements are tolerated.
pub fn generate(rng: &mut Pcg32, count: usize, inner: f32, outer: f32) -> Vec<Vec3> {
    (0..count).map(|_| scatter(rng, inner, outer)).collect()
}

/// Populate a fresh registry for the given mode
pub fn populate(registry: &mut ObstacleRegistry, rng: &mut Pcg32, mode: GameMode) {
    for pos in generate(rng, TREE_COUNT, TREE_SPAWN_INNER, TREE_SPAWN_OUTER) {
        registry.add(ObstacleKind::Tree, pos);
    }
    if mode == GameMode::Explore {
        for pos in generate(rng, HOUSE_COUNT, HOUSE_SPAWN_INNER, HOUSE_SPAWN_OUTER) {
            registry.add(ObstacleKind::House, pos);
        }
    }
}

/// Spawn a replacement tree at least RESPAWN_MIN_PLAYER_DIST from the player
/// and RESPAWN_MIN_OBSTACLE_DIST from every live obstacle (ground-plane
/// distances). Gives up silently after RESPAWN_MAX_ATTEMPTS; the world then
/// simply has one fewer obstacle.
pub fn respawn(registry: &mut ObstacleRegistry, rng: &mut Pcg32, player_pos: Vec3) -> Option<u32> {
    let player_min_sq = RESPAWN_MIN_PLAYER_DIST * RESPAWN_MIN_PLAYER_DIST;
    let obstacle_min_sq = RESPAWN_MIN_OBSTACLE_DIST * RESPAWN_MIN_OBSTACLE_DIST;

    for _ in 0..RESPAWN_MAX_ATTEMPTS {
        let pos = scatter(rng, TREE_SPAWN_INNER, TREE_SPAWN_OUTER);
        if horizontal_distance_sq(pos, player_pos) < player_min_sq {
            continue;
        }
        if registry
            .iter()
            .any(|o| horizontal_distance_sq(pos, o.pos) < obstacle_min_sq)
        {
            continue;
        }
        return Some(registry.add(ObstacleKind::Tree, pos));
    }

    log::debug!(
        "respawn search gave up after {} attempts",
        RESPAWN_MAX_ATTEMPTS
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizontal_length;
    use rand::SeedableRng;

    #[test]
    fn scatter_stays_near_the_annulus() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            let pos = scatter(&mut rng, TREE_SPAWN_INNER, TREE_SPAWN_OUTER);
            assert_eq!(pos.y, 0.0);
            // Jitter is per-axis, so the radial bound widens by sqrt(2) * jitter
            let slack = SPAWN_JITTER * std::f32::consts::SQRT_2;
            let r = horizontal_length(pos);
            assert!(r <= TREE_SPAWN_OUTER + slack, "radius {r} out of range");
        }
    }

    #[test]
    fn respawn_honors_both_distance_constraints() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut registry = ObstacleRegistry::default();
        populate(&mut registry, &mut rng, GameMode::Harvest);

        let player = Vec3::new(10.0, GROUND_HEIGHT, 0.0);
        let before = registry.len();
        let id = respawn(&mut registry, &mut rng, player).expect("open world should respawn");
        assert_eq!(registry.len(), before + 1);

        let spawned = registry.iter().find(|o| o.id == id).unwrap().pos;
        assert!(
            horizontal_distance_sq(spawned, player)
                >= RESPAWN_MIN_PLAYER_DIST * RESPAWN_MIN_PLAYER_DIST
        );
        for other in registry.iter().filter(|o| o.id != id) {
            assert!(
                horizontal_distance_sq(spawned, other.pos)
                    >= RESPAWN_MIN_OBSTACLE_DIST * RESPAWN_MIN_OBSTACLE_DIST
            );
        }
    }

    #[test]
    fn respawn_gives_up_when_nothing_fits() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut registry = ObstacleRegistry::default();

        // Grid dense enough that no point is 2.2 away from every obstacle
        let extent = (WORLD_RADIUS + SPAWN_JITTER + 2.0) as i32;
        let mut x = -extent;
        while x <= extent {
            let mut z = -extent;
            while z <= extent {
                registry.add(ObstacleKind::Tree, Vec3::new(x as f32, 0.0, z as f32));
                z += 2;
            }
            x += 2;
        }

        let before = registry.len();
        let result = respawn(&mut registry, &mut rng, Vec3::ZERO);
        assert!(result.is_none());
        assert_eq!(registry.len(), before);
    }
}
