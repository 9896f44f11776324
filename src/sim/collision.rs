//! Collision resolution: ground clamp, world boundary, obstacle blocking
//!
//! Checks run in sequence; later checks act on the output of earlier ones.

use glam::Vec3;

use super::registry::ObstacleRegistry;
use crate::consts::{BOUNDARY_DAMPING, BOUNDARY_MARGIN, GROUND_HEIGHT, WORLD_RADIUS};
use crate::horizontal_length;

/// How the resolver treats obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverPolicy {
    /// Obstacles reject horizontal motion (Explore mode)
    Block,
    /// Trees are consumed on contact instead of being solid (Harvest mode);
    /// the felling check runs in the tick driver
    Passthrough,
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Copy)]
pub struct Resolution {
    pub pos: Vec3,
    /// Ground clamp fired: vertical velocity zeroed, jump re-enabled
    pub grounded: bool,
    /// World-boundary clamp fired
    pub bounded: bool,
    /// Obstacle collision rejected horizontal motion
    pub blocked: bool,
}

/// Resolve a proposed position against ground, boundary, and obstacles.
/// Adjusts `vel` in place.
pub fn resolve(
    proposed: Vec3,
    current: Vec3,
    vel: &mut Vec3,
    registry: &ObstacleRegistry,
    player_radius: f32,
    policy: ResolverPolicy,
) -> Resolution {
    let mut pos = proposed;

    // 1. Ground clamp
    let mut grounded = false;
    if pos.y < GROUND_HEIGHT {
        pos.y = GROUND_HEIGHT;
        vel.y = 0.0;
        grounded = true;
    }

    // 2. World-boundary clamp: rescale to exactly the limit radius, damp
    let mut bounded = false;
    let limit = WORLD_RADIUS - BOUNDARY_MARGIN;
    let horiz = horizontal_length(pos);
    if horiz > limit {
        let scale = limit / horiz;
        pos.x *= scale;
        pos.z *= scale;
        vel.x *= BOUNDARY_DAMPING;
        vel.z *= BOUNDARY_DAMPING;
        bounded = true;
    }

    // 3. Obstacle collision: reject horizontal displacement, keep vertical
    let mut blocked = false;
    if policy == ResolverPolicy::Block && registry.blocking_hit(pos, player_radius).is_some() {
        pos.x = current.x;
        pos.z = current.z;
        vel.x = 0.0;
        vel.z = 0.0;
        blocked = true;
    }

    Resolution {
        pos,
        grounded,
        bounded,
        blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_RADIUS;
    use crate::sim::state::ObstacleKind;
    use proptest::prelude::*;

    fn empty() -> ObstacleRegistry {
        ObstacleRegistry::default()
    }

    #[test]
    fn ground_clamp_zeroes_vertical_velocity() {
        let mut vel = Vec3::new(1.0, -5.0, 0.0);
        let r = resolve(
            Vec3::new(0.0, 0.3, 0.0),
            Vec3::new(0.0, 1.5, 0.0),
            &mut vel,
            &empty(),
            PLAYER_RADIUS,
            ResolverPolicy::Block,
        );
        assert_eq!(r.pos.y, GROUND_HEIGHT);
        assert_eq!(vel.y, 0.0);
        assert!(r.grounded);
        // Horizontal velocity untouched
        assert_eq!(vel.x, 1.0);
    }

    #[test]
    fn boundary_rescales_and_damps() {
        let mut vel = Vec3::new(3.0, 0.0, 4.0);
        let proposed = Vec3::new(30.0, GROUND_HEIGHT, 40.0); // horizontal norm 50
        let r = resolve(
            proposed,
            Vec3::new(29.0, GROUND_HEIGHT, 39.0),
            &mut vel,
            &empty(),
            PLAYER_RADIUS,
            ResolverPolicy::Block,
        );
        let limit = WORLD_RADIUS - BOUNDARY_MARGIN;
        assert!((horizontal_length(r.pos) - limit).abs() < 1e-4);
        // Direction preserved by the rescale
        assert!((r.pos.x / r.pos.z - 30.0 / 40.0).abs() < 1e-5);
        assert_eq!(vel.x, 3.0 * BOUNDARY_DAMPING);
        assert_eq!(vel.z, 4.0 * BOUNDARY_DAMPING);
        assert!(r.bounded);
    }

    #[test]
    fn obstacle_rejects_horizontal_keeps_vertical() {
        // Obstacle at (2,0,0) radius 1.2, player radius 0.6
        let mut reg = ObstacleRegistry::default();
        reg.add(ObstacleKind::Tree, Vec3::new(2.0, 0.0, 0.0));

        // At origin: distance 2 > 1.8, no collision
        let mut vel = Vec3::ZERO;
        let r = resolve(
            Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            &mut vel,
            &reg,
            PLAYER_RADIUS,
            ResolverPolicy::Block,
        );
        assert!(!r.blocked);

        // Moving to x = 1.0 enters the radii sum: horizontal reverts, vy kept
        let mut vel = Vec3::new(2.0, -1.0, 0.0);
        let current = Vec3::new(0.4, GROUND_HEIGHT, 0.0);
        let r = resolve(
            Vec3::new(1.0, 0.9, 0.0),
            current,
            &mut vel,
            &reg,
            PLAYER_RADIUS,
            ResolverPolicy::Block,
        );
        assert!(r.blocked);
        assert_eq!(r.pos.x, current.x);
        assert_eq!(r.pos.z, current.z);
        assert_eq!(r.pos.y, GROUND_HEIGHT); // ground clamp result kept
        assert_eq!(vel.x, 0.0);
        assert_eq!(vel.z, 0.0);
    }

    #[test]
    fn passthrough_policy_never_blocks() {
        let mut reg = ObstacleRegistry::default();
        reg.add(ObstacleKind::Tree, Vec3::new(0.5, 0.0, 0.0));

        let mut vel = Vec3::new(1.0, 0.0, 0.0);
        let r = resolve(
            Vec3::new(0.5, GROUND_HEIGHT, 0.0),
            Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            &mut vel,
            &reg,
            PLAYER_RADIUS,
            ResolverPolicy::Passthrough,
        );
        assert!(!r.blocked);
        assert_eq!(r.pos.x, 0.5);
    }

    #[test]
    fn at_most_one_obstacle_outcome_per_tick() {
        // Two overlapping obstacles: the rejection is applied once, not combined
        let mut reg = ObstacleRegistry::default();
        reg.add(ObstacleKind::Tree, Vec3::new(1.0, 0.0, 0.0));
        reg.add(ObstacleKind::Tree, Vec3::new(1.2, 0.0, 0.2));

        let current = Vec3::new(0.0, GROUND_HEIGHT, 0.0);
        let mut vel = Vec3::new(5.0, 0.0, 5.0);
        let r = resolve(
            Vec3::new(0.8, GROUND_HEIGHT, 0.1),
            current,
            &mut vel,
            &reg,
            PLAYER_RADIUS,
            ResolverPolicy::Block,
        );
        assert!(r.blocked);
        assert_eq!(r.pos.x, current.x);
        assert_eq!(r.pos.z, current.z);
    }

    proptest! {
        #[test]
        fn ground_clamp_always_outputs_ground_height(y in -100.0f32..GROUND_HEIGHT) {
            let mut vel = Vec3::new(0.0, -10.0, 0.0);
            let r = resolve(
                Vec3::new(0.0, y, 0.0),
                Vec3::new(0.0, GROUND_HEIGHT, 0.0),
                &mut vel,
                &empty(),
                PLAYER_RADIUS,
                ResolverPolicy::Block,
            );
            prop_assert_eq!(r.pos.y, GROUND_HEIGHT);
            prop_assert_eq!(vel.y, 0.0);
            prop_assert!(r.grounded);
        }

        #[test]
        fn boundary_clamp_never_exceeds_limit(x in -200.0f32..200.0, z in -200.0f32..200.0) {
            let mut vel = Vec3::new(1.0, 0.0, 1.0);
            let r = resolve(
                Vec3::new(x, GROUND_HEIGHT, z),
                Vec3::new(0.0, GROUND_HEIGHT, 0.0),
                &mut vel,
                &empty(),
                PLAYER_RADIUS,
                ResolverPolicy::Block,
            );
            let limit = WORLD_RADIUS - BOUNDARY_MARGIN;
            prop_assert!(horizontal_length(r.pos) <= limit + 1e-3);
            if horizontal_length(Vec3::new(x, 0.0, z)) > limit {
                prop_assert!((horizontal_length(r.pos) - limit).abs() < 1e-3);
                prop_assert!(r.bounded);
            }
        }
    }
}
