//! Player velocity integration
//!
//! Horizontal velocity is exponentially smoothed toward the target with a
//! fixed per-tick factor. The smoothing is tick-rate-dependent on purpose;
//! do not normalize it by dt.

use glam::Vec3;

use super::state::{Controls, Player};
use crate::consts::{GRAVITY, JUMP_SPEED, MAX_DT, MOVE_SMOOTHING};
use crate::lerp;

/// Effective simulation step: raw frame time bounded to MAX_DT
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    dt.min(MAX_DT)
}

/// Integrate one tick of intent, smoothing, and gravity.
/// Returns the proposed position; the caller resolves collisions.
pub fn step(player: &mut Player, controls: &Controls, forward: Vec3, right: Vec3, dt: f32) -> Vec3 {
    let dt = clamp_dt(dt);

    let mut dir = Vec3::ZERO;
    if controls.forward {
        dir += forward;
    }
    if controls.back {
        dir -= forward;
    }
    if controls.left {
        dir -= right;
    }
    if controls.right {
        dir += right;
    }

    let target = if dir.length_squared() > 0.0 {
        dir.normalize() * player.speed
    } else {
        Vec3::ZERO
    };

    player.vel.x = lerp(player.vel.x, target.x, MOVE_SMOOTHING);
    player.vel.z = lerp(player.vel.z, target.z, MOVE_SMOOTHING);
    player.vel.y -= GRAVITY * dt;

    player.pos + player.vel * dt
}

/// Accept a jump request if grounded. Returns whether it was accepted.
pub fn try_jump(player: &mut Player) -> bool {
    if player.can_jump {
        player.vel.y = JUMP_SPEED;
        player.can_jump = false;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn held_forward() -> Controls {
        Controls {
            forward: true,
            ..Controls::default()
        }
    }

    #[test]
    fn oversized_dt_is_clamped() {
        let mut a = Player::default();
        let mut b = Player::default();
        let fwd = Vec3::NEG_Z;
        let right = Vec3::NEG_X;

        let pa = step(&mut a, &held_forward(), fwd, right, 1.0);
        let pb = step(&mut b, &held_forward(), fwd, right, MAX_DT);
        assert_eq!(pa, pb);
        assert_eq!(a.vel, b.vel);
    }

    #[test]
    fn smoothing_moves_toward_target_speed() {
        let mut player = Player::default();
        let fwd = Vec3::NEG_Z;
        step(&mut player, &held_forward(), fwd, Vec3::NEG_X, 0.016);

        // First tick: 12% of the way toward speed along -Z
        assert!((player.vel.z - (-player.speed * MOVE_SMOOTHING)).abs() < 1e-5);
        assert_eq!(player.vel.x, 0.0);

        // Converges toward the target but never overshoots
        for _ in 0..500 {
            step(&mut player, &held_forward(), fwd, Vec3::NEG_X, 0.016);
            assert!(player.vel.z >= -player.speed - 1e-4);
        }
        assert!((player.vel.z - (-player.speed)).abs() < 0.01);
    }

    #[test]
    fn smoothing_factor_ignores_dt() {
        let mut a = Player::default();
        let mut b = Player::default();
        let fwd = Vec3::NEG_Z;
        step(&mut a, &held_forward(), fwd, Vec3::NEG_X, 0.001);
        step(&mut b, &held_forward(), fwd, Vec3::NEG_X, 0.05);
        // Same horizontal velocity after one tick regardless of dt
        assert_eq!(a.vel.x, b.vel.x);
        assert_eq!(a.vel.z, b.vel.z);
    }

    #[test]
    fn idle_velocity_decays_toward_zero() {
        let mut player = Player::default();
        player.vel = Vec3::new(4.0, 0.0, -4.0);
        step(&mut player, &Controls::default(), Vec3::NEG_Z, Vec3::NEG_X, 0.016);
        assert!((player.vel.x - 4.0 * (1.0 - MOVE_SMOOTHING)).abs() < 1e-5);
        assert!((player.vel.z + 4.0 * (1.0 - MOVE_SMOOTHING)).abs() < 1e-5);
    }

    #[test]
    fn gravity_accumulates_per_tick() {
        let mut player = Player::default();
        step(&mut player, &Controls::default(), Vec3::NEG_Z, Vec3::NEG_X, 0.02);
        assert!((player.vel.y - (-GRAVITY * 0.02)).abs() < 1e-5);
    }

    #[test]
    fn diagonal_intent_is_normalized() {
        let mut player = Player::default();
        let controls = Controls {
            forward: true,
            right: true,
            ..Controls::default()
        };
        for _ in 0..1000 {
            step(&mut player, &controls, Vec3::NEG_Z, Vec3::NEG_X, 0.016);
        }
        let horizontal = (player.vel.x * player.vel.x + player.vel.z * player.vel.z).sqrt();
        assert!((horizontal - player.speed).abs() < 0.01);
    }

    #[test]
    fn jump_only_when_grounded() {
        let mut player = Player::default();
        assert!(try_jump(&mut player));
        assert_eq!(player.vel.y, JUMP_SPEED);
        assert!(!player.can_jump);

        // Second request while airborne is a no-op
        player.vel.y = 3.0;
        assert!(!try_jump(&mut player));
        assert_eq!(player.vel.y, 3.0);
    }

    proptest! {
        #[test]
        fn effective_dt_is_min_of_dt_and_cap(dt in 0.0f32..10.0) {
            prop_assert_eq!(clamp_dt(dt), dt.min(MAX_DT));
        }

        #[test]
        fn position_advances_by_velocity_times_clamped_dt(dt in 0.0f32..1.0, vy in -20.0f32..20.0) {
            let mut player = Player::default();
            player.vel = Vec3::new(1.0, vy, -2.0);
            let before = player.pos;
            let vel_before = player.vel;

            let proposed = step(&mut player, &Controls::default(), Vec3::NEG_Z, Vec3::NEG_X, dt);
            let eff = dt.min(MAX_DT);
            let expected = before
                + Vec3::new(
                    vel_before.x * (1.0 - MOVE_SMOOTHING),
                    vel_before.y - GRAVITY * eff,
                    vel_before.z * (1.0 - MOVE_SMOOTHING),
                ) * eff;
            prop_assert!((proposed - expected).length() < 1e-4);
        }
    }
}
