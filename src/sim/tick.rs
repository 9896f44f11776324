//! Per-frame tick driver
//!
//! Runs the fixed pipeline: input -> camera vectors -> kinematics ->
//! collision resolution -> (Harvest) felling + removal animations -> status.

use super::collision::{self, ResolverPolicy};
use super::kinematics;
use super::state::{Controls, GameMode, Removal, Status, WorldState};
use super::world;
use crate::consts::REMOVAL_DURATION_MS;

/// Input state for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement flags, held across frames
    pub controls: Controls,
    /// Edge-triggered jump request; the shell clears it after each frame
    pub jump: bool,
}

/// Advance the world by one frame. `dt` is the raw frame time in seconds;
/// physics clamps it to MAX_DT internally, while removal animations consume
/// the unclamped wall-clock time.
pub fn tick(state: &mut WorldState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Jump is an input edge, applied before integration
    if input.jump && kinematics::try_jump(&mut state.player) {
        state.status = Status::Jumping;
    }

    // Movement status; while airborne and idle the jump status persists
    if input.controls.any() {
        state.status = Status::Walking;
    } else if state.player.can_jump {
        state.status = Status::Idle;
    }

    let forward = state.camera.forward_flat();
    let right = state.camera.right();
    let proposed = kinematics::step(&mut state.player, &input.controls, forward, right, dt);

    let policy = match state.mode {
        GameMode::Explore => ResolverPolicy::Block,
        GameMode::Harvest => ResolverPolicy::Passthrough,
    };
    let resolution = collision::resolve(
        proposed,
        state.player.pos,
        &mut state.player.vel,
        &state.registry,
        state.player.radius,
        policy,
    );
    state.player.pos = resolution.pos;
    if resolution.grounded {
        state.player.can_jump = true;
    }
    if resolution.blocked {
        state.status = Status::Collided;
    }

    // Harvest: felling runs against the post-resolution position, with its
    // own fixed-distance predicate
    if state.mode == GameMode::Harvest {
        if let Some(id) = state.registry.felling_candidate(state.player.pos) {
            if let Some(tree) = state.registry.get_mut(id) {
                tree.removing = true;
            }
            state.removals.push(Removal { id, elapsed_ms: 0.0 });
            state.status = Status::TreeFelled;
            log::debug!("tree {id} felled, removal animation started");
        }
    }

    advance_removals(state, f64::from(dt) * 1000.0);
}

/// Advance shrink animations by wall-clock frame time; excise completed ones
/// and run the constrained respawn. Excision happens here, outside any
/// iteration the resolver does over the registry.
fn advance_removals(state: &mut WorldState, frame_ms: f64) {
    let mut completed = Vec::new();
    for removal in &mut state.removals {
        removal.elapsed_ms += frame_ms;
        let t = (removal.elapsed_ms / REMOVAL_DURATION_MS).min(1.0) as f32;
        if let Some(obstacle) = state.registry.get_mut(removal.id) {
            obstacle.scale = 1.0 - t;
        }
        if removal.elapsed_ms >= REMOVAL_DURATION_MS {
            completed.push(removal.id);
        }
    }
    state.removals.retain(|r| r.elapsed_ms < REMOVAL_DURATION_MS);

    for id in completed {
        state.registry.remove(id);
        world::respawn(&mut state.registry, &mut state.rng, state.player.pos);
    }
}
