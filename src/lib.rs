//! Forest Sphere - a first-person forest exploration demo
//!
//! Core modules:
//! - `sim`: Deterministic simulation (camera, kinematics, collisions, world)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Persisted preferences
//! - `ui`: On-screen control pad state

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{QualityPreset, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Maximum simulation step per frame (bounds physics on frame hitches)
    pub const MAX_DT: f32 = 0.05;

    /// World dimensions
    pub const WORLD_RADIUS: f32 = 40.0;
    /// Player is clamped to WORLD_RADIUS - BOUNDARY_MARGIN from origin
    pub const BOUNDARY_MARGIN: f32 = 1.0;
    /// Minimum player height above the ground plane
    pub const GROUND_HEIGHT: f32 = 1.2;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 0.6;
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const JUMP_SPEED: f32 = 7.0;
    pub const GRAVITY: f32 = 9.8;
    /// Horizontal velocity smoothing per tick (deliberately not dt-scaled)
    pub const MOVE_SMOOTHING: f32 = 0.12;
    /// Horizontal velocity damping applied on the tick a boundary clamp occurs
    pub const BOUNDARY_DAMPING: f32 = 0.2;
    /// Camera eye sits this far above the player center
    pub const EYE_HEIGHT: f32 = 0.9;

    /// Camera drag
    pub const LOOK_SENSITIVITY: f32 = 0.002;
    /// Pitch is clamped to [-PI/2 + PITCH_MARGIN, PI/2 - PITCH_MARGIN]
    pub const PITCH_MARGIN: f32 = 0.05;

    /// World population
    pub const TREE_COUNT: usize = 30;
    pub const HOUSE_COUNT: usize = 6;
    pub const TREE_RADIUS: f32 = 1.2;
    pub const HOUSE_RADIUS: f32 = 1.5;
    /// Trees spawn in the annulus [TREE_SPAWN_INNER, TREE_SPAWN_OUTER]
    pub const TREE_SPAWN_INNER: f32 = 6.0;
    pub const TREE_SPAWN_OUTER: f32 = WORLD_RADIUS - 2.0;
    pub const HOUSE_SPAWN_INNER: f32 = 8.0;
    pub const HOUSE_SPAWN_OUTER: f32 = WORLD_RADIUS - 4.0;
    /// Uniform positional jitter added on each horizontal axis
    pub const SPAWN_JITTER: f32 = 3.0;

    /// Harvest mode: full-3D distance below which a tree is felled
    pub const FELL_DISTANCE: f32 = 1.4;
    /// Shrink-and-remove animation duration
    pub const REMOVAL_DURATION_MS: f64 = 300.0;
    /// Respawn constraints
    pub const RESPAWN_MIN_PLAYER_DIST: f32 = 4.0;
    pub const RESPAWN_MIN_OBSTACLE_DIST: f32 = 2.2;
    pub const RESPAWN_MAX_ATTEMPTS: u32 = 50;

    /// Camera projection
    pub const CAMERA_FOV_DEG: f32 = 75.0;
    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 200.0;
}

/// Squared distance in the ground plane (y discarded)
#[inline]
pub fn horizontal_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Ground-plane norm of a 3D point
#[inline]
pub fn horizontal_length(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
