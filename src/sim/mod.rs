//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by obstacle id)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod kinematics;
pub mod registry;
pub mod state;
pub mod tick;
pub mod world;

pub use camera::CameraRig;
pub use collision::{Resolution, ResolverPolicy, resolve};
pub use registry::ObstacleRegistry;
pub use state::{Controls, GameMode, Obstacle, ObstacleKind, Player, Status, WorldState};
pub use tick::{TickInput, tick};
