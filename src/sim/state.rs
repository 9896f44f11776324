//! World state and core simulation types

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::CameraRig;
use super::registry::ObstacleRegistry;
use super::world;
use crate::consts::*;

/// Which variant of the world is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Trees and houses, obstacles only block movement
    #[default]
    Explore,
    /// Trees only; walking into one fells it and a replacement respawns
    Harvest,
}

/// Obstacle kinds and their movement-blocking radii
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Tree,
    House,
}

impl ObstacleKind {
    #[inline]
    pub fn collision_radius(&self) -> f32 {
        match self {
            ObstacleKind::Tree => TREE_RADIUS,
            ObstacleKind::House => HOUSE_RADIUS,
        }
    }
}

/// A static world object that blocks (or in Harvest mode, triggers on) the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Anchored at ground level (y = 0)
    pub pos: Vec3,
    /// Excluded from collision queries while the removal animation runs
    pub removing: bool,
    /// Render scale, interpolates 1 -> 0 during removal
    pub scale: f32,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, pos: Vec3) -> Self {
        Self {
            id,
            kind,
            pos,
            removing: false,
            scale: 1.0,
        }
    }
}

/// The player's sphere collider
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub vel: Vec3,
    pub speed: f32,
    pub radius: f32,
    pub can_jump: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, GROUND_HEIGHT, 0.0),
            vel: Vec3::ZERO,
            speed: PLAYER_SPEED,
            radius: PLAYER_RADIUS,
            can_jump: true,
        }
    }
}

/// Movement flags written by the input collaborator, read-only to the tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// True if any movement key is held
    #[inline]
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Release everything (global pointerup safety net)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

/// Human-readable status shown by the presentation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Welcome,
    Walking,
    Idle,
    Jumping,
    Collided,
    TreeFelled,
}

impl Status {
    /// Display string (pt-BR, matching the shipped UI)
    pub fn message(&self) -> &'static str {
        match self {
            Status::Welcome => "Bem-vindo!",
            Status::Walking => "Andando...",
            Status::Idle => "Parado",
            Status::Jumping => "Pulando!",
            Status::Collided => "Colidiu com obstáculo",
            Status::TreeFelled => "Árvore colidida e removida!",
        }
    }
}

/// An in-flight shrink-and-remove animation, keyed by obstacle id
#[derive(Debug, Clone)]
pub struct Removal {
    pub id: u32,
    pub elapsed_ms: f64,
}

/// Complete world state, owned by the tick driver
#[derive(Debug, Clone)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG (world generation and respawn draws)
    pub rng: Pcg32,
    pub mode: GameMode,
    pub player: Player,
    pub camera: CameraRig,
    pub registry: ObstacleRegistry,
    pub status: Status,
    /// Active removal animations (Harvest mode)
    pub removals: Vec<Removal>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl WorldState {
    /// Create a populated world from a seed
    pub fn new(seed: u64, mode: GameMode) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut registry = ObstacleRegistry::default();
        world::populate(&mut registry, &mut rng, mode);

        Self {
            seed,
            rng,
            mode,
            player: Player::default(),
            camera: CameraRig::default(),
            registry,
            status: Status::Welcome,
            removals: Vec::new(),
            time_ticks: 0,
        }
    }

    /// Camera eye position for the current player position
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.player.pos + Vec3::new(0.0, EYE_HEIGHT, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explore_world_spawns_trees_and_houses() {
        let state = WorldState::new(7, GameMode::Explore);
        let trees = state
            .registry
            .iter()
            .filter(|o| o.kind == ObstacleKind::Tree)
            .count();
        let houses = state
            .registry
            .iter()
            .filter(|o| o.kind == ObstacleKind::House)
            .count();
        assert_eq!(trees, TREE_COUNT);
        assert_eq!(houses, HOUSE_COUNT);
    }

    #[test]
    fn harvest_world_spawns_trees_only() {
        let state = WorldState::new(7, GameMode::Harvest);
        assert_eq!(state.registry.len(), TREE_COUNT);
        assert!(
            state
                .registry
                .iter()
                .all(|o| o.kind == ObstacleKind::Tree)
        );
    }

    #[test]
    fn same_seed_same_world() {
        let a = WorldState::new(42, GameMode::Explore);
        let b = WorldState::new(42, GameMode::Explore);
        for (oa, ob) in a.registry.iter().zip(b.registry.iter()) {
            assert_eq!(oa.pos, ob.pos);
            assert_eq!(oa.kind, ob.kind);
        }
    }

    #[test]
    fn player_starts_grounded_at_origin() {
        let p = Player::default();
        assert_eq!(p.pos, Vec3::new(0.0, GROUND_HEIGHT, 0.0));
        assert_eq!(p.vel, Vec3::ZERO);
        assert!(p.can_jump);
    }
}
