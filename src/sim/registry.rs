//! Obstacle registry: ordered collection plus the two collision predicates
//!
//! Two independent predicates coexist on purpose:
//! - `blocking_hit` decides whether horizontal movement is rejected
//!   (radius-sum, ground-plane distance, strict inequality)
//! - `felling_candidate` decides whether a tree is removed in Harvest mode
//!   (fixed 1.4-unit threshold, full 3D distance)

use glam::Vec3;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::FELL_DISTANCE;
use crate::horizontal_distance_sq;

/// Ordered obstacle collection with stable u32 ids
#[derive(Debug, Clone, Default)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleRegistry {
    /// Insert a new obstacle, returning its id
    pub fn add(&mut self, kind: ObstacleKind, pos: Vec3) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(id, kind, pos));
        id
    }

    /// Remove by id. Safe outside any iteration over the registry.
    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.remove(idx))
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Obstacle> {
        self.obstacles.iter_mut().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// First non-removing obstacle whose ground-plane distance to `point` is
    /// strictly inside the summed radii. Iteration order decides ties.
    pub fn blocking_hit(&self, point: Vec3, player_radius: f32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| {
            if o.removing {
                return false;
            }
            let r = player_radius + o.kind.collision_radius();
            horizontal_distance_sq(point, o.pos) < r * r
        })
    }

    /// First non-removing tree within the fixed felling distance (full 3D)
    pub fn felling_candidate(&self, point: Vec3) -> Option<u32> {
        self.obstacles
            .iter()
            .find(|o| {
                !o.removing
                    && o.kind == ObstacleKind::Tree
                    && point.distance_squared(o.pos) < FELL_DISTANCE * FELL_DISTANCE
            })
            .map(|o| o.id)
    }
}
