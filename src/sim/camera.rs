//! Camera orientation from pointer/touch drags
//!
//! Yaw-then-pitch (intrinsic Y then X). Yaw is unbounded and wraps
//! implicitly; pitch is clamped just short of straight up/down every update.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::consts::{LOOK_SENSITIVITY, PITCH_MARGIN};

/// Drag-driven first-person camera orientation
#[derive(Debug, Clone, Default)]
pub struct CameraRig {
    pub yaw: f32,
    pub pitch: f32,
    dragging: bool,
    last: Vec2,
}

impl CameraRig {
    pub fn drag_start(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.last = Vec2::new(x, y);
    }

    /// Apply pointer deltas since the previous move event
    pub fn drag_move(&mut self, x: f32, y: f32) {
        if !self.dragging {
            return;
        }
        let dx = x - self.last.x;
        let dy = y - self.last.y;
        self.last = Vec2::new(x, y);

        self.yaw -= dx * LOOK_SENSITIVITY;
        self.pitch -= dy * LOOK_SENSITIVITY;
        self.pitch = clamp_pitch(self.pitch);
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
    }

    /// Full 3D look direction (unit vector)
    pub fn look_dir(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(-cp * sy, sp, -cp * cy)
    }

    /// Ground-plane forward: look direction with the vertical component
    /// discarded and renormalized
    pub fn forward_flat(&self) -> Vec3 {
        let look = self.look_dir();
        Vec3::new(look.x, 0.0, look.z).normalize_or_zero()
    }

    /// Horizontal vector orthogonal to forward: cross(world up, forward)
    pub fn right(&self) -> Vec3 {
        Vec3::Y.cross(self.forward_flat()).normalize_or_zero()
    }

    /// Orientation quaternion for the renderer
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Clamp pitch to (-PI/2 + margin, PI/2 - margin)
#[inline]
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2 + PITCH_MARGIN, FRAC_PI_2 - PITCH_MARGIN)
}
