//! On-screen control pad state
//!
//! The simulation core never queries the DOM; the shell reads this struct
//! each frame and applies/removes the `active` class on the matching buttons.

use crate::sim::Controls;

/// Names of the on-screen buttons, matching their element ids (`btn-<name>`)
pub const CONTROL_NAMES: [&str; 5] = ["forward", "back", "left", "right", "jump"];

/// Pressed state per on-screen button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlPane {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl ControlPane {
    /// Set a button by name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, pressed: bool) {
        match name {
            "forward" => self.forward = pressed,
            "back" => self.back = pressed,
            "left" => self.left = pressed,
            "right" => self.right = pressed,
            "jump" => self.jump = pressed,
            _ => {}
        }
    }

    pub fn pressed(&self, name: &str) -> bool {
        match name {
            "forward" => self.forward,
            "back" => self.back,
            "left" => self.left,
            "right" => self.right,
            "jump" => self.jump,
            _ => false,
        }
    }

    /// Release every button (global pointerup safety net)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Movement flags for the simulation
    pub fn controls(&self) -> Controls {
        Controls {
            forward: self.forward,
            back: self.back,
            left: self.left,
            right: self.right,
        }
    }
}
