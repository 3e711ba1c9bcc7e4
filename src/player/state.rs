use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kinematic player state. `position` is the camera (eye) position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl PlayerState {
    /// At rest at `position`. Not grounded until the first tick clamps it.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
