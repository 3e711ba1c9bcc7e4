use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Player movement tuning. Units are world units and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub move_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub ground_height: f32,
    /// Horizontal velocity decay rate, applied as `v -= v * damping * dt`.
    pub damping: f32,
    pub spawn_position: Vec3,
    /// Distance from the camera down to the player model's origin.
    pub model_height_offset: f32,
    /// Upper bound on a single tick's elapsed time.
    pub max_frame_dt: f32,
    pub mouse_sensitivity: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            gravity: 30.0,
            jump_velocity: 15.0,
            ground_height: 2.0,
            damping: 10.0,
            spawn_position: Vec3::new(0.0, 2.0, 10.0),
            model_height_offset: 2.0,
            max_frame_dt: 0.1,
            mouse_sensitivity: 0.002,
        }
    }
}
