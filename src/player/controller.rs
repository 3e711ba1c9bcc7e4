use glam::{Vec2, Vec3};

use super::input::{InputIntent, LookOrientation};
use super::state::PlayerState;
use crate::config::GameplayConfig;

/// What the renderer needs after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub camera_position: Vec3,
    /// Model origin, a fixed distance below the camera.
    pub model_position: Vec3,
    pub model_yaw: f32,
    pub velocity: Vec3,
    pub grounded: bool,
}

/// Explicit-Euler player integrator over a flat ground plane.
///
/// The step is unstable for large `dt`; callers clamp frame stalls before
/// calling [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct PlayerController {
    state: PlayerState,
    config: GameplayConfig,
}

impl PlayerController {
    pub fn new(config: GameplayConfig) -> Self {
        Self {
            state: PlayerState::at(config.spawn_position),
            config,
        }
    }

    pub fn with_state(config: GameplayConfig, state: PlayerState) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    pub fn camera_position(&self) -> Vec3 {
        self.state.position
    }

    pub fn update(&mut self, intent: &InputIntent, dt: f32) -> PlayerPose {
        let cfg = &self.config;
        let state = &mut self.state;

        let direction = movement_direction(intent.move_axes);

        // Frame-rate dependent decay, kept exactly as v -= v * k * dt
        state.velocity.x -= state.velocity.x * cfg.damping * dt;
        state.velocity.z -= state.velocity.z * cfg.damping * dt;

        state.velocity.x += direction.x * cfg.move_speed * dt;
        state.velocity.z += direction.z * cfg.move_speed * dt;

        state.velocity.y -= cfg.gravity * dt;

        // Checked against the height reached by the previous tick
        if state.position.y <= cfg.ground_height {
            state.velocity.y = 0.0;
            state.position.y = cfg.ground_height;
            state.grounded = true;
        }

        if state.grounded && intent.jump_requested {
            state.velocity.y = cfg.jump_velocity;
            state.grounded = false;
        }

        state.position += state.velocity * dt;

        // The next tick zeroes the velocity; only keep the pose above ground
        if state.position.y < cfg.ground_height {
            state.position.y = cfg.ground_height;
        }

        self.pose(intent.look)
    }

    pub fn pose(&self, look: LookOrientation) -> PlayerPose {
        let camera_position = self.state.position;
        PlayerPose {
            camera_position,
            model_position: camera_position - Vec3::new(0.0, self.config.model_height_offset, 0.0),
            model_yaw: look.yaw,
            velocity: self.state.velocity,
            grounded: self.state.grounded,
        }
    }
}

/// World-space unit direction for the given axes; zero stays zero.
fn movement_direction(axes: Vec2) -> Vec3 {
    Vec3::new(axes.x, 0.0, axes.y).normalize_or_zero()
}
