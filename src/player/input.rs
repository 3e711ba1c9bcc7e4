use glam::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;
use winit::keyboard::KeyCode;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Camera yaw (about +Y) and pitch (about +X), radians. Zero looks down -Z.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookOrientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Moving the mouse right turns right, moving it down looks down.
    pub fn apply_mouse_delta(&mut self, delta: (f64, f64), sensitivity: f32) {
        self.yaw -= delta.0 as f32 * sensitivity;
        self.pitch -= delta.1 as f32 * sensitivity;

        // Clamp pitch to prevent over-rotation
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

/// Everything the controller reads for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// x: lateral (+ is world +X), y: forward/back (+ is world +Z).
    pub move_axes: Vec2,
    pub jump_requested: bool,
    pub look: LookOrientation,
}

/// Held-key state, fed by the windowing layer between ticks.
#[derive(Debug, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    jump_latched: bool,
}

impl InputState {
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        match key {
            KeyCode::KeyW => self.forward = pressed,
            KeyCode::KeyS => self.backward = pressed,
            KeyCode::KeyA => self.left = pressed,
            KeyCode::KeyD => self.right = pressed,
            KeyCode::Space => {
                if pressed && !self.jump {
                    self.jump_latched = true;
                }
                self.jump = pressed;
            }
            _ => {}
        }
    }

    pub fn move_axes(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(
            axis(self.left, self.right),
            axis(self.forward, self.backward),
        )
    }

    /// Consistent view of the keys for one tick. A jump pressed and released
    /// between two snapshots still counts once.
    pub fn snapshot(&mut self, look: LookOrientation) -> InputIntent {
        let intent = InputIntent {
            move_axes: self.move_axes(),
            jump_requested: self.jump || self.jump_latched,
            look,
        };
        self.jump_latched = false;
        intent
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
