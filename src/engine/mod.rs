//! Tick orchestration: owns the player and the block world and advances
//! them once per external frame.

pub mod sink;

pub use sink::{ChannelSink, FrameSink, FrameUpdate, SinkMessage};

use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::config::EngineConfig;
use crate::player::{InputState, LookOrientation, PlayerController, PlayerPose};
use crate::utils::error::Result;
use crate::utils::math::Ray;
use crate::world::{BlockEvent, BlockWorld, DestroyResult, ToggleResult};

/// Engine behind a mutex, for hosts that feed input and ticks from more than
/// one thread. Every operation serializes on the lock.
pub type SharedEngine = Arc<Mutex<Engine>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub frame_count: u64,
    pub block_count: usize,
    pub pointer_locked: bool,
}

pub struct Engine {
    config: EngineConfig,
    player: PlayerController,
    world: BlockWorld,
    input: InputState,
    look: LookOrientation,
    pointer_locked: bool,
    frame_counter: u64,
    sink: Option<Box<dyn FrameSink>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let player = PlayerController::new(config.gameplay.clone());
        let world = BlockWorld::new(&config.build);
        info!(
            "Engine ready: spawn {:?}, {} initial block(s)",
            player.camera_position(),
            world.len()
        );

        Ok(Self {
            config,
            player,
            world,
            input: InputState::default(),
            look: LookOrientation::default(),
            pointer_locked: false,
            frame_counter: 0,
            sink: None,
        })
    }

    pub fn with_frame_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn world(&self) -> &BlockWorld {
        &self.world
    }

    pub fn look(&self) -> LookOrientation {
        self.look
    }

    pub fn set_look(&mut self, look: LookOrientation) {
        self.look = LookOrientation::new(look.yaw, look.pitch);
    }

    pub fn is_pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Losing the lock releases every held key.
    pub fn set_pointer_locked(&mut self, locked: bool) {
        if self.pointer_locked && !locked {
            self.input.clear();
        }
        self.pointer_locked = locked;
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if self.pointer_locked {
            self.input.handle_key(key, pressed);
        }
    }

    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        if self.pointer_locked {
            self.look
                .apply_mouse_delta(delta, self.config.gameplay.mouse_sensitivity);
        }
    }

    /// Left fires, right toggles a block. Ignored while unlocked and on
    /// release.
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) -> Option<BlockEvent> {
        if !self.pointer_locked || !pressed {
            return None;
        }

        let result = match button {
            MouseButton::Left => self.fire().map(DestroyResult::event),
            MouseButton::Right => self
                .toggle_block()
                .map(|result| Some(BlockEvent::from(result))),
            _ => return None,
        };

        match result {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring {:?} click: {}", button, e);
                None
            }
        }
    }

    /// Ray from the camera along the current look direction.
    pub fn aim_ray(&self) -> Result<Ray> {
        Ray::new(self.player.camera_position(), self.look.forward())
    }

    pub fn fire(&mut self) -> Result<DestroyResult> {
        let ray = self.aim_ray()?;
        let result = self.world.raycast_destroy(&ray);
        if let Some(event) = result.event() {
            self.notify(&event);
        }
        Ok(result)
    }

    pub fn toggle_block(&mut self) -> Result<ToggleResult> {
        let ray = self.aim_ray()?;
        let result = self.world.raycast_toggle(&ray);
        self.notify(&BlockEvent::from(result));
        Ok(result)
    }

    fn notify(&mut self, event: &BlockEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.block_changed(event);
        }
    }

    /// Advances one frame. Returns the new pose when the player was
    /// simulated, which only happens while the pointer is locked.
    pub fn tick(&mut self, dt: f32) -> Option<PlayerPose> {
        let dt = sanitize_dt(dt, self.config.gameplay.max_frame_dt);
        self.frame_counter += 1;

        let simulated = if self.pointer_locked {
            let intent = self.input.snapshot(self.look);
            Some(self.player.update(&intent, dt))
        } else {
            None
        };

        let pose = simulated.unwrap_or_else(|| self.player.pose(self.look));
        if let Some(sink) = self.sink.as_mut() {
            sink.advance(&FrameUpdate {
                frame: self.frame_counter,
                dt,
                pose,
                simulated: simulated.is_some(),
            });
        }

        simulated
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            frame_count: self.frame_counter,
            block_count: self.world.len(),
            pointer_locked: self.pointer_locked,
        }
    }
}

/// Negative or non-finite steps become zero; frame stalls are capped.
fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        0.0
    } else {
        dt.min(max_dt)
    }
}
