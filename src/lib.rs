pub mod config;
pub mod engine;
pub mod player;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::{BuildConfig, EngineConfig, GameplayConfig};
pub use engine::{ChannelSink, Engine, EngineStats, FrameSink, FrameUpdate, SharedEngine, SinkMessage};
pub use player::{InputIntent, InputState, LookOrientation, PlayerController, PlayerPose, PlayerState};
pub use utils::error::{EngineError, Result};
pub use utils::math::{Ray, AABB};
pub use world::{Block, BlockEvent, BlockId, BlockWorld, DestroyResult, SpatialIndex, ToggleResult};
