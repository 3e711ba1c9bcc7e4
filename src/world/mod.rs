pub mod block;
pub mod block_world;
pub mod spatial;

// Re-export commonly used types
pub use block::{Block, BlockId};
pub use block_world::{BlockEvent, BlockWorld, DestroyResult, RaycastHit, ToggleResult};
pub use spatial::SpatialIndex;
