pub mod error;
pub mod math;

pub use error::{EngineError, Result};
pub use math::{Ray, AABB};
