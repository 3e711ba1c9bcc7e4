pub mod controller;
pub mod input;
pub mod state;

pub use controller::{PlayerController, PlayerPose};
pub use input::{InputIntent, InputState, LookOrientation};
pub use state::PlayerState;
