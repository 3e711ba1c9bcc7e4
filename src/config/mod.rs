pub mod build;
pub mod core;
pub mod gameplay;

pub use build::BuildConfig;
pub use self::core::EngineConfig;
pub use gameplay::GameplayConfig;
