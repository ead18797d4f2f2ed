//! Library entry for integration tests & external tooling.
//! Exposes plugin modules and a prelude for common types.

pub mod plugins {
    pub mod core_sim;
    pub mod config;
    pub mod scheduler;
    pub mod session;
    pub mod round;
    pub mod target;
    pub mod shooting;
    pub mod autoplay;
    pub mod scene;
    pub mod hud;
    pub mod game_audio;
}
pub mod prelude;
