//! Flappy Bubble - a browser flappy-bird-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world state, physics, collisions, scoring)
//! - `render`: Pure scene adapter plus the canvas 2d backend
//! - `input`: Interchangeable input sources (keyboard, touch, voice)
//! - `settings`: Persisted input preference
//! - `config`: Application-level tunables

pub mod config;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use config::AppConfig;
pub use settings::{InputKind, Settings};

/// Fixed structural constants (per-world tunables live in [`sim::WorldConfig`])
pub mod consts {
    /// Player spawn point
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 10.0;

    /// Player hitbox
    pub const PLAYER_W: f32 = 50.0;
    pub const PLAYER_H: f32 = 50.0;

    /// Obstacles spawn this far past the right screen edge
    pub const SPAWN_X_MARGIN: f32 = 10.0;
    /// Gap centers stay this far from the top and bottom screen edges
    pub const GAP_EDGE_MARGIN: i32 = 10;
    /// The player counts as fallen out once this far below the bottom edge
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 200.0;
    /// Delay between game over and the automatic restart (ms)
    pub const RESTART_DELAY_MS: f64 = 3000.0;
}
