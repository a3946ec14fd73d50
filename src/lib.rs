//! Grid Snake - a fixed-tick Snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid movement, collisions, scoring)
//! - `input`: Keyboard/swipe normalization into engine commands
//! - `platform`: Browser/native storage abstraction
//! - `highscore`: High-score persistence over the storage seam
//! - `settings`: Theme selection, persisted alongside the high score

pub mod highscore;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, Theme};
pub use sim::{Direction, Engine, GameEvent, GameState, Position};

/// Game configuration constants
pub mod consts {
    /// Grid is GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: i32 = 20;
    /// Fixed simulation tick interval in milliseconds
    pub const TICK_MS: f64 = 150.0;
    /// Points awarded per food eaten
    pub const FOOD_POINTS: u32 = 10;
    /// Snake spawn cell
    pub const SNAKE_START: (i32, i32) = (10, 10);
    /// Initial food cell
    pub const FOOD_START: (i32, i32) = (15, 15);
    /// Minimum swipe distance (canvas units) before a gesture counts
    pub const SWIPE_THRESHOLD: f32 = 30.0;
}
