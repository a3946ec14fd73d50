//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed discrete ticks only, no notion of wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the storage seam

pub mod engine;
pub mod state;

pub use engine::Engine;
pub use state::{Direction, GameEvent, GameState, Position};
