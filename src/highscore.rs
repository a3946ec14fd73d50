//! High score persistence
//!
//! A single numeric best score, stored as a decimal string. Read once at
//! engine startup, written whenever the run score climbs past it.

use crate::platform::KvStore;

/// Storage key for the persisted high score
pub const HIGH_SCORE_KEY: &str = "snake-high-score";

/// Load the persisted high score. An absent key or an unparsable value
/// both fall back to 0; this never fails.
pub fn load<S: KvStore>(store: &S) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(score) => {
                log::info!("Loaded high score: {}", score);
                score
            }
            Err(_) => {
                log::warn!("Stored high score {:?} is not a number, using 0", raw);
                0
            }
        },
        None => {
            log::info!("No high score found, starting fresh");
            0
        }
    }
}

/// Persist a new high score. A failed write is logged and ignored; the
/// in-memory value stays authoritative for the session.
pub fn save<S: KvStore>(store: &mut S, score: u32) {
    if store.set(HIGH_SCORE_KEY, &score.to_string()) {
        log::info!("High score saved: {}", score);
    } else {
        log::warn!("Failed to persist high score {}", score);
    }
}
