//! Input normalization
//!
//! Keyboard keys, swipe gestures and on-screen buttons all reduce to the
//! same two commands before they reach the engine. The functions here are
//! pure so the mapping contract is testable without a browser.

use crate::consts::SWIPE_THRESHOLD;
use crate::sim::Direction;

/// A normalized input command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request a new heading
    Turn(Direction),
    /// Spacebar contract: start a new run if the game is over, otherwise
    /// toggle pause
    StartOrPause,
}

/// Map a DOM `KeyboardEvent.key` value to a command. Arrow keys and WASD
/// steer; space starts/pauses. Anything else is ignored.
pub fn map_key(key: &str) -> Option<Command> {
    match key {
        "ArrowUp" | "w" | "W" => Some(Command::Turn(Direction::Up)),
        "ArrowDown" | "s" | "S" => Some(Command::Turn(Direction::Down)),
        "ArrowLeft" | "a" | "A" => Some(Command::Turn(Direction::Left)),
        "ArrowRight" | "d" | "D" => Some(Command::Turn(Direction::Right)),
        " " => Some(Command::StartOrPause),
        _ => None,
    }
}

/// Resolve a touch-start/touch-end pair into a direction. Gestures shorter
/// than the threshold on both axes are ignored; otherwise the axis with the
/// larger absolute delta wins (ties go horizontal).
pub fn swipe_direction(start: (f32, f32), end: (f32, f32)) -> Option<Direction> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;

    if dx.abs() < SWIPE_THRESHOLD && dy.abs() < SWIPE_THRESHOLD {
        return None;
    }

    if dx.abs() >= dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key("ArrowUp"), Some(Command::Turn(Direction::Up)));
        assert_eq!(map_key("ArrowDown"), Some(Command::Turn(Direction::Down)));
        assert_eq!(map_key("ArrowLeft"), Some(Command::Turn(Direction::Left)));
        assert_eq!(map_key("ArrowRight"), Some(Command::Turn(Direction::Right)));
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(map_key("w"), Some(Command::Turn(Direction::Up)));
        assert_eq!(map_key("a"), Some(Command::Turn(Direction::Left)));
        assert_eq!(map_key("s"), Some(Command::Turn(Direction::Down)));
        assert_eq!(map_key("d"), Some(Command::Turn(Direction::Right)));
        // Shifted variants too
        assert_eq!(map_key("W"), Some(Command::Turn(Direction::Up)));
    }

    #[test]
    fn test_spacebar() {
        assert_eq!(map_key(" "), Some(Command::StartOrPause));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(map_key("x"), None);
        assert_eq!(map_key("Escape"), None);
    }

    #[test]
    fn test_swipe_below_threshold_ignored() {
        assert_eq!(swipe_direction((100.0, 100.0), (120.0, 115.0)), None);
        assert_eq!(swipe_direction((100.0, 100.0), (100.0, 100.0)), None);
    }

    #[test]
    fn test_swipe_dominant_axis_wins() {
        assert_eq!(
            swipe_direction((100.0, 100.0), (180.0, 120.0)),
            Some(Direction::Right)
        );
        assert_eq!(
            swipe_direction((100.0, 100.0), (20.0, 120.0)),
            Some(Direction::Left)
        );
        assert_eq!(
            swipe_direction((100.0, 100.0), (110.0, 180.0)),
            Some(Direction::Down)
        );
        assert_eq!(
            swipe_direction((100.0, 100.0), (110.0, 20.0)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_swipe_one_axis_over_threshold_is_enough() {
        // dx under threshold but dy well over
        assert_eq!(
            swipe_direction((0.0, 0.0), (10.0, 50.0)),
            Some(Direction::Down)
        );
    }
}
