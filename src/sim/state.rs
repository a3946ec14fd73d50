//! Game state and core simulation types
//!
//! Everything the renderer reads and the engine mutates lives here.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `direction`
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether this cell lies on the playfield
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }
}

/// Snake heading. Y grows downward, matching canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell delta (dx, dy) for one step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True if `other` is the exact reverse of this heading
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }
}

/// Discrete outputs of a state transition, for the notification sink.
///
/// Delivery is the caller's concern; dropping an event never affects state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    FoodEaten { score: u32 },
    NewHighScore { score: u32 },
    GameOver { score: u32 },
}

/// Complete game state (serializable, renderer-facing)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Body segments, head at index 0
    pub snake: Vec<Position>,
    /// Current food cell, never on the snake at placement time
    pub food: Position,
    /// Heading applied at the next tick
    pub direction: Direction,
    /// Whether ticks advance the simulation
    pub running: bool,
    /// Terminal flag, set by wall or self collision
    pub over: bool,
    /// Current run score
    pub score: u32,
    /// Best score ever observed, survives resets
    pub high_score: u32,
}

impl GameState {
    /// Fresh idle state. `high_score` is carried in by the caller since it
    /// outlives individual runs.
    pub fn new(high_score: u32) -> Self {
        Self {
            snake: vec![Position::new(SNAKE_START.0, SNAKE_START.1)],
            food: Position::new(FOOD_START.0, FOOD_START.1),
            direction: Direction::Right,
            running: false,
            over: false,
            score: 0,
            high_score,
        }
    }

    /// Head cell (the snake is never empty)
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    /// Whether a cell is covered by any snake segment
    pub fn occupied(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }
}
