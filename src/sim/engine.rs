//! Fixed-tick game engine
//!
//! Owns the game state, the seeded RNG, and the persistence seam. All
//! mutation happens inside `tick` or the explicit command handlers; the
//! caller drives ticks on a fixed external cadence and forwards the
//! returned events to whatever notification surface it has.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Direction, GameEvent, GameState, Position};
use crate::consts::*;
use crate::highscore;
use crate::platform::KvStore;

/// Rejection-sampling budget for food placement. Past this the board is
/// crowded enough that enumerating the free cells is the better deal.
const FOOD_SAMPLE_LIMIT: u32 = 64;

/// The game engine. Generic over the storage seam so tests run against an
/// in-memory store.
pub struct Engine<S: KvStore> {
    state: GameState,
    rng: Pcg32,
    store: S,
}

impl<S: KvStore> Engine<S> {
    /// Build an engine in the idle state. Reads the persisted high score
    /// once; a missing or corrupt entry falls back to 0.
    pub fn new(seed: u64, store: S) -> Self {
        let high_score = highscore::load(&store);
        Self {
            state: GameState::new(high_score),
            rng: Pcg32::seed_from_u64(seed),
            store,
        }
    }

    /// Read access for renderers. Never hand out `&mut`.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance the simulation by one step. No-op unless the game is
    /// actively running.
    ///
    /// Collision order: wall first, then self; either ends the run before
    /// food is considered, so a snake cannot die and eat on the same tick.
    pub fn tick(&mut self) -> Option<GameEvent> {
        if !self.state.running || self.state.over {
            return None;
        }

        let new_head = self.state.head().step(self.state.direction);

        if !new_head.in_bounds() {
            return Some(self.end_run());
        }
        if self.state.occupied(new_head) {
            return Some(self.end_run());
        }

        self.state.snake.insert(0, new_head);

        if new_head == self.state.food {
            // Growth tick: no tail removal
            self.state.score += FOOD_POINTS;
            let event = if self.state.score > self.state.high_score {
                self.state.high_score = self.state.score;
                highscore::save(&mut self.store, self.state.high_score);
                GameEvent::NewHighScore {
                    score: self.state.score,
                }
            } else {
                GameEvent::FoodEaten {
                    score: self.state.score,
                }
            };
            if let Some(food) = self.place_food() {
                self.state.food = food;
            }
            Some(event)
        } else {
            self.state.snake.pop();
            None
        }
    }

    /// Request a new heading. Ignored while idle/paused, and ignored when
    /// it would reverse the snake into itself. Between ticks the latest
    /// accepted value wins; there is no queue.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.state.running {
            return;
        }
        if self.state.direction.is_opposite(direction) {
            return;
        }
        self.state.direction = direction;
    }

    /// Begin a fresh run. Always allowed, including mid-run or after a
    /// game over.
    pub fn start(&mut self) -> GameEvent {
        self.reinitialize();
        self.state.running = true;
        log::info!("Game started");
        GameEvent::Started
    }

    /// Toggle running. Meaningless once the game is over (ticks are no-ops
    /// there regardless), but permitted.
    pub fn pause(&mut self) -> GameEvent {
        self.state.running = !self.state.running;
        if self.state.running {
            GameEvent::Resumed
        } else {
            GameEvent::Paused
        }
    }

    /// Back to the idle/ready state. Same reinitialization as `start` but
    /// leaves the game stopped. The high score is never reset.
    pub fn reset(&mut self) -> GameEvent {
        self.reinitialize();
        GameEvent::Reset
    }

    fn reinitialize(&mut self) {
        self.state = GameState::new(self.state.high_score);
    }

    fn end_run(&mut self) -> GameEvent {
        self.state.over = true;
        self.state.running = false;
        log::info!("Game over, final score {}", self.state.score);
        GameEvent::GameOver {
            score: self.state.score,
        }
    }

    /// Pick a uniformly random unoccupied cell. Rejection sampling with a
    /// bounded retry count, then an exact draw from the free cells; `None`
    /// only on a completely full board, in which case the caller keeps the
    /// previous food.
    fn place_food(&mut self) -> Option<Position> {
        for _ in 0..FOOD_SAMPLE_LIMIT {
            let candidate = Position::new(
                self.rng.random_range(0..GRID_SIZE),
                self.rng.random_range(0..GRID_SIZE),
            );
            if !self.state.occupied(candidate) {
                return Some(candidate);
            }
        }

        let free: Vec<Position> = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .filter(|cell| !self.state.occupied(*cell))
            .collect();
        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.random_range(0..free.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    fn engine() -> Engine<MemoryStore> {
        Engine::new(12345, MemoryStore::new())
    }

    #[test]
    fn test_straight_run_right() {
        let mut engine = engine();
        engine.start();

        for _ in 0..5 {
            engine.tick();
        }

        assert_eq!(engine.state().head(), Position::new(15, 10));
        assert!(!engine.state().over);
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().snake.len(), 1);
    }

    #[test]
    fn test_tick_noop_while_idle() {
        let mut engine = engine();
        let before = engine.state().clone();

        assert_eq!(engine.tick(), None);
        assert_eq!(*engine.state(), before);
    }

    #[test]
    fn test_wall_collision_is_terminal() {
        let mut engine = engine();
        engine.start();
        engine.state.snake = vec![Position::new(0, 10)];
        engine.state.direction = Direction::Left;

        let event = engine.tick();

        assert_eq!(event, Some(GameEvent::GameOver { score: 0 }));
        assert!(engine.state().over);
        assert!(!engine.state().running);
        // Snake untouched by the fatal tick
        assert_eq!(engine.state().snake, vec![Position::new(0, 10)]);

        // Further ticks are no-ops
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn test_self_collision_is_terminal() {
        let mut engine = engine();
        engine.start();
        // Head about to re-enter its own body: moving Left from (5,5)
        // into (4,5)
        engine.state.snake = vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(4, 6),
            Position::new(4, 5),
        ];
        engine.state.direction = Direction::Left;
        let before = engine.state.snake.clone();

        let event = engine.tick();

        assert_eq!(event, Some(GameEvent::GameOver { score: 0 }));
        assert!(engine.state().over);
        assert_eq!(engine.state().snake, before);
    }

    #[test]
    fn test_reversal_rejected() {
        let mut engine = engine();
        engine.start();
        engine.state.snake = vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ];
        assert_eq!(engine.state().direction, Direction::Right);

        engine.set_direction(Direction::Left);
        assert_eq!(engine.state().direction, Direction::Right);

        // Perpendicular turns still go through
        engine.set_direction(Direction::Up);
        assert_eq!(engine.state().direction, Direction::Up);
    }

    #[test]
    fn test_direction_ignored_while_not_running() {
        let mut engine = engine();
        engine.set_direction(Direction::Down);
        assert_eq!(engine.state().direction, Direction::Right);

        engine.start();
        engine.pause();
        engine.set_direction(Direction::Down);
        assert_eq!(engine.state().direction, Direction::Right);
    }

    #[test]
    fn test_latest_accepted_direction_wins() {
        let mut engine = engine();
        engine.start();

        engine.set_direction(Direction::Up);
        engine.set_direction(Direction::Left);
        assert_eq!(engine.state().direction, Direction::Left);

        engine.tick();
        assert_eq!(engine.state().head(), Position::new(9, 10));
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut engine = engine();
        engine.start();
        engine.state.food = Position::new(11, 10);
        let length_before = engine.state().snake.len();

        let event = engine.tick();

        // Fresh store: first food beats the zero high score
        assert_eq!(event, Some(GameEvent::NewHighScore { score: 10 }));
        assert_eq!(engine.state().score, 10);
        assert_eq!(engine.state().high_score, 10);
        assert_eq!(engine.state().snake.len(), length_before + 1);
        assert!(!engine.state().occupied(engine.state().food));
    }

    #[test]
    fn test_food_eaten_below_high_score() {
        let mut store = MemoryStore::new();
        store.set(crate::highscore::HIGH_SCORE_KEY, "100");
        let mut engine = Engine::new(7, store);
        assert_eq!(engine.state().high_score, 100);

        engine.start();
        engine.state.food = Position::new(11, 10);
        let event = engine.tick();

        assert_eq!(event, Some(GameEvent::FoodEaten { score: 10 }));
        assert_eq!(engine.state().high_score, 100);
    }

    #[test]
    fn test_high_score_persisted_on_beat() {
        let mut engine = engine();
        engine.start();
        engine.state.food = Position::new(11, 10);
        engine.tick();

        assert_eq!(
            engine.store.get(crate::highscore::HIGH_SCORE_KEY),
            Some("10".to_string())
        );
    }

    #[test]
    fn test_pause_toggles() {
        let mut engine = engine();
        engine.start();

        assert_eq!(engine.pause(), GameEvent::Paused);
        assert!(!engine.state().running);
        assert_eq!(engine.tick(), None);

        assert_eq!(engine.pause(), GameEvent::Resumed);
        assert!(engine.state().running);
    }

    #[test]
    fn test_reset_preserves_high_score() {
        let mut engine = engine();
        engine.start();
        engine.state.score = 50;
        engine.state.high_score = 50;

        let event = engine.reset();

        assert_eq!(event, GameEvent::Reset);
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().high_score, 50);
        assert!(!engine.state().running);
        assert!(!engine.state().over);
        assert_eq!(engine.state().snake, vec![Position::new(10, 10)]);
    }

    #[test]
    fn test_start_after_game_over() {
        let mut engine = engine();
        engine.start();
        engine.state.snake = vec![Position::new(0, 10)];
        engine.state.direction = Direction::Left;
        engine.tick();
        assert!(engine.state().over);

        assert_eq!(engine.start(), GameEvent::Started);
        assert!(engine.state().running);
        assert!(!engine.state().over);
        assert_eq!(engine.state().head(), Position::new(10, 10));
    }

    #[test]
    fn test_food_placement_near_full_board() {
        let mut engine = engine();
        engine.start();

        // Cover every cell except one; placement must find it
        let gap = Position::new(19, 19);
        engine.state.snake = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .filter(|p| *p != gap)
            .collect();

        assert_eq!(engine.place_food(), Some(gap));
    }

    #[test]
    fn test_food_placement_full_board() {
        let mut engine = engine();
        engine.start();
        engine.state.snake = (0..GRID_SIZE)
            .flat_map(|y| (0..GRID_SIZE).map(move |x| Position::new(x, y)))
            .collect();

        assert_eq!(engine.place_food(), None);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same commands, same food sequence
        let mut a = Engine::new(99999, MemoryStore::new());
        let mut b = Engine::new(99999, MemoryStore::new());
        a.start();
        b.start();

        for engine in [&mut a, &mut b] {
            engine.state.food = Position::new(11, 10);
            engine.tick();
        }

        assert_eq!(a.state(), b.state());
    }
}
