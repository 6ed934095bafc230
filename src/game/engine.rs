use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use super::{
    action::Direction,
    apple::place_apple,
    collision::check_collision,
    config::GameConfig,
    state::{GameState, Outcome, Position, Snake},
};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the state changed at all (false when the game is not running)
    pub advanced: bool,
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// Set on the tick that ended the session
    pub outcome: Option<Outcome>,
}

impl TickResult {
    fn idle() -> Self {
        Self {
            advanced: false,
            ate_apple: false,
            outcome: None,
        }
    }

    pub fn terminated(&self) -> bool {
        self.outcome.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose apple sequence is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The board shown before the first start: initial snake, apple five cells ahead
    ///
    /// When that cell is off the grid the apple takes the first free cell in
    /// row-major order instead.
    pub fn idle_state(&self) -> GameState {
        let head = self.config.initial_head;
        let size = self.config.grid_size as i32;
        let preview = head.moved_by(5, 0);
        let apple = if preview.is_within(self.config.grid_size) {
            preview
        } else {
            (0..size)
                .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
                .find(|&cell| cell != head)
                .unwrap_or(head)
        };

        GameState::not_started(
            Snake::new(head),
            apple,
            self.config.initial_direction,
            self.config.grid_size,
        )
    }

    /// Start a fresh session
    pub fn start(&mut self) -> GameState {
        let snake = Snake::new(self.config.initial_head);
        let apple = place_apple(&mut self.rng, self.config.grid_size, &snake.body);

        GameState::new(
            snake,
            apple,
            self.config.initial_direction,
            self.config.grid_size,
        )
    }

    /// Advance a running game by one cell in `direction`
    ///
    /// The caller is responsible for rejecting reversals; the engine moves in
    /// whatever direction it is given. States that are not running are left
    /// untouched.
    pub fn tick(&mut self, state: &mut GameState, direction: Direction) -> TickResult {
        if !state.is_running() {
            return TickResult::idle();
        }

        let new_head = state.snake.head().moved_in_direction(direction);

        // Checked against the pre-move body, tail included
        if let Some(collision) = check_collision(new_head, &state.snake.body, state.grid_size) {
            let outcome = Outcome::Collision(collision);
            state.game_over = true;
            state.outcome = Some(outcome);
            state.ticks += 1;
            debug!(?collision, x = new_head.x, y = new_head.y, "snake collided");

            return TickResult {
                advanced: true,
                ate_apple: false,
                outcome: Some(outcome),
            };
        }

        state.direction = direction;
        let ate_apple = new_head == state.apple;
        state.snake.advance(new_head, ate_apple);

        let mut outcome = None;
        if ate_apple {
            state.score += self.config.points_per_apple;
            state.apples_eaten += 1;
            state.apple = place_apple(&mut self.rng, state.grid_size, &state.snake.body);
            debug!(
                apples = state.apples_eaten,
                score = state.score,
                "apple eaten"
            );

            if state.apples_eaten >= self.config.max_apples_per_session {
                state.game_over = true;
                state.outcome = Some(Outcome::Completed);
                outcome = Some(Outcome::Completed);
            }
        }

        state.ticks += 1;

        TickResult {
            advanced: true,
            ate_apple,
            outcome,
        }
    }
}
