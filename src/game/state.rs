use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
///
/// Coordinates are signed so a head that has just left the grid can still be
/// represented and rejected by the collision check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// True when both coordinates lie in `[0, grid_size)`
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    pub fn from_segments(body: Vec<Position>) -> Self {
        debug_assert!(!body.is_empty(), "a snake has at least one segment");
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The snake ran into a wall or into itself
    Collision(CollisionType),
    /// The apple cap was reached
    Completed,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    /// End-of-session banner; the only place the two endings differ
    pub fn headline(&self) -> &'static str {
        if self.is_completed() {
            "EVOLUTION COMPLETE!"
        } else {
            "GAME OVER"
        }
    }
}

/// Coarse lifecycle stage derived from the two state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Position,
    pub direction: Direction,
    pub grid_size: usize,
    pub score: u32,
    pub apples_eaten: u32,
    pub ticks: u32,
    pub game_started: bool,
    pub game_over: bool,
    /// Set together with `game_over`
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Create a running game state
    pub fn new(snake: Snake, apple: Position, direction: Direction, grid_size: usize) -> Self {
        Self {
            snake,
            apple,
            direction,
            grid_size,
            score: 0,
            apples_eaten: 0,
            ticks: 0,
            game_started: true,
            game_over: false,
            outcome: None,
        }
    }

    /// The idle board shown before the first start
    pub fn not_started(snake: Snake, apple: Position, direction: Direction, grid_size: usize) -> Self {
        Self {
            game_started: false,
            ..Self::new(snake, apple, direction, grid_size)
        }
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.game_started {
            Phase::Running
        } else {
            Phase::NotStarted
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.is_within(self.grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(4, 5),
            Position::new(3, 5),
        ]);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert!(snake.occupies(Position::new(4, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5)),
            Position::new(10, 10),
            Direction::Right,
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_outcome_headline() {
        assert_eq!(Outcome::Completed.headline(), "EVOLUTION COMPLETE!");
        assert_eq!(
            Outcome::Collision(CollisionType::Wall).headline(),
            "GAME OVER"
        );
        assert_eq!(
            Outcome::Collision(CollisionType::SelfCollision).headline(),
            "GAME OVER"
        );
    }

    #[test]
    fn test_phase() {
        let snake = Snake::new(Position::new(1, 1));
        let mut state = GameState::not_started(snake, Position::new(3, 3), Direction::Right, 10);
        assert_eq!(state.phase(), Phase::NotStarted);

        state.game_started = true;
        assert_eq!(state.phase(), Phase::Running);
        assert!(state.is_running());

        state.game_over = true;
        assert_eq!(state.phase(), Phase::GameOver);
    }
}
