use tracing::{error, info};

use super::store::HighScoreStore;
use crate::game::{GameState, Outcome};

/// What a finished session looked like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub final_score: u32,
    pub apples_eaten: u32,
    pub outcome: Outcome,
    /// The final score beat the stored high score
    pub new_high_score: bool,
}

/// Tracks the high score across sessions and records each session's end
pub struct Session<S: HighScoreStore> {
    store: S,
    high_score: u32,
    recorded: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Read the stored high score once
    pub fn new(store: S) -> Self {
        let high_score = store.load();
        info!(high_score, "loaded high score");

        Self {
            store,
            high_score,
            recorded: false,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mark the start of a new session
    pub fn begin(&mut self) {
        self.recorded = false;
    }

    /// Record a finished game, persisting the score if it beats the high score
    ///
    /// Returns `None` while the game is still going, and for every call after
    /// the first one for the same session.
    pub fn finish(&mut self, state: &GameState) -> Option<SessionSummary> {
        if !state.game_over || self.recorded {
            return None;
        }
        let outcome = state.outcome?;
        self.recorded = true;

        let new_high_score = state.score > self.high_score;
        if new_high_score {
            self.high_score = state.score;
            if let Err(err) = self.store.save(state.score) {
                error!(error = %format!("{err:#}"), "failed to persist high score");
            }
        }

        info!(
            score = state.score,
            apples = state.apples_eaten,
            ?outcome,
            new_high_score,
            "session finished"
        );

        Some(SessionSummary {
            final_score: state.score,
            apples_eaten: state.apples_eaten,
            outcome,
            new_high_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Direction, GameState, Position, Snake};
    use crate::session::MemoryStore;
    use anyhow::{Result, bail};

    fn finished(score: u32, outcome: Outcome) -> GameState {
        let mut state = GameState::new(
            Snake::new(Position::new(3, 3)),
            Position::new(5, 5),
            Direction::Right,
            20,
        );
        state.score = score;
        state.apples_eaten = score / 10;
        state.game_over = true;
        state.outcome = Some(outcome);
        state
    }

    const WALL: Outcome = Outcome::Collision(CollisionType::Wall);

    #[test]
    fn test_loads_stored_high_score() {
        let session = Session::new(MemoryStore::with_score(40));
        assert_eq!(session.high_score(), 40);
    }

    #[test]
    fn test_running_game_is_not_recorded() {
        let mut session = Session::new(MemoryStore::new());
        let mut state = finished(30, WALL);
        state.game_over = false;
        state.outcome = None;

        assert_eq!(session.finish(&state), None);
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let mut session = Session::new(MemoryStore::with_score(20));

        let summary = session.finish(&finished(30, WALL)).unwrap();

        assert!(summary.new_high_score);
        assert_eq!(summary.final_score, 30);
        assert_eq!(session.high_score(), 30);
        assert_eq!(session.store().load(), 30);
        assert_eq!(session.store().writes(), 1);
    }

    #[test]
    fn test_equal_score_is_not_a_new_high() {
        let mut session = Session::new(MemoryStore::with_score(30));

        let summary = session.finish(&finished(30, WALL)).unwrap();

        assert!(!summary.new_high_score);
        assert_eq!(session.store().writes(), 0);
    }

    #[test]
    fn test_finish_records_once() {
        let mut session = Session::new(MemoryStore::new());
        let state = finished(50, WALL);

        assert!(session.finish(&state).is_some());
        assert!(session.finish(&state).is_none());
        assert_eq!(session.store().writes(), 1);

        session.begin();
        let better = finished(60, WALL);
        assert!(session.finish(&better).unwrap().new_high_score);
        assert_eq!(session.store().writes(), 2);
    }

    #[test]
    fn test_outcomes_differ_only_in_message() {
        let mut crashed = Session::new(MemoryStore::new());
        let mut completed = Session::new(MemoryStore::new());

        let a = crashed.finish(&finished(100, WALL)).unwrap();
        let b = completed
            .finish(&finished(100, Outcome::Completed))
            .unwrap();

        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.new_high_score, b.new_high_score);
        assert_eq!(a.outcome.headline(), "GAME OVER");
        assert_eq!(b.outcome.headline(), "EVOLUTION COMPLETE!");
    }

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&self) -> u32 {
            0
        }

        fn save(&mut self, _score: u32) -> Result<()> {
            bail!("disk full")
        }
    }

    #[test]
    fn test_failed_save_keeps_in_memory_high_score() {
        let mut session = Session::new(FailingStore);

        let summary = session.finish(&finished(20, WALL)).unwrap();

        assert!(summary.new_high_score);
        assert_eq!(session.high_score(), 20);
    }
}
