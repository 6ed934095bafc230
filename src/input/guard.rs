use crate::game::{Direction, Phase};

/// Single gate every direction producer goes through
///
/// Holds the last accepted direction. The tick loop reads it once per tick,
/// so any number of accepted requests between two ticks collapse into the
/// latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionGuard {
    accepted: Direction,
}

impl DirectionGuard {
    pub fn new(initial: Direction) -> Self {
        Self { accepted: initial }
    }

    /// Forget previous requests at session start
    pub fn reset(&mut self, initial: Direction) {
        self.accepted = initial;
    }

    pub fn current(&self) -> Direction {
        self.accepted
    }

    /// Try to change direction; returns whether the request was accepted
    ///
    /// Requests outside a running game and exact reversals of the last
    /// accepted direction are dropped.
    pub fn request(&mut self, phase: Phase, requested: Direction) -> bool {
        if phase != Phase::Running {
            return false;
        }

        if self.accepted.is_opposite(requested) {
            return false;
        }

        self.accepted = requested;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversal_never_changes_direction() {
        for dir in Direction::ALL {
            let mut guard = DirectionGuard::new(dir);
            assert!(!guard.request(Phase::Running, dir.opposite()));
            assert_eq!(guard.current(), dir);
        }
    }

    #[test]
    fn test_perpendicular_and_same_accepted() {
        let mut guard = DirectionGuard::new(Direction::Right);

        assert!(guard.request(Phase::Running, Direction::Right));
        assert!(guard.request(Phase::Running, Direction::Up));
        assert_eq!(guard.current(), Direction::Up);
    }

    #[test]
    fn test_ignored_when_not_running() {
        let mut guard = DirectionGuard::new(Direction::Right);

        assert!(!guard.request(Phase::NotStarted, Direction::Up));
        assert!(!guard.request(Phase::GameOver, Direction::Down));
        assert_eq!(guard.current(), Direction::Right);
    }

    #[test]
    fn test_checks_against_last_accepted() {
        let mut guard = DirectionGuard::new(Direction::Right);

        // Up is accepted, so Left is no longer a reversal
        assert!(guard.request(Phase::Running, Direction::Up));
        assert!(guard.request(Phase::Running, Direction::Left));
        assert_eq!(guard.current(), Direction::Left);
    }

    #[test]
    fn test_reset() {
        let mut guard = DirectionGuard::new(Direction::Right);
        guard.request(Phase::Running, Direction::Down);

        guard.reset(Direction::Right);
        assert_eq!(guard.current(), Direction::Right);
    }
}
