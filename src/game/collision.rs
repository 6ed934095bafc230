//! Wall and self collision checks for a candidate head cell

use super::state::{CollisionType, Position};

/// Classify a candidate head against the grid walls and the pre-move body
///
/// The body is the snake as it was before this tick, so the tail cell that
/// would be vacated by the same move still counts as occupied. Wall hits take
/// precedence over self hits.
pub fn check_collision(head: Position, body: &[Position], grid_size: usize) -> Option<CollisionType> {
    if !head.is_within(grid_size) {
        return Some(CollisionType::Wall);
    }

    if body.contains(&head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

/// Returns true if moving the head to `head` ends the game
pub fn is_collision(head: Position, body: &[Position], grid_size: usize) -> bool {
    check_collision(head, body, grid_size).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: usize = 20;

    #[test]
    fn test_free_cell() {
        let body = [Position::new(10, 10)];
        assert_eq!(check_collision(Position::new(11, 10), &body, GRID), None);
        assert!(!is_collision(Position::new(0, 0), &body, GRID));
        assert!(!is_collision(Position::new(19, 19), &body, GRID));
    }

    #[test]
    fn test_out_of_range_heads_always_collide() {
        let bodies: [&[Position]; 3] = [
            &[],
            &[Position::new(0, 0)],
            &[Position::new(5, 5), Position::new(5, 6), Position::new(5, 7)],
        ];
        let outside = [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(20, 5),
            Position::new(5, 20),
            Position::new(-1, -1),
            Position::new(i32::MAX, 0),
        ];

        for body in bodies {
            for head in outside {
                assert_eq!(
                    check_collision(head, body, GRID),
                    Some(CollisionType::Wall),
                    "head {:?} should hit a wall",
                    head
                );
            }
        }
    }

    #[test]
    fn test_body_hit() {
        let body = [Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)];
        assert_eq!(
            check_collision(Position::new(4, 5), &body, GRID),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_vacating_tail_still_collides() {
        // A 2x2 loop: moving up from (5,6) lands on the tail at (5,5)
        let body = [
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(5, 5),
        ];
        assert!(is_collision(Position::new(5, 5), &body, GRID));
    }
}
