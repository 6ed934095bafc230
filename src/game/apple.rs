use rand::Rng;

use super::state::Position;

/// Pick a uniformly random free cell for the next apple
///
/// Rejection sampling over the whole grid. This never returns if the snake
/// covers every cell; the session apple cap keeps the snake far shorter than
/// the grid, so that case is not reachable.
pub fn place_apple<R: Rng>(rng: &mut R, grid_size: usize, snake: &[Position]) -> Position {
    loop {
        let x = rng.gen_range(0..grid_size) as i32;
        let y = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(x, y);

        if !snake.contains(&pos) {
            return pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_apple_in_bounds_and_off_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake: Vec<Position> = (0..11).map(|x| Position::new(x, 0)).collect();

        for _ in 0..500 {
            let apple = place_apple(&mut rng, 20, &snake);
            assert!(apple.is_within(20));
            assert!(!snake.contains(&apple));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(42);
        let snake = [Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)];

        let apple = place_apple(&mut rng, 2, &snake);
        assert_eq!(apple, Position::new(1, 1));
    }

    #[test]
    fn test_every_cell_reachable() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = [Position::new(1, 1)];
        let mut seen = std::collections::HashSet::new();

        for _ in 0..2_000 {
            seen.insert(place_apple(&mut rng, 3, &snake));
        }

        assert_eq!(seen.len(), 8);
    }
}
