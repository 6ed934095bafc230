use std::time::{Duration, Instant};

/// Diagnostics shown by the stats monitor
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Ticks per second, measured from the gap between the last two ticks
    pub tick_rate: u32,
    pub games_played: u32,
    last_tick: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            tick_rate: 0,
            games_played: 0,
            last_tick: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.last_tick = None;
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(previous) = self.last_tick {
            let delta = now.saturating_duration_since(previous);
            if !delta.is_zero() {
                self.tick_rate = (1.0 / delta.as_secs_f64()).round() as u32;
            }
        }
        self.last_tick = Some(now);
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
        self.last_tick = None;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_tick_rate() {
        let mut metrics = GameMetrics::new();
        let start = Instant::now();

        metrics.on_tick(start);
        assert_eq!(metrics.tick_rate, 0);

        metrics.on_tick(start + Duration::from_millis(150));
        assert_eq!(metrics.tick_rate, 7);

        metrics.on_tick(start + Duration::from_millis(250));
        assert_eq!(metrics.tick_rate, 10);
    }

    #[test]
    fn test_games_played() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over();
        metrics.on_game_over();
        assert_eq!(metrics.games_played, 2);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
