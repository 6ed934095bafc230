//! Interactive play in the terminal
//!
//! One task owns all game state. A `select!` loop multiplexes terminal
//! events, the fixed-period tick timer, the render timer and Ctrl+C; input
//! only updates the direction guard, and the next tick consumes whatever the
//! guard holds at that point.

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{Direction, GameConfig, GameEngine, GameState};
use crate::input::{DirectionGuard, InputHandler, Joystick, KeyAction, PointerInput};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Scene, Viewport};
use crate::session::{HighScoreStore, Session, SessionSummary};

/// Render at roughly 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct PlayMode<S: HighScoreStore> {
    engine: GameEngine,
    state: GameState,
    session: Session<S>,
    summary: Option<SessionSummary>,
    guard: DirectionGuard,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    pointer: PointerInput,
    /// A session just started; the tick period restarts from now
    restart_tick: bool,
    should_quit: bool,
}

impl<S: HighScoreStore> PlayMode<S> {
    pub fn new(config: GameConfig, store: S) -> Self {
        Self::with_engine(GameEngine::new(config), store)
    }

    pub fn with_engine(engine: GameEngine, store: S) -> Self {
        let config = engine.config().clone();
        let state = engine.idle_state();

        Self {
            engine,
            state,
            session: Session::new(store),
            summary: None,
            guard: DirectionGuard::new(config.initial_direction),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pointer: PointerInput::new(Joystick::new(
                config.joystick_deadzone,
                config.joystick_max_radius,
            )),
            restart_tick: false,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score()
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = Duration::from_millis(self.engine.config().tick_interval_ms);
        let mut tick_timer = interval(tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.state.is_running() {
                        self.update_game(Instant::now());
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // First move comes one full period after start
            if std::mem::take(&mut self.restart_tick) {
                tick_timer.reset();
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();

        let compact_width = self.engine.config().compact_width;
        let scene = Scene {
            state: &self.state,
            high_score: self.session.high_score(),
            max_apples: self.engine.config().max_apples_per_session,
            metrics: &self.metrics,
            summary: self.summary.as_ref(),
            joystick: self.pointer.joystick(),
        };

        let mut layout = None;
        terminal
            .draw(|frame| {
                let viewport = Viewport::from_width(frame.area().width, compact_width);
                layout = self.renderer.render(frame, &scene, viewport);
            })
            .context("Failed to draw frame")?;

        self.pointer.set_layout(layout);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => self.steer(direction),
                    KeyAction::Start => {
                        if !self.state.is_running() {
                            self.start_game();
                        }
                    }
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.pointer.handle_mouse_event(mouse) {
                    self.steer(direction);
                }
            }
            _ => {}
        }
    }

    fn steer(&mut self, direction: Direction) {
        if self.guard.request(self.state.phase(), direction) {
            debug!(direction = direction.label(), "direction accepted");
        }
    }

    fn update_game(&mut self, now: Instant) {
        let result = self.engine.tick(&mut self.state, self.guard.current());
        if !result.advanced {
            return;
        }
        self.metrics.on_tick(now);

        if result.terminated() {
            self.summary = self.session.finish(&self.state);
            self.metrics.on_game_over();
        }
    }

    fn start_game(&mut self) {
        self.state = self.engine.start();
        self.guard.reset(self.state.direction);
        self.session.begin();
        self.summary = None;
        self.metrics.on_game_start();
        self.restart_tick = true;

        info!(
            apple_x = self.state.apple.x,
            apple_y = self.state.apple.y,
            "session started"
        );
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
