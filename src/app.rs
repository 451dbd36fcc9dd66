use std::time::Instant;

use sdl2::event::{Event, WindowEvent};
use sdl2::EventPump;
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::constants::BOARD_PIXEL_SIZE;
use crate::error::{GameError, GameResult};
use crate::events::{CommandOutcome, TickOutcome};
use crate::game::Game;
use crate::platform;
use crate::systems::input::Bindings;
use crate::texture::canvas::CanvasSurface;
use crate::timing::Ticker;

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    surface: CanvasSurface,
    event_pump: EventPump,
    bindings: Bindings,
    ticker: Ticker,
    focused: bool,
    // Keep SDL alive for the app lifetime
    _sdl_context: sdl2::Sdl,
}

impl App {
    /// Initializes SDL subsystems, creates the game window, and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()` during game state setup.
    pub fn new(config: &GameConfig) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(|e| GameError::Sdl(e.to_string()))?;
        let video_subsystem = sdl_context.video().map_err(|e| GameError::Sdl(e.to_string()))?;
        let event_pump = sdl_context.event_pump().map_err(|e| GameError::Sdl(e.to_string()))?;
        // The font borrows the TTF context for the rest of the process.
        let ttf_context: &'static sdl2::ttf::Sdl2TtfContext =
            Box::leak(Box::new(sdl2::ttf::init().map_err(|e| GameError::Sdl(e.to_string()))?));

        let width = (BOARD_PIXEL_SIZE.x as f32 * config.scale).round() as u32;
        let height = (BOARD_PIXEL_SIZE.y as f32 * config.scale).round() as u32;
        trace!(width, height, scale = config.scale, "Creating game window");
        let window = video_subsystem
            .window("Pac-Man", width, height)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(BOARD_PIXEL_SIZE.x, BOARD_PIXEL_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let surface = CanvasSurface::new(canvas, ttf_context, &config.assets_dir, config.font_path.as_deref());

        info!("Starting game initialization");
        let game = Game::new(config)?;

        Ok(App {
            game,
            surface,
            event_pump,
            bindings: Bindings::default(),
            ticker: Ticker::new(config.tick_interval(), Instant::now()),
            focused: true,
            _sdl_context: sdl_context,
        })
    }

    /// Feeds pending window and keyboard events to the game.
    ///
    /// Returns `false` once the player asked to quit.
    fn handle_events(&mut self) -> bool {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => return false,
                Event::Window { win_event, .. } => match win_event {
                    WindowEvent::FocusGained => self.focused = true,
                    WindowEvent::FocusLost => self.focused = false,
                    _ => {}
                },
                Event::KeyUp {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    let Some(command) = self.bindings.command_for(&key.name()) else {
                        continue;
                    };

                    match self.game.handle_command(command) {
                        CommandOutcome::Exit => return false,
                        CommandOutcome::Restarted => {
                            debug!("Resuming ticker after restart");
                            self.ticker.resume(Instant::now());
                        }
                        CommandOutcome::Buffered | CommandOutcome::Ignored => {}
                    }
                }
                _ => {}
            }
        }

        true
    }

    /// Runs one frame: input, at most the ticks that are due, rendering, then sleep.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the game should continue running, `Ok(false)` if the player asked to exit.
    pub fn run(&mut self) -> GameResult<bool> {
        if !self.handle_events() {
            return Ok(false);
        }

        while self.ticker.poll(Instant::now()) {
            if self.game.tick() == TickOutcome::Halted {
                debug!(timings = ?self.game.timing_report(), "Halting ticker");
                self.ticker.halt();
            }
        }

        self.game.draw(&mut self.surface)?;
        self.surface.present();

        let wait = self
            .ticker
            .time_until_next(Instant::now())
            .unwrap_or_else(|| self.ticker.period());
        platform::sleep(wait.min(self.ticker.period()), self.focused);

        Ok(true)
    }
}
