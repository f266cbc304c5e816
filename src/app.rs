//! App: terminal init, frame loop, frame counter and key handling.

use crate::input::{Action, PlantAction, key_to_action, plant_key_to_action};
use crate::theme::Theme;
use crate::Args;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;
use tracing::{debug, warn};
use wellblocks::lsystem::{Drawing, LSystem};
use wellblocks::{Command, GameConfig, GameState};

/// Whether the loop keeps going after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// L-system viewer state: the system, its last good drawing and any error from the last
/// change.
#[derive(Debug)]
pub struct PlantView {
    pub system: LSystem,
    pub drawing: Drawing,
    pub symbols: usize,
    pub error: Option<String>,
}

impl PlantView {
    pub fn new(system: LSystem) -> Self {
        let mut view = Self {
            system,
            drawing: Drawing::default(),
            symbols: 0,
            error: None,
        };
        view.rebuild();
        view
    }

    /// Re-expand and re-draw. On failure the previous drawing stays on screen.
    fn rebuild(&mut self) {
        let result = self.system.expand().and_then(|symbols| {
            let drawing =
                wellblocks::lsystem::interpret(&symbols, self.system.step, self.system.angle_deg)?;
            Ok((symbols.chars().count(), drawing))
        });
        match result {
            Ok((symbols, drawing)) => {
                debug!(symbols, segments = drawing.segments.len(), "plant rebuilt");
                self.symbols = symbols;
                self.drawing = drawing;
                self.error = None;
            }
            Err(err) => {
                warn!(%err, "plant rebuild failed");
                self.error = Some(err.to_string());
            }
        }
    }

    fn apply(&mut self, action: PlantAction) {
        match action {
            PlantAction::Grow => self.system.double_step(),
            PlantAction::Shrink => self.system.halve_step(),
            PlantAction::AngleDown => self.system.turn_angle(-1.0),
            PlantAction::AngleUp => self.system.turn_angle(1.0),
            PlantAction::MoreIterations => self.system.more_iterations(),
            PlantAction::FewerIterations => self.system.fewer_iterations(),
            PlantAction::Quit | PlantAction::None => return,
        }
        self.rebuild();
    }
}

pub struct App {
    theme: Theme,
    state: GameState,
    plant: Option<PlantView>,
    paused: bool,
    no_animation: bool,
    frame_duration: Duration,
    last_frame: Instant,
    /// Frames advanced while the game was not paused; the game ticks on multiples of its
    /// frame sample.
    frame_count: u64,
    /// Row most recently collapsed, flashed until the effect finishes.
    flash_row: Option<i32>,
    /// TachyonFX flash for the collapsed row (created on first draw after a clear).
    line_clear_effect: Option<Effect>,
    /// Last time we processed the flash effect (for delta).
    line_clear_effect_process_time: Option<Instant>,
}

impl App {
    pub fn new(args: &Args, config: &GameConfig, theme: Theme, plant: Option<LSystem>) -> Self {
        let frame_rate = if args.frame_rate > 0.0 {
            args.frame_rate
        } else {
            60.0
        };
        Self {
            theme,
            state: GameState::new(config),
            plant: plant.map(PlantView::new),
            paused: false,
            no_animation: args.no_animation,
            frame_duration: Duration::from_secs_f64(1.0 / frame_rate),
            last_frame: Instant::now(),
            frame_count: 0,
            flash_row: None,
            line_clear_effect: None,
            line_clear_effect_process_time: None,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            terminal.draw(|f| {
                let area = f.area();
                if let Some(plant) = &self.plant {
                    crate::ui::draw_plant(f, plant, &self.theme, area);
                } else {
                    crate::ui::draw(
                        f,
                        &self.state,
                        &self.theme,
                        self.paused,
                        self.flash_row,
                        area,
                        &mut self.line_clear_effect,
                        &mut self.line_clear_effect_process_time,
                        now,
                    );
                }
            })?;

            if self.line_clear_effect.as_ref().is_some_and(Effect::done) {
                self.flash_row = None;
                self.line_clear_effect = None;
                self.line_clear_effect_process_time = None;
            }

            let timeout = self.frame_duration.saturating_sub(self.last_frame.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        // Only presses count; releases and OS repeats of other kinds do not.
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if self.handle_key(key) == Flow::Quit {
                            return Ok(());
                        }
                    }
                }
            }

            if self.last_frame.elapsed() >= self.frame_duration {
                self.last_frame = Instant::now();
                self.advance_frame();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if let Some(plant) = self.plant.as_mut() {
            let action = plant_key_to_action(key);
            if action == PlantAction::Quit {
                return Flow::Quit;
            }
            plant.apply(action);
            return Flow::Continue;
        }

        match key_to_action(key) {
            Action::Quit => return Flow::Quit,
            Action::Pause => {
                if self.state.is_running() {
                    self.paused = !self.paused;
                }
            }
            Action::Game(Command::Restart) => {
                self.paused = false;
                self.flash_row = None;
                self.line_clear_effect = None;
                self.line_clear_effect_process_time = None;
                self.state.apply(Command::Restart);
            }
            Action::Game(command) => {
                if !self.paused {
                    self.state.apply(command);
                }
            }
            Action::None => {}
        }
        Flow::Continue
    }

    fn advance_frame(&mut self) {
        if self.plant.is_some() || self.paused {
            return;
        }
        self.frame_count = self.frame_count.wrapping_add(1);
        let Some(report) = self.state.on_frame(self.frame_count) else {
            return;
        };
        if let Some(row) = report.cleared_row {
            if !self.no_animation {
                self.flash_row = Some(row);
                self.line_clear_effect = None;
                self.line_clear_effect_process_time = None;
            }
        }
    }
}
