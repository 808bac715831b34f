use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use glowgrid_chart::{CursorFollower, FadeParams, FadeSequencer, LayoutParams, generate, seeded_rng};
use glowgrid_config::{Config, ConfigError};
use glowgrid_core::{Cell, FadeOrder, LayoutMode, Rgba};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};

mod view;

use view::ChartBounds;

/// Longest frame time fed to the animation; a stalled frame eases instead
/// of snapping.
const MAX_FRAME_DT: f32 = 0.05;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the chart state and animation drivers.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Parsed palette, in height-class order.
    palette: Vec<Rgba>,
    mode: LayoutMode,
    order: FadeOrder,
    cells: Vec<Cell>,
    sequencer: FadeSequencer,
    cursor: CursorFollower,
    /// Added to the configured seed on each regeneration, so every chart
    /// in a session stays reproducible.
    seed_offset: u64,
    last_tick: Instant,
}

impl App {
    /// Construct a new instance of [`App`] and generate the first chart.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette_colors()?;
        let order = config.fade_order()?;

        let mut app = Self {
            running: false,
            palette,
            mode: config.layout_mode(),
            order,
            cells: Vec::new(),
            sequencer: FadeSequencer::new(&[], fade_params(&config, order)),
            cursor: CursorFollower::new(config.cursor_speed),
            seed_offset: 0,
            last_tick: Instant::now(),
            config,
        };
        app.rebuild();
        Ok(app)
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.last_tick = Instant::now();
        while self.running {
            let dt = self.last_tick.elapsed().as_secs_f32();
            self.last_tick = Instant::now();
            self.advance(dt);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Regenerate cells and restart the fade pass for the current
    /// mode, order, and seed offset.
    fn rebuild(&mut self) {
        let seed = self.config.seed.wrapping_add(self.seed_offset);
        let mut rng = seeded_rng(seed);

        let params = LayoutParams {
            palette: self.palette.clone(),
            low_alpha: self.config.low_alpha,
            gap_probability: self.config.gap_probability,
            column_count: self.config.column_count,
            row_count: self.config.row_count,
            cell_height: self.config.cell_height,
            interval: self.config.interval(),
            shuffle: self.config.shuffle,
        };
        self.cells = generate(&params, self.mode, &mut rng);
        self.sequencer = FadeSequencer::new(&self.cells, fade_params(&self.config, self.order));
        self.cursor = CursorFollower::new(self.config.cursor_speed);

        // Start the follower on the first active cell instead of easing
        // in from the origin.
        if let Some(idx) = self.sequencer.active() {
            self.cursor.position = self.cells[idx].position;
            self.cursor.scale = self.cells[idx].scale;
        }
    }

    /// Advance the fade pass and the cursor follower by one frame.
    fn advance(&mut self, dt: f32) {
        let dt = dt.min(MAX_FRAME_DT);
        self.sequencer.tick(&mut self.cells, dt);

        if self.order == FadeOrder::Flat
            && let Some(idx) = self.sequencer.active()
        {
            let cell = &self.cells[idx];
            self.cursor.ease_toward(cell.position, cell.scale, dt);
        }
    }

    /// Renders the chart and the key help line.
    fn render(&mut self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

        let bounds = ChartBounds::of_grid(
            self.grid_columns(),
            self.config.row_count,
            self.config.cell_height,
            self.config.interval(),
        );

        view::render_chart(frame, chunks[0], &self.cells, bounds);
        if self.order == FadeOrder::Flat && !self.sequencer.is_finished() {
            view::render_cursor(frame, chunks[0], &self.cursor, bounds);
        }

        let accent = self.palette[0].to_terminal(1.0);
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "r".bold().fg(accent),
            " regenerate  ".dark_gray(),
            "m".bold().fg(accent),
            " layout mode  ".dark_gray(),
            "o".bold().fg(accent),
            format!(" fade order ({})", self.order.name()).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Columns the current layout occupies.
    fn grid_columns(&self) -> usize {
        match self.mode {
            LayoutMode::Sequential => self.palette.len(),
            LayoutMode::Randomized => self.config.column_count,
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with timeout so the animation keeps its frame rate.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => {
                self.seed_offset = self.seed_offset.wrapping_add(1);
                self.rebuild();
            }
            (_, KeyCode::Char('m')) => {
                self.mode = self.mode.toggle();
                self.rebuild();
            }
            (_, KeyCode::Char('o')) => {
                self.order = self.order.toggle();
                self.rebuild();
            }
            _ => {}
        }
    }

    /// Stop the animation and set running to false to quit the application.
    fn quit(&mut self) {
        self.sequencer.stop();
        self.running = false;
    }
}

fn fade_params(config: &Config, order: FadeOrder) -> FadeParams {
    FadeParams {
        low_alpha: config.low_alpha,
        hold_delay: config.ramp_hold_delay,
        lead_delay: config.secondary_delay,
        order,
        looping: config.looping,
    }
}
