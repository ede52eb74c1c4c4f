mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use karrot::{
    audio::{Audio, Bell, Muted},
    config::{Config, ConfigStore, FileConfigStore, GameConfig},
    game::{Game, StopReason},
    hud::Hud,
    logging,
    popup::{PopUp, PopUpAction},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, GameEvent, Runner, Ticker},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    sync::mpsc::Receiver,
    time::Duration,
};

use crate::ui::layout::{hit, Regions};

const TICK_RATE_MS: u64 = 100;

/// pull every carrot before the clock runs out, and don't touch the bugs
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal carrot-pulling minigame. Click every carrot in the field before the countdown expires; clicking a bug loses the round."
)]
pub struct Cli {
    /// length of a round in seconds
    #[clap(short = 'd', long)]
    duration: Option<u32>,

    /// number of carrots to pull
    #[clap(short = 'c', long)]
    carrots: Option<u32>,

    /// number of bugs hiding in the field
    #[clap(short = 'b', long)]
    bugs: Option<u32>,

    /// seed for reproducible item placement
    #[clap(long)]
    seed: Option<u64>,

    /// silence the terminal bell
    #[clap(long)]
    mute: bool,

    /// settings file to read instead of the default location
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command line flags take precedence over the settings file
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(duration) = self.duration {
            cfg.duration_secs = duration;
        }
        if let Some(carrots) = self.carrots {
            cfg.carrot_count = carrots;
        }
        if let Some(bugs) = self.bugs {
            cfg.bug_count = bugs;
        }
        cfg.muted |= self.mute;
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub game: Game<Hud, Box<dyn Audio>>,
    pub popup: PopUp,
    stop_events: Receiver<StopReason>,
    regions: Regions,
}

impl App {
    pub fn new(config: GameConfig, seed: Option<u64>, audio: Box<dyn Audio>) -> Self {
        let mut game = match seed {
            Some(seed) => Game::seeded(config, seed, Hud::default(), audio),
            None => Game::new(config, Hud::default(), audio),
        };
        let stop_events = game.subscribe();

        Self {
            game,
            popup: PopUp::new(),
            stop_events,
            regions: Regions::default(),
        }
    }

    /// Recompute screen regions and keep the field bounds in step with them
    pub fn sync_layout(&mut self, area: Rect) {
        self.regions = Regions::new(area);
        self.game
            .resize_field(self.regions.field.width, self.regions.field.height);
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.game.on_tick(elapsed);
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            // ctrl+c to quit
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.popup.is_visible() {
                    self.replay();
                } else {
                    self.toggle();
                }
            }
            KeyCode::Char('r') => self.replay(),
            _ => {}
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (col, row) = (mouse.column, mouse.row);

        if self.popup.is_visible() && hit(self.regions.replay, col, row) {
            self.replay();
        } else if hit(self.regions.button, col, row) {
            self.toggle();
        } else if hit(self.regions.field, col, row) {
            let field = self.regions.field;
            self.game.click_at(col - field.x, row - field.y);
        }
    }

    fn toggle(&mut self) {
        self.game.toggle();
        if self.game.is_running() {
            self.popup.hide();
        }
    }

    fn replay(&mut self) {
        if let Some(PopUpAction::Replay) = self.popup.press_replay() {
            self.game.start();
        }
    }

    /// Deliver pending session-stop events to the finish banner
    pub fn drain_stop_events(&mut self) {
        while let Ok(reason) = self.stop_events.try_recv() {
            self.on_game_stop(reason);
        }
    }

    fn on_game_stop(&mut self, reason: StopReason) {
        self.popup.show_with_text(reason.message());
        self.game.audio_mut().play(reason.sound());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = cli
        .config
        .as_ref()
        .map(FileConfigStore::with_path)
        .unwrap_or_default();
    let config = match store.load() {
        Ok(cfg) => cli.apply(cfg),
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::Io,
                format!("failed to read {}: {err}", store.path().display()),
            )
            .exit();
        }
    };
    let game_config = match GameConfig::try_from(&config) {
        Ok(gc) => gc,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, err).exit();
        }
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = logging::init() {
        eprintln!("karrot: logging disabled: {err}");
    }

    let mut app = App::new(game_config, cli.seed, open_audio(config.muted));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let res = start_tui(&mut terminal, &mut app, runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn open_audio(muted: bool) -> Box<dyn Audio> {
    if muted {
        return Box::new(Muted);
    }

    #[cfg(feature = "speaker")]
    {
        match karrot::audio::Speaker::open() {
            Ok(speaker) => return Box::new(speaker),
            Err(err) => tracing::warn!(%err, "falling back to terminal bell"),
        }
    }

    Box::new(Bell::stdout())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut runner: Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let size = terminal.size()?;
        app.sync_layout(Rect::new(0, 0, size.width, size.height));
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            GameEvent::Tick => app.on_tick(runner.interval()),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
            GameEvent::Mouse(mouse) => app.on_mouse(mouse),
        }

        app.drain_stop_events();
    }

    tracing::info!("karrot exiting");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
