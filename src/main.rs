mod app;
mod error;
mod event;
mod games;
mod settings;
mod tick;
mod ui;

use std::fs::File;
use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use error::AppError;
use event::{Event, EventHandler};
use settings::Settings;
use tick::RealtimeScheduler;

/// Longest wait for a key while no tick is armed (home screen, game over).
const IDLE_WAIT: Duration = Duration::from_millis(250);

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_logging(&settings)?;
    log::info!("starting with {:?}", settings);

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &settings);

    // Restore terminal, even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("running game loop")
}

fn run(terminal: &mut Term, settings: &Settings) -> Result<(), AppError> {
    let mut app = App::new(settings, RealtimeScheduler::new);
    let events = EventHandler::new();

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        let wait = app.until_next_tick().unwrap_or(IDLE_WAIT).min(IDLE_WAIT);
        match events.next(wait)? {
            Event::Key(key) => app.on_key(key),
            Event::Tick => {}
        }
        app.on_tick();

        if app.should_quit {
            log::info!("quit requested");
            return Ok(());
        }
    }
}

/// Logs go to a file, if one is configured; the terminal belongs to the UI.
fn init_logging(settings: &Settings) -> anyhow::Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
