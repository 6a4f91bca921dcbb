use std::fs::File;
use std::io;
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use toroid_life::config::Config;
use toroid_life::events::AppEvent;
use toroid_life::events::Event;
use toroid_life::game::Game;
use toroid_life::io::convert_event;
use toroid_life::io::PointerTracker;
use toroid_life::render::Canvas;

const FRAMERATE: u32 = 30;
const FRAMETIME: Duration = Duration::from_millis(1_000 / FRAMERATE as u64);

/// Path of the log file. Nothing is logged when unset, since the terminal belongs to the UI.
const LOG_ENV: &str = "LIFE_LOG";

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn setup_logging() -> anyhow::Result<()> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };

    let file = File::create(&path).with_context(|| format!("Failed to create log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    setup_logging()?;

    let (cols, rows) = terminal::size().context("Failed to read terminal size")?;
    let config = Config::terminal(cols as u32, rows as u32)
        .with_env()
        .context("Invalid configuration")?;

    info!(?config, "starting");

    let mut game = Game::new(&config);
    let mut canvas = Canvas::new(config.width, config.height);
    let mut pointer = PointerTracker::default();

    let _guard = TerminalGuard::enable().context("Failed to set up the terminal")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::SetTitle(&config.title))?;

    'main: loop {
        let t = Instant::now();

        // Handle events for as long as FRAMETIME
        while let Some(time_left) = FRAMETIME.checked_sub(t.elapsed()) {
            if !event::poll(time_left)? {
                break;
            }

            match convert_event(event::read()?, &mut pointer) {
                None => {}
                Some(Event::AppEvent(AppEvent::Exit)) => break 'main,
                Some(Event::AppEvent(AppEvent::Resize { width, height })) => {
                    game.resize(width, height);
                    canvas.resize(width, height);
                    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                }
                Some(Event::Control(action)) => game.dispatch(action),
            }
        }

        game.update(pointer.frame());

        canvas.draw(&game.view());
        let frame = canvas.render();

        for (y, line) in frame.lines().enumerate() {
            queue!(stdout, cursor::MoveTo(0, y as u16), style::Print(line))?;
        }
        stdout.flush()?;
    }

    info!(generation = game.simulation().generation(), "exiting");

    Ok(())
}
