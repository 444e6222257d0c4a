use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::info;

use flashdeck::{draw, load_library, logger, App, Config};

fn main() -> Result<()> {
    let library_override = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(library_override).context("failed to load configuration")?;
    logger::init(&config.log_path, &config.log_level)?;

    let library = load_library(&config.library_path)
        .with_context(|| format!("failed to load library {}", config.library_path.display()))?;
    info!(
        path = %config.library_path.display(),
        decks = library.len(),
        "flashdeck started"
    );

    let mut app = App::new(library, config);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run(&mut terminal, &mut app);
    let restored = restore_terminal(&mut terminal);

    app.shut_down(restored)?;
    result
}

/// Undo raw mode and the alternate screen. Every step runs even when an
/// earlier one fails; the first failure is reported.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let cursor = terminal.show_cursor();

    raw.context("failed to disable raw mode")?;
    screen.context("failed to leave alternate screen")?;
    cursor.context("failed to show cursor")?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }
    }
    Ok(())
}
