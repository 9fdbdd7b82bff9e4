use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switch to raw mode on the alternate screen.
/// If any step fails the terminal is put back the way it was.
pub fn init() -> io::Result<CrosstermTerminal> {
    enable_raw_mode()?;
    restore_on_error(enter_alternate_screen(), restore)
}

fn enter_alternate_screen() -> io::Result<CrosstermTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

/// Runs `cleanup` when `result` failed. The original error is returned; a
/// cleanup failure is only logged.
fn restore_on_error<T>(
    result: io::Result<T>,
    cleanup: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if result.is_err() {
        if let Err(err) = cleanup() {
            warn!(error = %err, "failed to restore terminal");
        }
    }
    result
}
