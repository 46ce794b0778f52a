//! Terminal setup on stderr, so stdout stays free for the selected records.

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stderr};
use std::sync::Once;

pub type PickerTerminal = Terminal<CrosstermBackend<Stderr>>;

static PANIC_HOOK: Once = Once::new();

/// Enter raw mode and the alternate screen with mouse capture.
pub fn init() -> io::Result<PickerTerminal> {
    install_panic_hook();
    terminal::enable_raw_mode()?;
    or_restore(setup())
}

fn setup() -> io::Result<PickerTerminal> {
    execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Pass `result` through, restoring the terminal first if it failed.
fn or_restore<T>(result: io::Result<T>) -> io::Result<T> {
    if result.is_err() {
        let _ = restore();
    }
    result
}

/// Undo [`init`]. Safe to call more than once.
pub fn restore() -> io::Result<()> {
    let raw = terminal::disable_raw_mode();
    let screen = execute!(
        io::stderr(),
        DisableMouseCapture,
        LeaveAlternateScreen,
        cursor::Show
    );
    raw.and(screen)
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore();
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_setup_is_passed_through() {
        let err = or_restore::<()>(Err(io::Error::other("no tty"))).expect_err("failure");
        assert_eq!(err.to_string(), "no tty");
        assert_eq!(or_restore(Ok(7)).expect("success"), 7);
    }
}
