//! # Text-based user interface (TUI)
//!
//! Terminal setup and teardown for the play screen. The terminal is switched
//! to the alternate screen in raw mode for the duration of a session, and put
//! back the way it was afterward, even if the session panics.

use std::{
	io::{self, stdout, Stdout},
	panic,
	sync::Once
};

use crossterm::{
	cursor::Show,
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use log::{trace, warn};
use ratatui::{backend::CrosstermBackend, Terminal};

////////////////////////////////////////////////////////////////////////////////
//                         Text-based user interface.                         //
////////////////////////////////////////////////////////////////////////////////

/// The terminal type of the play screen.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run a session on the terminal. The terminal is prepared before `f` runs
/// and restored after it returns. If `f` panics, the terminal is restored
/// before the panic message is printed.
///
/// # Arguments
///
/// * `f` - The session.
///
/// # Returns
///
/// The result of the session.
///
/// # Errors
///
/// Any error that occurs while preparing or restoring the terminal, or while
/// running the session.
pub fn tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	install_panic_hook();
	let mut terminal = enter()?;
	let result = f(&mut terminal);
	leave()?;
	result
}

/// Chain a terminal-restoring step in front of the current panic hook. This
/// happens at most once per process.
fn install_panic_hook()
{
	static INSTALL: Once = Once::new();
	INSTALL.call_once(|| {
		let previous = panic::take_hook();
		panic::set_hook(Box::new(move |info| {
			// Nothing useful can be done about a failure here.
			let _ = leave();
			previous(info);
		}));
	});
}

/// Switch the terminal to the alternate screen in raw mode. If any step
/// fails, the steps already taken are undone.
///
/// # Returns
///
/// The prepared terminal.
///
/// # Errors
///
/// Any error that occurs while preparing the terminal.
fn enter() -> io::Result<Tui>
{
	trace!("entering alternate screen");
	let mut out = stdout();
	execute!(out, EnterAlternateScreen)?;
	let terminal = enable_raw_mode()
		.and_then(|()| Terminal::new(CrosstermBackend::new(out)));
	if terminal.is_err()
	{
		if let Err(e) = leave()
		{
			warn!("Failed to restore terminal: {}", e);
		}
	}
	terminal
}

/// Leave the alternate screen and raw mode, and show the cursor again. Safe
/// to call when the terminal is already restored.
///
/// # Errors
///
/// Any error that occurs while restoring the terminal.
fn leave() -> io::Result<()>
{
	trace!("leaving alternate screen");
	disable_raw_mode()?;
	execute!(stdout(), LeaveAlternateScreen, Show)
}
