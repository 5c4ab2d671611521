//! Terminal mode handling and the scoped [`TerminalGuard`].
//!
//! Entering the app puts the terminal into raw mode on the alternate screen
//! with the cursor hidden and, optionally, mouse capture enabled. The guard
//! makes sure that is undone exactly once, on every exit path.

use std::io::{self, Write};

use crossterm::{
    cursor, execute,
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture,
    },
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use tracing::{info, warn};

/// Switch a terminal into and out of app mode.
pub trait TerminalMode: Send {
    fn enter(&mut self, mouse: bool) -> io::Result<()>;
    fn leave(&mut self) -> io::Result<()>;
    /// Current size as (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Set the window title. Terminals without one ignore it.
    fn set_title(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CrosstermTerminal
// ---------------------------------------------------------------------------

/// The process's controlling terminal, driven through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermTerminal {
    mouse: bool,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerminalMode for CrosstermTerminal {
    fn enter(&mut self, mouse: bool) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, EnableBracketedPaste, EnableFocusChange)?;
        if mouse {
            execute!(out, EnableMouseCapture)?;
        }
        self.mouse = mouse;
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        restore(&mut io::stdout(), self.mouse, terminal::disable_raw_mode)
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(io::stdout(), SetTitle(title))
    }
}

/// Undo every app-mode switch, raw mode first.
///
/// Every step is attempted even when an earlier one fails (a broken stdout
/// must not leave the tty in raw mode); the first error is returned.
fn restore<W: Write>(
    out: &mut W,
    mouse: bool,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let mut first_err = disable_raw_mode().err();
    let mut record = |result: io::Result<()>| {
        if let Err(err) = result {
            first_err.get_or_insert(err);
        }
    };
    if mouse {
        record(execute!(out, DisableMouseCapture));
    }
    record(execute!(out, DisableFocusChange));
    record(execute!(out, DisableBracketedPaste));
    record(execute!(out, cursor::Show));
    record(execute!(out, LeaveAlternateScreen));
    record(out.flush());
    first_err.map_or(Ok(()), Err)
}

// ---------------------------------------------------------------------------
// TerminalGuard
// ---------------------------------------------------------------------------

/// Holds a terminal in app mode until released or dropped.
///
/// [`release`](Self::release) is idempotent: only the first call leaves app
/// mode, later calls (including the one from `Drop`) do nothing.
#[derive(Debug)]
pub struct TerminalGuard<T: TerminalMode> {
    terminal: T,
    active: bool,
}

impl<T: TerminalMode> TerminalGuard<T> {
    /// Enter app mode.
    ///
    /// If entering fails halfway, whatever was switched on is switched off
    /// again before the error is returned.
    pub fn acquire(mut terminal: T, mouse: bool) -> io::Result<Self> {
        if let Err(err) = terminal.enter(mouse) {
            if let Err(leave_err) = terminal.leave() {
                warn!(error = %leave_err, "restoring terminal after failed setup");
            }
            return Err(err);
        }
        info!(mouse, "terminal acquired");
        Ok(Self { terminal, active: true })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        self.terminal.size()
    }

    /// Set the window title while in app mode.
    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.terminal.set_title(title)
    }

    /// Restore the terminal. Does nothing after the first call.
    pub fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        info!("terminal released");
        self.terminal.leave()
    }
}

impl<T: TerminalMode> Drop for TerminalGuard<T> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(error = %err, "failed to restore terminal on drop");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
