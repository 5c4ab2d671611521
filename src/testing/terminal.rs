//! A terminal stand-in that records mode switches.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::render::terminal::TerminalMode;

/// Fixed-size terminal that counts `enter`/`leave` calls and records titles.
///
/// Clones share their counters, so a test can hand one clone to the app and
/// inspect another afterwards.
#[derive(Debug, Clone)]
pub struct HeadlessTerminal {
    size: (u16, u16),
    enters: Arc<AtomicUsize>,
    leaves: Arc<AtomicUsize>,
    titles: Arc<Mutex<Vec<String>>>,
    fail_enter: bool,
}

impl HeadlessTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: (width, height),
            enters: Arc::new(AtomicUsize::new(0)),
            leaves: Arc::new(AtomicUsize::new(0)),
            titles: Arc::new(Mutex::new(Vec::new())),
            fail_enter: false,
        }
    }

    /// Make `enter` fail after counting the call.
    pub fn failing_enter(mut self) -> Self {
        self.fail_enter = true;
        self
    }

    pub fn enters(&self) -> usize {
        self.enters.load(Ordering::SeqCst)
    }

    pub fn leaves(&self) -> usize {
        self.leaves.load(Ordering::SeqCst)
    }

    /// Every title set so far, oldest first.
    pub fn titles(&self) -> Vec<String> {
        self.titles.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl TerminalMode for HeadlessTerminal {
    fn enter(&mut self, _mouse: bool) -> io::Result<()> {
        self.enters.fetch_add(1, Ordering::SeqCst);
        if self.fail_enter {
            return Err(io::Error::other("terminal refused app mode"));
        }
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        self.leaves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        if let Ok(mut titles) = self.titles.lock() {
            titles.push(title.to_owned());
        }
        Ok(())
    }
}
