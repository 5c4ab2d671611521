//! Application-level commands.
//!
//! Widgets, handlers, key bindings and [`AppHandle`](crate::app::AppHandle)s
//! all talk to the app loop through [`Command`]s. They are queued and handled
//! by the update loop, never in the middle of a render pass.

use std::fmt;

/// A request to the app loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Stop all loops and restore the terminal.
    Quit,
    /// Switch the active screen at the next safe point.
    ShowScreen(String),
    /// Move focus along the Tab chain.
    FocusNext,
    FocusPrevious,
    /// Repaint even if nothing reported a change.
    Refresh,
    /// A named application action, passed to the `on_command` hook.
    Custom(String),
}

impl Command {
    /// Convenience constructor for [`Command::Custom`].
    pub fn custom(name: impl Into<String>) -> Self {
        Command::Custom(name.into())
    }

    /// Short name for logging.
    pub fn name(&self) -> &str {
        match self {
            Command::Quit => "quit",
            Command::ShowScreen(_) => "show_screen",
            Command::FocusNext => "focus_next",
            Command::FocusPrevious => "focus_previous",
            Command::Refresh => "refresh",
            Command::Custom(name) => name,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ShowScreen(screen) => write!(f, "show_screen({screen})"),
            Command::Custom(name) => write!(f, "custom({name})"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_display() {
        assert_eq!(Command::Quit.name(), "quit");
        assert_eq!(Command::custom("save").name(), "save");
        assert_eq!(Command::ShowScreen("help".into()).to_string(), "show_screen(help)");
        assert_eq!(Command::custom("save").to_string(), "custom(save)");
        assert_eq!(Command::Refresh.to_string(), "refresh");
    }
}
