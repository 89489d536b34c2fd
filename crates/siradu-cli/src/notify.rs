//! Terminal implementations of the client's collaborator traits.

use colored::Colorize;

use siradu_core::{Navigator, Notifier};

use crate::output;

/// Routes the client's success/error messages to the terminal, the
/// same place the console would raise toasts.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        output::success(message);
    }

    fn error(&self, message: &str) {
        output::error(message);
    }
}

/// A terminal has no login view to sit on; a session-loss redirect
/// becomes a hint to re-run the command.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn on_login_view(&self) -> bool {
        false
    }

    fn redirect_to_login(&self) {
        eprintln!("{}", "Session expired. Sign in again.".yellow());
    }
}
