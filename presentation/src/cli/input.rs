//! Keyboard commands accepted while a project is being followed

use std::io::{self, BufRead};
use tokio::sync::mpsc;

/// One line of user input during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Enter, `r` or `refresh`
    Refresh,
    /// `f <name>` / `flow <name>`
    SelectFlow(String),
    /// `q` / `quit`
    Quit,
    Help,
    Unknown(String),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let head = head.trim_start_matches('/').to_lowercase();

        match head.as_str() {
            "" | "r" | "refresh" => SessionCommand::Refresh,
            "q" | "quit" | "exit" => SessionCommand::Quit,
            "h" | "help" | "?" => SessionCommand::Help,
            "f" | "flow" if !rest.is_empty() => SessionCommand::SelectFlow(rest.to_string()),
            _ => SessionCommand::Unknown(line.to_string()),
        }
    }

    pub fn help() -> &'static str {
        "Enter/r: refresh now   f <flow>: show another flow   q: quit"
    }
}

/// Read stdin lines on a dedicated thread.
///
/// A plain OS thread is used so a pending read never holds up runtime
/// shutdown. The channel closes on EOF or a read error.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_aliases() {
        for line in ["", "  ", "r", "R", "refresh", "/refresh\n"] {
            assert_eq!(SessionCommand::parse(line), SessionCommand::Refresh, "{:?}", line);
        }
    }

    #[test]
    fn test_flow_selection_keeps_name_case() {
        assert_eq!(
            SessionCommand::parse("f Complete Workflow"),
            SessionCommand::SelectFlow("Complete Workflow".to_string())
        );
        assert_eq!(
            SessionCommand::parse("/flow   Requirements Gathering "),
            SessionCommand::SelectFlow("Requirements Gathering".to_string())
        );
        assert_eq!(
            SessionCommand::parse("flow"),
            SessionCommand::Unknown("flow".to_string())
        );
    }

    #[test]
    fn test_quit_and_unknown() {
        assert_eq!(SessionCommand::parse("q"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("/quit"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("?"), SessionCommand::Help);
        assert_eq!(
            SessionCommand::parse("launch"),
            SessionCommand::Unknown("launch".to_string())
        );
    }
}
