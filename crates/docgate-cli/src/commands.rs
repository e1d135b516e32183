//! Typed lines to controller actions
//!
//! At the login view every line that is not a global command is the
//! identifier, entered and followed by Enter.

use docgate_core::{Action, Key, View};

/// What a typed line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Actions to dispatch, in order
    Dispatch(Vec<Action>),
    /// Leave the program
    Quit,
    /// Not understood in this view
    Unknown(String),
}

pub(crate) fn parse(line: &str, view: View) -> Command {
    let trimmed = line.trim();
    match trimmed {
        "quit" | "exit" => return Command::Quit,
        "help" => return Command::Dispatch(vec![Action::ShowHelp]),
        "close" => return Command::Dispatch(vec![Action::CloseHelp]),
        _ => {}
    }

    if view == View::Login {
        return Command::Dispatch(vec![Action::Input(line.to_string()), Action::KeyUp(Key::Enter)]);
    }

    let mut words = trimmed.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("back"), None, None) => Command::Dispatch(vec![Action::Back]),
        (Some("logout"), None, None) => Command::Dispatch(vec![Action::Logout]),
        (Some("open"), Some(number), None) => match number.parse::<usize>() {
            Ok(n) if n > 0 => Command::Dispatch(vec![Action::Open(n - 1)]),
            _ => Command::Unknown(trimmed.to_string()),
        },
        _ => Command::Unknown(trimmed.to_string()),
    }
}
