//! Events that can occur in a conversation

use super::choice::Choice;
use crate::access::UnlockCode;

/// Slash commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start [code]`, optionally carrying a deep-link unlock code
    Start { unlock: Option<UnlockCode> },
    Help,
    Status,
    Check,
    When,
    Settings,
    Unknown(String),
}

impl Command {
    pub fn parse(name: &str, args: &[String]) -> Self {
        let name = name.trim().trim_start_matches('/').to_lowercase();
        match name.as_str() {
            "start" => Command::Start {
                unlock: args.first().and_then(|arg| UnlockCode::parse(arg)),
            },
            "help" => Command::Help,
            "status" => Command::Status,
            "check" => Command::Check,
            "when" => Command::When,
            "settings" => Command::Settings,
            _ => Command::Unknown(name),
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(Command),
    Choice(Choice),
    /// A button token that matches no known choice
    UnknownToken(String),
    /// Free text typed by the user
    Text(String),
}

impl Event {
    pub fn command(name: &str, args: &[String]) -> Self {
        Event::Command(Command::parse(name, args))
    }

    pub fn choice_token(token: &str) -> Self {
        Choice::parse(token).map_or_else(|| Event::UnknownToken(token.to_string()), Event::Choice)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Event::Text(text.into())
    }
}
