//! Render instructions returned to the chat transport

use super::choice::Choice;
use crate::rules::{TimingResult, TripSummary, VerdictResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// What pressing a button does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Sends the token back as a choice event
    Token(String),
    /// Opens a link
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    #[serde(flatten)]
    pub action: ButtonAction,
}

impl Button {
    pub fn choice(label: impl Into<String>, choice: Choice) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Token(choice.token()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    /// Callback token, if this is not a link button
    #[allow(dead_code)] // Used in tests
    pub fn token(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Token(token) => Some(token),
            ButtonAction::Url(_) => None,
        }
    }
}

/// Rows of buttons
pub type Keyboard = Vec<Vec<Button>>;

/// One outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Prompt {
        text: String,
        buttons: Keyboard,
    },
    Verdict {
        summary: TripSummary,
        result: VerdictResult,
        buttons: Keyboard,
    },
    Timing {
        result: TimingResult,
        buttons: Keyboard,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Prompt {
            text: text.into(),
            buttons: vec![],
        }
    }

    pub fn prompt(text: impl Into<String>, buttons: Keyboard) -> Self {
        Reply::Prompt {
            text: text.into(),
            buttons,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn buttons(&self) -> &Keyboard {
        match self {
            Reply::Prompt { buttons, .. }
            | Reply::Verdict { buttons, .. }
            | Reply::Timing { buttons, .. } => buttons,
        }
    }

    /// Plain-text rendering for transports without rich formatting
    pub fn render(&self) -> String {
        match self {
            Reply::Prompt { text, .. } => text.clone(),
            Reply::Verdict {
                summary, result, ..
            } => render_verdict(summary, result),
            Reply::Timing { result, .. } => render_timing(result),
        }
    }
}

fn render_verdict(summary: &TripSummary, result: &VerdictResult) -> String {
    let mut out = String::from("✈️ Airlo Trip Check\n\nRoute\n");
    let _ = writeln!(out, "{} → {}", summary.departure, summary.destination);
    let _ = writeln!(
        out,
        "{} · {} priority",
        summary.trip_type.label(),
        summary.priority
    );
    if let Some(price) = &summary.price {
        let _ = writeln!(out, "Price: {price}");
    }

    let _ = write!(out, "\nVerdict\n{}\n\nWhy this matters\n", result.verdict);
    for reason in &result.reasons {
        let _ = writeln!(out, "• {reason}");
    }
    out.push_str("\nSmarter options\n");
    for option in &result.options {
        let _ = writeln!(out, "• {option}");
    }
    out.push_str("\nBest next step\nRe-check closer to the optimal booking window.");
    out
}

fn render_timing(result: &TimingResult) -> String {
    let mut out = String::from("⏱ Airlo Timing Insight\n\n");
    let _ = write!(
        out,
        "Recommended booking window\n{}\n\nWhy\n",
        result.booking_window
    );
    for why in &result.why {
        let _ = writeln!(out, "• {why}");
    }
    out.push_str("\nAvoid\n");
    for avoid in &result.avoid {
        let _ = writeln!(out, "• {avoid}");
    }
    let _ = write!(out, "\nTip\n{}", result.tip);
    out
}
