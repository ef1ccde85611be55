//! API request and response types

use crate::access::AccessTier;
use crate::preferences::Priority;
use crate::state_machine::{Event, Reply};
use serde::{Deserialize, Serialize};

/// Inbound chat event
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundEvent {
    Command {
        name: String,
        #[serde(default)]
        args: Vec<String>,
    },
    Choice {
        token: String,
    },
    Text {
        text: String,
    },
}

impl From<InboundEvent> for Event {
    fn from(inbound: InboundEvent) -> Self {
        match inbound {
            InboundEvent::Command { name, args } => Event::command(&name, &args),
            InboundEvent::Choice { token } => Event::choice_token(&token),
            InboundEvent::Text { text } => Event::text(text),
        }
    }
}

/// A reply plus its plain-text rendering
#[derive(Debug, Serialize)]
pub struct OutboundReply {
    #[serde(flatten)]
    pub reply: Reply,
    pub rendered: String,
}

impl From<Reply> for OutboundReply {
    fn from(reply: Reply) -> Self {
        Self {
            rendered: reply.render(),
            reply,
        }
    }
}

/// Render instructions for one event
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub replies: Vec<OutboundReply>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub has_access: bool,
    pub status: String,
}

/// Grant made outside the chat, e.g. after a payment callback
#[derive(Debug, Deserialize)]
pub struct GrantAccessRequest {
    pub tier: AccessTier,
    /// Defaults to the tier's standard length
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub departure_airport: Option<String>,
    pub priority: Option<Priority>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
