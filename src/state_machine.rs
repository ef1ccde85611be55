//! Conversation state machine
//!
//! Elm-style: `transition` is pure and returns the new state plus effects.
//! The runtime owns applying them.

mod choice;
mod effect;
pub mod event;
mod prompts;
mod reply;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use reply::Reply;
pub use state::{ConvContext, ConvState};
pub use transition::transition;
