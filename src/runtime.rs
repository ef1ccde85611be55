//! Per-event runtime
//!
//! Each event runs inside the user's session lock: build the context, run
//! the pure transition, then apply its effects to the session.

mod executor;

pub use executor::BotRuntime;

use crate::clock::SystemClock;
use crate::session::InMemorySessionStore;

/// Runtime wired with the production store and clock
pub type ProductionRuntime = BotRuntime<InMemorySessionStore, SystemClock>;
