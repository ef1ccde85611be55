//! HTTP transport
//!
//! A webhook-style JSON API standing in for the chat platform. It turns
//! requests into events for the runtime and owns no conversation logic.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::access::AccessGate;
use crate::clock::SystemClock;
use crate::preferences::PreferenceStore;
use crate::runtime::{BotRuntime, ProductionRuntime};
use crate::session::InMemorySessionStore;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntime>,
    pub access: Arc<AccessGate<InMemorySessionStore, SystemClock>>,
    pub preferences: Arc<PreferenceStore<InMemorySessionStore>>,
    /// Expected `X-Bot-Token` value
    pub bot_token: Arc<str>,
}

impl AppState {
    pub fn new(bot_token: &str, upgrade_url: &str) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let clock = Arc::new(SystemClock);

        Self {
            runtime: Arc::new(BotRuntime::new(
                Arc::clone(&store),
                Arc::clone(&clock),
                upgrade_url,
            )),
            access: Arc::new(AccessGate::new(Arc::clone(&store), clock)),
            preferences: Arc::new(PreferenceStore::new(store)),
            bot_token: Arc::from(bot_token),
        }
    }
}
