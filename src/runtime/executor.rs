//! Bot runtime executor

use crate::clock::Clock;
use crate::session::{SessionStore, UserId, UserSession};
use crate::state_machine::{transition, ConvContext, Effect, Event, Reply};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Drives the state machine for every user over a shared session store
pub struct BotRuntime<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    upgrade_url: String,
}

impl<S, C> BotRuntime<S, C>
where
    S: SessionStore + 'static,
    C: Clock + 'static,
{
    pub fn new(store: Arc<S>, clock: Arc<C>, upgrade_url: impl Into<String>) -> Self {
        Self {
            store,
            clock,
            upgrade_url: upgrade_url.into(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Handle one inbound event and return what to render, in order.
    /// Events for the same user are serialized by the store.
    pub async fn handle_event(&self, user_id: UserId, event: Event) -> Vec<Reply> {
        let now = self.clock.now();
        let upgrade_url = self.upgrade_url.as_str();
        self.store
            .mutate(user_id, move |session| {
                process_event(session, user_id, event, now, upgrade_url)
            })
            .await
    }
}

/// Run a transition against a locked session and apply its effects
pub(crate) fn process_event(
    session: &mut UserSession,
    user_id: UserId,
    event: Event,
    now: DateTime<Utc>,
    upgrade_url: &str,
) -> Vec<Reply> {
    let context = ConvContext::new(user_id, session, now, upgrade_url);

    let result = match transition(&session.state, &context, event) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(
                user_id = %context.user_id,
                step = session.state.step_name(),
                error = %e,
                "Rejected event"
            );
            return vec![e.fallback()];
        }
    };

    if result.new_state != session.state {
        tracing::debug!(
            user_id = %user_id,
            from = session.state.step_name(),
            to = result.new_state.step_name(),
            "State transition"
        );
    }
    session.state = result.new_state;

    let mut replies = Vec::new();
    for effect in result.effects {
        match effect {
            Effect::GrantAccess {
                tier,
                duration_days,
            } => {
                session.grant(user_id, tier, duration_days, now);
            }
            Effect::UpdatePreferences(update) => session.apply(user_id, update),
            Effect::Reply(reply) => replies.push(reply),
        }
    }
    replies
}
