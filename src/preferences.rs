//! Per-user travel preferences
//!
//! Preferences live inside the user's session. Airport codes are stored
//! verbatim, without validation.

use crate::session::{SessionStore, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Placeholder airport meaning "no default departure airport"
pub const ANY_AIRPORT: &str = "Any";

/// What the traveller optimises for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Cheapest,
    #[default]
    Balanced,
    Fastest,
    Comfort,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Cheapest,
        Priority::Balanced,
        Priority::Fastest,
        Priority::Comfort,
    ];

    /// Short code used in choice tokens
    pub fn code(self) -> &'static str {
        match self {
            Priority::Cheapest => "CHEAP",
            Priority::Balanced => "BAL",
            Priority::Fastest => "FAST",
            Priority::Comfort => "COMF",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Cheapest => "Cheapest",
            Priority::Balanced => "Balanced",
            Priority::Fastest => "Fastest",
            Priority::Comfort => "Comfort",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Saved defaults consulted when rendering results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub departure_airport: String,
    pub priority: Priority,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            departure_airport: ANY_AIRPORT.to_string(),
            priority: Priority::Balanced,
        }
    }
}

impl Preferences {
    /// Whether a concrete default airport has been chosen
    pub fn has_airport(&self) -> bool {
        !matches!(self.departure_airport.as_str(), "Any" | "ANY")
    }
}

/// A single change to a user's preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceUpdate {
    Airport(String),
    Priority(Priority),
    Reset,
}

impl PreferenceUpdate {
    pub fn apply(self, prefs: &mut Preferences) {
        match self {
            PreferenceUpdate::Airport(code) => prefs.departure_airport = code,
            PreferenceUpdate::Priority(priority) => prefs.priority = priority,
            PreferenceUpdate::Reset => *prefs = Preferences::default(),
        }
    }
}

/// Keyed access to preferences through the session store
pub struct PreferenceStore<S> {
    store: Arc<S>,
}

impl<S: SessionStore> PreferenceStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Read preferences, creating the session with defaults if needed
    pub async fn get_preferences(&self, user_id: UserId) -> Preferences {
        self.store.get_or_create(user_id).await.preferences
    }

    #[allow(dead_code)] // Used in tests
    pub async fn set_airport(&self, user_id: UserId, code: impl Into<String>) -> Preferences {
        self.update(user_id, vec![PreferenceUpdate::Airport(code.into())])
            .await
    }

    #[allow(dead_code)] // Used in tests
    pub async fn set_priority(&self, user_id: UserId, priority: Priority) -> Preferences {
        self.update(user_id, vec![PreferenceUpdate::Priority(priority)])
            .await
    }

    pub async fn reset_preferences(&self, user_id: UserId) -> Preferences {
        self.update(user_id, vec![PreferenceUpdate::Reset]).await
    }

    /// Apply updates in order under one lock and return the result
    pub async fn update(&self, user_id: UserId, updates: Vec<PreferenceUpdate>) -> Preferences {
        self.store
            .mutate(user_id, move |session| {
                for update in updates {
                    session.apply(user_id, update);
                }
                session.preferences.clone()
            })
            .await
    }
}
