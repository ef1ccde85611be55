//! Per-user sessions
//!
//! A session is created lazily on first interaction and lives for the
//! lifetime of the process.

mod store;

pub use store::{InMemorySessionStore, SessionStore};

use crate::access::{AccessGrant, AccessStatus, AccessTier};
use crate::preferences::{PreferenceUpdate, Preferences};
use crate::state_machine::ConvState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque chat user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the bot knows about one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    /// Current flow, step and collected answers
    pub state: ConvState,
    pub preferences: Preferences,
    /// Most recent access grant, if any
    pub access: Option<AccessGrant>,
}

impl UserSession {
    pub fn has_access_at(&self, now: DateTime<Utc>) -> bool {
        self.access.as_ref().is_some_and(|grant| grant.is_active(now))
    }

    pub fn access_status_at(&self, now: DateTime<Utc>) -> AccessStatus {
        AccessStatus::of(self.access.as_ref(), now)
    }

    /// Replace any existing grant with `tier` for `duration_days` from `now`
    pub fn grant(
        &mut self,
        user_id: UserId,
        tier: AccessTier,
        duration_days: i64,
        now: DateTime<Utc>,
    ) -> AccessGrant {
        let grant = AccessGrant::new(tier, duration_days, now);
        tracing::info!(
            user_id = %user_id,
            tier = %tier,
            expires_at = %grant.expires_at,
            "Access granted"
        );
        self.access = Some(grant.clone());
        grant
    }

    pub fn apply(&mut self, user_id: UserId, update: PreferenceUpdate) {
        tracing::debug!(user_id = %user_id, update = ?update, "Updating preferences");
        update.apply(&mut self.preferences);
    }
}
