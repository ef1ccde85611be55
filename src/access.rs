//! Time-boxed access gating
//!
//! A grant stores an absolute expiry. Checks always compare against the
//! clock's current time, and a new grant replaces any previous one.

use crate::clock::Clock;
use crate::session::{SessionStore, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const TRIAL_DAYS: i64 = 7;
pub const PREMIUM_DAYS: i64 = 30;

/// Named access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    Trial,
    Premium,
}

impl AccessTier {
    /// Grant length used when no explicit duration is given
    pub fn default_days(self) -> i64 {
        match self {
            AccessTier::Trial => TRIAL_DAYS,
            AccessTier::Premium => PREMIUM_DAYS,
        }
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessTier::Trial => f.write_str("trial"),
            AccessTier::Premium => f.write_str("premium"),
        }
    }
}

/// Access tier with an absolute expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub tier: AccessTier,
    pub expires_at: DateTime<Utc>,
}

impl AccessGrant {
    pub fn new(tier: AccessTier, duration_days: i64, now: DateTime<Utc>) -> Self {
        Self {
            tier,
            expires_at: now + Duration::days(duration_days),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Deep-link codes recognized when the bot is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockCode {
    /// `trial7`
    Trial,
    /// `premium`; granted without payment verification for now
    Premium,
}

impl UnlockCode {
    /// Parse a start argument, ignoring case. Unknown codes yield `None`.
    pub fn parse(arg: &str) -> Option<Self> {
        match arg.trim().to_lowercase().as_str() {
            "trial7" => Some(UnlockCode::Trial),
            "premium" => Some(UnlockCode::Premium),
            _ => None,
        }
    }

    pub fn tier(self) -> AccessTier {
        match self {
            UnlockCode::Trial => AccessTier::Trial,
            UnlockCode::Premium => AccessTier::Premium,
        }
    }

    pub fn duration_days(self) -> i64 {
        self.tier().default_days()
    }
}

/// Reportable access state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    NoAccess,
    Expired,
    Active { tier: AccessTier, hours_remaining: i64 },
}

impl AccessStatus {
    /// Whole hours remaining are floored; zero displays as expired even while
    /// the grant is still technically valid.
    pub fn of(grant: Option<&AccessGrant>, now: DateTime<Utc>) -> Self {
        let Some(grant) = grant else {
            return AccessStatus::NoAccess;
        };

        let hours_remaining = (grant.expires_at - now).num_hours();
        if hours_remaining <= 0 {
            AccessStatus::Expired
        } else {
            AccessStatus::Active {
                tier: grant.tier,
                hours_remaining,
            }
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessStatus::NoAccess => {
                write!(f, "No access active.\n\nStart a subscription to keep using the bot.")
            }
            AccessStatus::Expired => {
                write!(f, "Access expired.\n\nRenew your subscription to continue.")
            }
            AccessStatus::Active {
                tier,
                hours_remaining,
            } => write!(f, "Access: {tier}\nExpires in ~{hours_remaining} hours"),
        }
    }
}

/// Keyed access operations over the session store
pub struct AccessGate<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S: SessionStore, C: Clock> AccessGate<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Grant `tier` for `duration_days` from now, replacing any prior grant
    pub async fn grant_access(
        &self,
        user_id: UserId,
        tier: AccessTier,
        duration_days: i64,
    ) -> AccessGrant {
        let now = self.clock.now();
        self.store
            .mutate(user_id, move |session| {
                session.grant(user_id, tier, duration_days, now)
            })
            .await
    }

    pub async fn has_access(&self, user_id: UserId) -> bool {
        let now = self.clock.now();
        self.store
            .get(user_id)
            .await
            .is_some_and(|session| session.has_access_at(now))
    }

    pub async fn status(&self, user_id: UserId) -> AccessStatus {
        let now = self.clock.now();
        match self.store.get(user_id).await {
            Some(session) => session.access_status_at(now),
            None => AccessStatus::NoAccess,
        }
    }

    pub async fn status_text(&self, user_id: UserId) -> String {
        self.status(user_id).await.to_string()
    }
}
