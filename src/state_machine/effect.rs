//! Effects produced by state transitions

use super::reply::Reply;
use crate::access::{AccessTier, UnlockCode};
use crate::preferences::PreferenceUpdate;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the user's access grant
    GrantAccess { tier: AccessTier, duration_days: i64 },

    /// Change saved preferences
    UpdatePreferences(PreferenceUpdate),

    /// Render something to the user
    Reply(Reply),
}

impl Effect {
    pub fn reply(reply: Reply) -> Self {
        Effect::Reply(reply)
    }

    pub fn unlock(code: UnlockCode) -> Self {
        Effect::GrantAccess {
            tier: code.tier(),
            duration_days: code.duration_days(),
        }
    }
}
