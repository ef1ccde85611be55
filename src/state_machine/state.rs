//! Conversation state types

use crate::access::AccessStatus;
use crate::answers::{TimingDraft, TripCheckDraft};
use crate::preferences::Preferences;
use crate::session::{UserId, UserSession};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Steps
// ============================================================================

/// Steps of the trip-check graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripStep {
    TripType,
    DepRegion,
    /// UK area menu
    DepArea,
    DepLondonAirport,
    DepTyped,
    DestRegion,
    /// European shortlist
    DestPick,
    DestTyped,
    TravelWindow,
    Priority,
    AskPrice,
    PriceTyped,
    /// Terminal; the verdict has been rendered
    Done,
}

impl TripStep {
    pub const ENTRY: TripStep = TripStep::TripType;

    pub fn name(self) -> &'static str {
        match self {
            TripStep::TripType => "TRIP_TYPE",
            TripStep::DepRegion => "DEP_REGION",
            TripStep::DepArea => "DEP_AREA",
            TripStep::DepLondonAirport => "DEP_LONDON_AIRPORT",
            TripStep::DepTyped => "DEP_TYPED",
            TripStep::DestRegion => "DEST_REGION",
            TripStep::DestPick => "DEST_PICK",
            TripStep::DestTyped => "DEST_TYPED",
            TripStep::TravelWindow => "TRAVEL_WINDOW",
            TripStep::Priority => "PRIORITY",
            TripStep::AskPrice => "ASK_PRICE",
            TripStep::PriceTyped => "PRICE_TYPED",
            TripStep::Done => "DONE",
        }
    }

    /// Steps that consume free text instead of a button
    pub fn expects_text(self) -> bool {
        matches!(
            self,
            TripStep::DepTyped | TripStep::DestTyped | TripStep::PriceTyped
        )
    }
}

/// Steps of the timing graph; strictly linear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimingStep {
    #[serde(rename = "WHEN_ROUTE_TYPE")]
    RouteType,
    #[serde(rename = "WHEN_TRAVEL_WINDOW")]
    TravelWindow,
    #[serde(rename = "WHEN_FLEX")]
    Flex,
    #[serde(rename = "WHEN_DONE")]
    Done,
}

impl TimingStep {
    pub const ENTRY: TimingStep = TimingStep::RouteType;

    pub fn name(self) -> &'static str {
        match self {
            TimingStep::RouteType => "WHEN_ROUTE_TYPE",
            TimingStep::TravelWindow => "WHEN_TRAVEL_WINDOW",
            TimingStep::Flex => "WHEN_FLEX",
            TimingStep::Done => "WHEN_DONE",
        }
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Conversation state
///
/// Answers live inside the flow variant, so a session can never hold slots
/// belonging to a flow other than the active one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum ConvState {
    /// No flow in progress
    #[default]
    Idle,

    TripCheck {
        step: TripStep,
        answers: TripCheckDraft,
    },

    Timing {
        step: TimingStep,
        answers: TimingDraft,
    },
}

impl ConvState {
    /// Entry state of the trip-check graph with no answers
    pub fn trip_check() -> Self {
        ConvState::TripCheck {
            step: TripStep::ENTRY,
            answers: TripCheckDraft::default(),
        }
    }

    /// Entry state of the timing graph with no answers
    pub fn timing() -> Self {
        ConvState::Timing {
            step: TimingStep::ENTRY,
            answers: TimingDraft::default(),
        }
    }

    pub fn step_name(&self) -> &'static str {
        match self {
            ConvState::Idle => "IDLE",
            ConvState::TripCheck { step, .. } => step.name(),
            ConvState::Timing { step, .. } => step.name(),
        }
    }

    pub fn expects_text(&self) -> bool {
        matches!(self, ConvState::TripCheck { step, .. } if step.expects_text())
    }
}

// ============================================================================
// Transition Context
// ============================================================================

/// Read-only inputs to a transition, captured at the time of the event
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub user_id: UserId,
    pub preferences: Preferences,
    pub has_access: bool,
    pub access_status: AccessStatus,
    /// Link shown on upgrade prompts
    pub upgrade_url: String,
}

impl ConvContext {
    pub fn new(
        user_id: UserId,
        session: &UserSession,
        now: DateTime<Utc>,
        upgrade_url: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            preferences: session.preferences.clone(),
            has_access: session.has_access_at(now),
            access_status: session.access_status_at(now),
            upgrade_url: upgrade_url.into(),
        }
    }
}
