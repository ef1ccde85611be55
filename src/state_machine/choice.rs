//! Button choice tokens
//!
//! Every button carries a token; `Choice::parse` maps the wire token back to
//! a typed choice. Tokens that do not parse are surfaced as
//! `Event::UnknownToken` instead of being guessed at.

use crate::answers::{
    DepartureArea, DepartureRegion, DestinationRegion, EuropeCity, Flexibility, LondonAirport,
    RouteType, TimingWindow, TravelWindow, TripType,
};
use crate::preferences::{Priority, ANY_AIRPORT};

/// Default-airport presets offered in the settings menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirportPreset {
    AnyLondon,
    Heathrow,
    Gatwick,
    Manchester,
    Any,
}

impl AirportPreset {
    pub const ALL: [AirportPreset; 5] = [
        AirportPreset::AnyLondon,
        AirportPreset::Heathrow,
        AirportPreset::Gatwick,
        AirportPreset::Manchester,
        AirportPreset::Any,
    ];

    fn code(self) -> &'static str {
        match self {
            AirportPreset::AnyLondon => "LON",
            AirportPreset::Heathrow => "LHR",
            AirportPreset::Gatwick => "LGW",
            AirportPreset::Manchester => "MAN",
            AirportPreset::Any => "ANY",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    /// Value stored as the default departure airport
    pub fn airport(self) -> &'static str {
        match self {
            AirportPreset::Any => ANY_AIRPORT,
            other => other.code(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AirportPreset::AnyLondon => "Any London",
            AirportPreset::Any => "Any",
            other => other.code(),
        }
    }
}

/// A button the user can press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    // Menus
    StartMenu,
    ShowStatus,
    CheckStart,
    CheckInfo,
    WhenStart,
    WhenInfo,

    // Settings
    SettingsMenu,
    AirportMenu,
    SetAirport(AirportPreset),
    PriorityMenu,
    SetPriority(Priority),
    ResetPreferences,

    // Trip check
    TripType(TripType),
    DepartureRegion(DepartureRegion),
    DepartureArea(DepartureArea),
    LondonAirport(LondonAirport),
    DestinationRegion(DestinationRegion),
    /// Switch to typing the destination
    TypeDestination,
    Destination(EuropeCity),
    Window(TravelWindow),
    Priority(Priority),
    PriceYes,
    PriceNo,

    // Timing
    RouteType(RouteType),
    TimingWindow(TimingWindow),
    Flex(Flexibility),
}

type CodeParser = fn(&str) -> Option<Choice>;

/// Prefixed token families; `DEPAREA_`/`DEPAPT_` must precede `DEP_`
const PREFIXED: [(&str, CodeParser); 13] = [
    ("SET_AP_", |c| AirportPreset::from_code(c).map(Choice::SetAirport)),
    ("SET_PR_", |c| Priority::from_code(c).map(Choice::SetPriority)),
    ("TRIP_", |c| TripType::from_code(c).map(Choice::TripType)),
    ("DEPAREA_", |c| DepartureArea::from_code(c).map(Choice::DepartureArea)),
    ("DEPAPT_", |c| LondonAirport::from_code(c).map(Choice::LondonAirport)),
    ("DEP_", |c| DepartureRegion::from_code(c).map(Choice::DepartureRegion)),
    ("DST_", |c| DestinationRegion::from_code(c).map(Choice::DestinationRegion)),
    ("DEST_", |c| EuropeCity::from_code(c).map(Choice::Destination)),
    ("WIN_", |c| TravelWindow::from_code(c).map(Choice::Window)),
    ("PR_", |c| Priority::from_code(c).map(Choice::Priority)),
    ("WHEN_RT_", |c| RouteType::from_code(c).map(Choice::RouteType)),
    ("WHEN_TW_", |c| TimingWindow::from_code(c).map(Choice::TimingWindow)),
    ("WHEN_FX_", |c| Flexibility::from_code(c).map(Choice::Flex)),
];

impl Choice {
    pub fn parse(token: &str) -> Option<Self> {
        let exact = match token {
            "START_MENU" => Some(Choice::StartMenu),
            "SHOW_STATUS" => Some(Choice::ShowStatus),
            "CHECK_START" => Some(Choice::CheckStart),
            "CHECK_INFO" => Some(Choice::CheckInfo),
            "WHEN_START" => Some(Choice::WhenStart),
            "WHEN_INFO" => Some(Choice::WhenInfo),
            "SETTINGS_BACK" => Some(Choice::SettingsMenu),
            "SET_AIRPORT" => Some(Choice::AirportMenu),
            "SET_PRIORITY" => Some(Choice::PriorityMenu),
            "SET_RESET" => Some(Choice::ResetPreferences),
            // Both destination menus offer a "type it" button
            "DEST_TYPE" | "DST_TYPE" => Some(Choice::TypeDestination),
            "PRICE_YES" => Some(Choice::PriceYes),
            "PRICE_NO" => Some(Choice::PriceNo),
            _ => None,
        };
        if exact.is_some() {
            return exact;
        }

        PREFIXED.iter().find_map(|(prefix, parse)| {
            token
                .strip_prefix(prefix)
                .filter(|code| !code.is_empty())
                .and_then(parse)
        })
    }

    /// Wire token for this choice
    pub fn token(self) -> String {
        match self {
            Choice::StartMenu => "START_MENU".to_string(),
            Choice::ShowStatus => "SHOW_STATUS".to_string(),
            Choice::CheckStart => "CHECK_START".to_string(),
            Choice::CheckInfo => "CHECK_INFO".to_string(),
            Choice::WhenStart => "WHEN_START".to_string(),
            Choice::WhenInfo => "WHEN_INFO".to_string(),
            Choice::SettingsMenu => "SETTINGS_BACK".to_string(),
            Choice::AirportMenu => "SET_AIRPORT".to_string(),
            Choice::SetAirport(preset) => format!("SET_AP_{}", preset.code()),
            Choice::PriorityMenu => "SET_PRIORITY".to_string(),
            Choice::SetPriority(priority) => format!("SET_PR_{}", priority.code()),
            Choice::ResetPreferences => "SET_RESET".to_string(),
            Choice::TripType(trip_type) => format!("TRIP_{}", trip_type.code()),
            Choice::DepartureRegion(region) => format!("DEP_{}", region.code()),
            Choice::DepartureArea(area) => format!("DEPAREA_{}", area.code()),
            Choice::LondonAirport(airport) => format!("DEPAPT_{}", airport.code()),
            Choice::DestinationRegion(region) => format!("DST_{}", region.code()),
            Choice::TypeDestination => "DEST_TYPE".to_string(),
            Choice::Destination(city) => format!("DEST_{}", city.code()),
            Choice::Window(window) => format!("WIN_{}", window.code()),
            Choice::Priority(priority) => format!("PR_{}", priority.code()),
            Choice::PriceYes => "PRICE_YES".to_string(),
            Choice::PriceNo => "PRICE_NO".to_string(),
            Choice::RouteType(route) => format!("WHEN_RT_{}", route.code()),
            Choice::TimingWindow(window) => format!("WHEN_TW_{}", window.code()),
            Choice::Flex(flex) => format!("WHEN_FX_{}", flex.code()),
        }
    }

    /// Choices accepted in every state, independent of the active flow
    pub fn is_global(self) -> bool {
        matches!(
            self,
            Choice::StartMenu
                | Choice::ShowStatus
                | Choice::CheckStart
                | Choice::CheckInfo
                | Choice::WhenStart
                | Choice::WhenInfo
                | Choice::SettingsMenu
                | Choice::AirportMenu
                | Choice::SetAirport(_)
                | Choice::PriorityMenu
                | Choice::SetPriority(_)
                | Choice::ResetPreferences
        )
    }

    /// Every choice the bot can offer
    #[cfg(test)]
    pub fn all() -> Vec<Choice> {
        let mut all = vec![
            Choice::StartMenu,
            Choice::ShowStatus,
            Choice::CheckStart,
            Choice::CheckInfo,
            Choice::WhenStart,
            Choice::WhenInfo,
            Choice::SettingsMenu,
            Choice::AirportMenu,
            Choice::PriorityMenu,
            Choice::ResetPreferences,
            Choice::TypeDestination,
            Choice::PriceYes,
            Choice::PriceNo,
        ];
        all.extend(AirportPreset::ALL.map(Choice::SetAirport));
        all.extend(Priority::ALL.map(Choice::SetPriority));
        all.extend(Priority::ALL.map(Choice::Priority));
        all.extend(TripType::ALL.iter().copied().map(Choice::TripType));
        all.extend(DepartureRegion::ALL.iter().copied().map(Choice::DepartureRegion));
        all.extend(DepartureArea::ALL.iter().copied().map(Choice::DepartureArea));
        all.extend(LondonAirport::ALL.iter().copied().map(Choice::LondonAirport));
        all.extend(DestinationRegion::ALL.iter().copied().map(Choice::DestinationRegion));
        all.extend(EuropeCity::ALL.iter().copied().map(Choice::Destination));
        all.extend(TravelWindow::ALL.iter().copied().map(Choice::Window));
        all.extend(RouteType::ALL.iter().copied().map(Choice::RouteType));
        all.extend(TimingWindow::ALL.iter().copied().map(Choice::TimingWindow));
        all.extend(Flexibility::ALL.iter().copied().map(Choice::Flex));
        all
    }
}
