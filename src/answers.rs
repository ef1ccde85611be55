//! Answer vocabulary for both flows
//!
//! Each categorical answer carries the short code used in choice tokens and
//! the label shown on its button.

use crate::preferences::Priority;
use serde::{Deserialize, Serialize};

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }
        }
    };
}

coded_enum! {
    pub enum TripType {
        Return => ("RETURN", "Return"),
        OneWay => ("ONEWAY", "One-way"),
    }
}

coded_enum! {
    pub enum DepartureRegion {
        Uk => ("UK", "UK & Ireland"),
        Europe => ("EU", "Europe"),
        Usa => ("US", "USA"),
        Other => ("OTHER", "Other"),
    }
}

coded_enum! {
    /// UK departure areas offered before asking for a specific airport
    pub enum DepartureArea {
        London => ("LONDON", "London"),
        Manchester => ("MAN", "Manchester"),
        Birmingham => ("BHX", "Birmingham"),
        Typed => ("TYPE", "Other (type it)"),
    }
}

coded_enum! {
    pub enum LondonAirport {
        Heathrow => ("LHR", "LHR"),
        Gatwick => ("LGW", "LGW"),
        Stansted => ("STN", "STN"),
        Luton => ("LTN", "LTN"),
        City => ("LCY", "LCY"),
        Any => ("ANY", "Any London"),
    }
}

coded_enum! {
    pub enum DestinationRegion {
        Europe => ("EU", "Europe"),
        Usa => ("US", "USA"),
        MiddleEast => ("ME", "Middle East"),
        Asia => ("AS", "Asia"),
        Other => ("OTHER", "Other"),
    }
}

coded_enum! {
    /// Shortlist offered for European destinations
    pub enum EuropeCity {
        Paris => ("PARIS", "Paris"),
        Rome => ("ROME", "Rome"),
        Barcelona => ("BARCELONA", "Barcelona"),
        Amsterdam => ("AMSTERDAM", "Amsterdam"),
    }
}

coded_enum! {
    /// How far away the trip is
    pub enum TravelWindow {
        ZeroToTwoWeeks => ("0_2", "Next 2 weeks"),
        TwoToSixWeeks => ("2_6", "2–6 weeks"),
        OneToThreeMonths => ("1_3", "1–3 months"),
        ThreePlusMonths => ("3P", "3+ months"),
        NotSure => ("NS", "Not sure"),
    }
}

coded_enum! {
    pub enum RouteType {
        ShortHaul => ("SHORT", "Short-haul (Europe)"),
        LongHaul => ("LONG", "Long-haul"),
        Domestic => ("DOM", "Domestic"),
        NotSure => ("NS", "Not sure"),
    }
}

coded_enum! {
    /// When the trip happens, as asked by the timing flow
    pub enum TimingWindow {
        NextMonth => ("NM", "Next month"),
        TwoToThreeMonths => ("2_3", "2–3 months"),
        FourToSixMonths => ("4_6", "4–6 months"),
        Peak => ("PEAK", "Peak season"),
        NotSure => ("NS", "Not sure"),
    }
}

coded_enum! {
    pub enum Flexibility {
        VeryFlexible => ("VF", "Very flexible"),
        SomewhatFlexible => ("SF", "Somewhat flexible"),
        Fixed => ("FX", "Fixed dates"),
    }
}

impl LondonAirport {
    /// Departure value recorded for this choice
    pub fn departure(self) -> &'static str {
        match self {
            LondonAirport::Any => "ANY LONDON",
            other => other.code(),
        }
    }
}

/// Trip-check answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCheckDraft {
    pub trip_type: Option<TripType>,
    pub departure_region: Option<DepartureRegion>,
    pub departure: Option<String>,
    pub destination_region: Option<DestinationRegion>,
    pub destination: Option<String>,
    pub window: Option<TravelWindow>,
    pub priority: Option<Priority>,
    pub price: Option<String>,
}

/// A finished trip check, ready for the verdict engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCheckAnswers {
    pub trip_type: TripType,
    pub departure_region: DepartureRegion,
    pub departure: String,
    /// Absent when the destination was typed without picking a region
    pub destination_region: Option<DestinationRegion>,
    pub destination: String,
    pub window: TravelWindow,
    pub priority: Priority,
    /// Free text, never parsed
    pub price: Option<String>,
}

impl TripCheckDraft {
    /// All required slots filled, or `None`
    pub fn complete(&self) -> Option<TripCheckAnswers> {
        Some(TripCheckAnswers {
            trip_type: self.trip_type?,
            departure_region: self.departure_region?,
            departure: self.departure.clone()?,
            destination_region: self.destination_region,
            destination: self.destination.clone()?,
            window: self.window?,
            priority: self.priority?,
            price: self.price.clone(),
        })
    }
}

/// Timing answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingDraft {
    pub route_type: Option<RouteType>,
    pub travel_window: Option<TimingWindow>,
    pub flex: Option<Flexibility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingAnswers {
    pub route_type: RouteType,
    pub travel_window: TimingWindow,
    pub flex: Flexibility,
}

impl TimingDraft {
    pub fn complete(&self) -> Option<TimingAnswers> {
        Some(TimingAnswers {
            route_type: self.route_type?,
            travel_window: self.travel_window?,
            flex: self.flex?,
        })
    }
}
