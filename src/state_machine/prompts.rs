//! Prompt texts and keyboards

use super::choice::{AirportPreset, Choice};
use super::reply::{Button, Keyboard, Reply};
use crate::access::AccessStatus;
use crate::answers::{
    DepartureArea, DepartureRegion, DestinationRegion, EuropeCity, Flexibility, LondonAirport,
    RouteType, TimingWindow, TravelWindow, TripType,
};
use crate::preferences::{Preferences, Priority};

const UPGRADE_LABEL: &str = "Upgrade to Airlo (£19/month) 🔓";

/// One button per row
fn column(buttons: impl IntoIterator<Item = Button>) -> Keyboard {
    buttons.into_iter().map(|b| vec![b]).collect()
}

/// Two buttons per row
fn pairs(buttons: impl IntoIterator<Item = Button>) -> Keyboard {
    let buttons: Vec<Button> = buttons.into_iter().collect();
    buttons.chunks(2).map(<[Button]>::to_vec).collect()
}

fn back(label: &str, to: Choice) -> Vec<Button> {
    vec![Button::choice(label, to)]
}

// ============================================================================
// Menus
// ============================================================================

fn menu_buttons() -> Keyboard {
    column([
        Button::choice("✅ Trip Check", Choice::CheckStart),
        Button::choice("⏱ Best Time to Book", Choice::WhenStart),
        Button::choice("⚙️ Preferences", Choice::SettingsMenu),
        Button::choice("📌 Status", Choice::ShowStatus),
    ])
}

pub fn welcome() -> Reply {
    Reply::prompt(
        "✈️ Welcome to Airlo\n\n\
         We help you avoid peak-day markups, bad routings, and booking at the wrong time.\n\n\
         Pick what you need:",
        menu_buttons(),
    )
}

pub fn main_menu() -> Reply {
    Reply::prompt("✈️ Welcome to Airlo\n\nPick what you need:", menu_buttons())
}

pub fn help() -> Reply {
    Reply::text(
        "Available commands:\n\n\
         /check — Trip sanity check (timing / route / options)\n\
         /when — Best booking window (rule-based)\n\
         /settings — Set default airport + priority\n\
         /status — Access status + upgrade\n\
         /help — This menu",
    )
}

pub fn upgrade(upgrade_url: &str) -> Reply {
    Reply::prompt(
        "🔒 Airlo access required\n\n\
         Your trial has ended (or no access is active).\n\
         Upgrade to continue using Trip Check + timing tools:",
        vec![vec![Button::url(UPGRADE_LABEL, upgrade_url)]],
    )
}

/// Short notice shown in place of a flow when access is missing
pub fn access_required() -> Reply {
    Reply::text("🔒 Airlo access required.")
}

/// Status text, with an upgrade link when nothing is active
pub fn status(status: AccessStatus, has_access: bool, upgrade_url: &str) -> Reply {
    if has_access {
        Reply::text(status.to_string())
    } else {
        Reply::prompt(
            status.to_string(),
            vec![vec![Button::url(UPGRADE_LABEL, upgrade_url)]],
        )
    }
}

/// Status opened from the menu, with a way back
pub fn status_with_back(status: AccessStatus) -> Reply {
    Reply::prompt(status.to_string(), vec![back("Back ◀️", Choice::StartMenu)])
}

pub fn check_intro() -> Reply {
    Reply::prompt(
        "✅ Trip Check\n\nQuick questions — then you’ll get a fare/timing sanity check.",
        column([
            Button::choice("Start Trip Check ✅", Choice::CheckStart),
            Button::choice("What this does ℹ️", Choice::CheckInfo),
        ]),
    )
}

pub fn check_info() -> Reply {
    Reply::prompt(
        "Airlo reviews your route, timing, and options to help you avoid overpriced or inefficient bookings.",
        vec![back("Start Trip Check ✅", Choice::CheckStart)],
    )
}

pub fn when_intro() -> Reply {
    Reply::prompt(
        "⏱ Best Time to Book\n\nAnswer a few questions and Airlo will suggest the optimal booking window.",
        column([
            Button::choice("Start ⏱", Choice::WhenStart),
            Button::choice("What this does ℹ️", Choice::WhenInfo),
        ]),
    )
}

pub fn when_info() -> Reply {
    Reply::prompt(
        "Airlo suggests the best booking window based on route type, seasonality, and flexibility.",
        vec![back("Start ⏱", Choice::WhenStart)],
    )
}

// ============================================================================
// Settings
// ============================================================================

pub fn settings(prefs: &Preferences) -> Reply {
    Reply::prompt(
        format!(
            "⚙️ Preferences\n\n\
             Departure airport: {}\n\
             Travel priority: {}\n\n\
             Update your preferences below.",
            prefs.departure_airport, prefs.priority
        ),
        column([
            Button::choice("Departure airport ✈️", Choice::AirportMenu),
            Button::choice("Travel priority 🎯", Choice::PriorityMenu),
            Button::choice("Reset preferences ♻️", Choice::ResetPreferences),
            Button::choice("Back ◀️", Choice::StartMenu),
        ]),
    )
}

pub fn airport_menu() -> Reply {
    let mut buttons = vec![
        vec![Button::choice(
            AirportPreset::AnyLondon.label(),
            Choice::SetAirport(AirportPreset::AnyLondon),
        )],
        vec![
            Button::choice(
                AirportPreset::Heathrow.label(),
                Choice::SetAirport(AirportPreset::Heathrow),
            ),
            Button::choice(
                AirportPreset::Gatwick.label(),
                Choice::SetAirport(AirportPreset::Gatwick),
            ),
        ],
    ];
    buttons.extend(column([
        Button::choice(
            AirportPreset::Manchester.label(),
            Choice::SetAirport(AirportPreset::Manchester),
        ),
        Button::choice(AirportPreset::Any.label(), Choice::SetAirport(AirportPreset::Any)),
        Button::choice("Back ◀️", Choice::SettingsMenu),
    ]));
    Reply::prompt("Select your default departure airport:", buttons)
}

pub fn priority_menu() -> Reply {
    let mut buttons = column(
        Priority::ALL.map(|priority| Button::choice(priority.label(), Choice::SetPriority(priority))),
    );
    buttons.push(back("Back ◀️", Choice::SettingsMenu));
    Reply::prompt("Select your default travel priority:", buttons)
}

fn back_to_settings(text: String) -> Reply {
    Reply::prompt(text, vec![back("Back to settings ⚙️", Choice::SettingsMenu)])
}

pub fn airport_saved(airport: &str) -> Reply {
    back_to_settings(format!("✅ Departure airport set to {airport}"))
}

pub fn priority_saved(priority: Priority) -> Reply {
    back_to_settings(format!("✅ Travel priority set to {priority}"))
}

pub fn preferences_reset() -> Reply {
    back_to_settings("♻️ Preferences reset to default.".to_string())
}

// ============================================================================
// Trip Check Questions
// ============================================================================

pub fn ask_trip_type() -> Reply {
    Reply::prompt(
        "What type of trip is this?",
        column([
            Button::choice("Return 🔁", Choice::TripType(TripType::Return)),
            Button::choice("One-way ➡️", Choice::TripType(TripType::OneWay)),
        ]),
    )
}

pub fn ask_departure_region() -> Reply {
    Reply::prompt(
        "Where are you departing from?",
        column(DepartureRegion::ALL.iter().map(|&region| {
            let flag = match region {
                DepartureRegion::Uk => "🇬🇧",
                DepartureRegion::Europe => "🇪🇺",
                DepartureRegion::Usa => "🇺🇸",
                DepartureRegion::Other => "🌍",
            };
            Button::choice(
                format!("{} {flag}", region.label()),
                Choice::DepartureRegion(region),
            )
        })),
    )
}

pub fn ask_departure_area() -> Reply {
    Reply::prompt(
        "Select your departure area:",
        column(
            DepartureArea::ALL
                .iter()
                .map(|&area| Button::choice(area.label(), Choice::DepartureArea(area))),
        ),
    )
}

pub fn ask_london_airport() -> Reply {
    Reply::prompt(
        "Which London airport?",
        pairs(
            LondonAirport::ALL
                .iter()
                .map(|&airport| Button::choice(airport.label(), Choice::LondonAirport(airport))),
        ),
    )
}

pub fn ask_departure_typed() -> Reply {
    Reply::text("Type your departure city/airport (e.g., Paris CDG):")
}

pub fn ask_destination_region() -> Reply {
    let mut buttons = column(DestinationRegion::ALL.iter().map(|&region| {
        let flag = match region {
            DestinationRegion::Europe => "🇪🇺",
            DestinationRegion::Usa => "🇺🇸",
            DestinationRegion::Asia => "🌏",
            DestinationRegion::MiddleEast | DestinationRegion::Other => "🌍",
        };
        Button::choice(
            format!("{} {flag}", region.label()),
            Choice::DestinationRegion(region),
        )
    }));
    buttons.push(back("Type a city", Choice::TypeDestination));
    Reply::prompt("Where are you travelling to?", buttons)
}

pub fn ask_destination_pick() -> Reply {
    let mut buttons = pairs(
        EuropeCity::ALL
            .iter()
            .map(|&city| Button::choice(city.label(), Choice::Destination(city))),
    );
    buttons.push(back("Type a city", Choice::TypeDestination));
    Reply::prompt("Choose a destination (or type):", buttons)
}

pub fn ask_destination_typed() -> Reply {
    Reply::text("Type your destination city/airport:")
}

pub fn ask_travel_window() -> Reply {
    Reply::prompt(
        "When are you travelling?",
        column(
            TravelWindow::ALL
                .iter()
                .map(|&window| Button::choice(window.label(), Choice::Window(window))),
        ),
    )
}

pub fn ask_priority() -> Reply {
    Reply::prompt(
        "What matters most?",
        column(
            Priority::ALL.map(|priority| Button::choice(priority.label(), Choice::Priority(priority))),
        ),
    )
}

pub fn ask_price() -> Reply {
    Reply::prompt(
        "Do you have a price you’re considering?",
        column([
            Button::choice("Yes (type £ amount)", Choice::PriceYes),
            Button::choice("No", Choice::PriceNo),
        ]),
    )
}

pub fn ask_price_typed() -> Reply {
    Reply::text("Type the total price (e.g. £340):")
}

pub fn generating_verdict() -> Reply {
    Reply::text("Thanks — generating your Airlo Trip Check ✅")
}

pub fn verdict_buttons() -> Keyboard {
    column([
        Button::choice("Run another check 🔁", Choice::CheckStart),
        Button::choice("Preferences ⚙️", Choice::SettingsMenu),
        Button::choice("Best time to book ⏱", Choice::WhenStart),
    ])
}

// ============================================================================
// Timing Questions
// ============================================================================

pub fn ask_route_type() -> Reply {
    Reply::prompt(
        "What kind of route is this?",
        column(
            RouteType::ALL
                .iter()
                .map(|&route| Button::choice(route.label(), Choice::RouteType(route))),
        ),
    )
}

pub fn ask_timing_window() -> Reply {
    Reply::prompt(
        "When are you travelling?",
        column(
            TimingWindow::ALL
                .iter()
                .map(|&window| Button::choice(window.label(), Choice::TimingWindow(window))),
        ),
    )
}

pub fn ask_flex() -> Reply {
    Reply::prompt(
        "How flexible are you?",
        column(
            Flexibility::ALL
                .iter()
                .map(|&flex| Button::choice(flex.label(), Choice::Flex(flex))),
        ),
    )
}

pub fn timing_buttons() -> Keyboard {
    column([
        Button::choice("Run a Trip Check ✈️", Choice::CheckStart),
        Button::choice("Back ◀️", Choice::StartMenu),
    ])
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Shown for a button that does not fit the current step
pub fn choice_fallback() -> Reply {
    Reply::prompt(
        "Use /start to begin.",
        vec![back("Start ◀️", Choice::StartMenu)],
    )
}

/// Shown for free text outside a typed step
pub fn text_fallback() -> Reply {
    Reply::text("Use /start to begin. Or /help for commands.")
}
