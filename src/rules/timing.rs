//! Timing-window engine
//!
//! Overlays apply in a fixed order: route type, travel window, flexibility,
//! priority. A later overlay wins wherever two write the same field.

use crate::answers::{Flexibility, RouteType, TimingAnswers, TimingWindow};
use crate::preferences::Priority;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingResult {
    pub booking_window: String,
    pub why: [String; 3],
    pub avoid: [String; 2],
    pub tip: String,
}

impl TimingResult {
    fn baseline() -> Self {
        Self {
            booking_window: "3–6 weeks before departure".to_string(),
            why: [
                "Fares often stabilise in this window once airlines have clearer demand signals."
                    .to_string(),
                "Mid-week inventory typically prices cleaner than Fri–Sun peak demand.".to_string(),
                "Booking too early can lock in inflated early-season pricing.".to_string(),
            ],
            avoid: [
                "Booking on weekends".to_string(),
                "Locking in too early without fixed dates".to_string(),
            ],
            tip: "If you can, aim for Tue–Wed departures and compare nearby airports.".to_string(),
        }
    }
}

/// A single field write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimingPatch {
    BookingWindow(&'static str),
    Why(usize, &'static str),
    Avoid([&'static str; 2]),
    Tip(&'static str),
}

impl TimingPatch {
    fn apply(self, result: &mut TimingResult) {
        match self {
            TimingPatch::BookingWindow(window) => result.booking_window = window.to_string(),
            TimingPatch::Why(index, text) => {
                if let Some(slot) = result.why.get_mut(index) {
                    *slot = text.to_string();
                }
            }
            TimingPatch::Avoid(avoid) => result.avoid = avoid.map(str::to_string),
            TimingPatch::Tip(tip) => result.tip = tip.to_string(),
        }
    }
}

pub fn evaluate_timing_window(answers: &TimingAnswers, priority_hint: Priority) -> TimingResult {
    let overlays = [
        route_overlay(answers.route_type),
        window_overlay(answers.travel_window),
        flex_overlay(answers.flex),
        priority_overlay(priority_hint),
    ];

    let mut result = TimingResult::baseline();
    for patch in overlays.into_iter().flatten() {
        patch.apply(&mut result);
    }
    result
}

fn route_overlay(route: RouteType) -> &'static [TimingPatch] {
    match route {
        RouteType::LongHaul => &[
            TimingPatch::BookingWindow("6–10 weeks before departure"),
            TimingPatch::Why(
                0,
                "Long-haul fares often reward earlier planning due to limited cabin inventory.",
            ),
        ],
        RouteType::Domestic => &[
            TimingPatch::BookingWindow("2–4 weeks before departure"),
            TimingPatch::Why(
                0,
                "Domestic routes can price best closer in, unless it’s a peak travel week.",
            ),
        ],
        RouteType::ShortHaul | RouteType::NotSure => &[],
    }
}

fn window_overlay(window: TimingWindow) -> &'static [TimingPatch] {
    match window {
        TimingWindow::Peak => &[
            TimingPatch::BookingWindow("8–12 weeks before departure"),
            TimingPatch::Why(
                1,
                "Peak season load factors climb early, pushing prices up sooner.",
            ),
            TimingPatch::Avoid(["Last-minute booking", "Fri–Sun peak travel days"]),
        ],
        TimingWindow::NextMonth => &[TimingPatch::Avoid([
            "Waiting too long if dates are fixed",
            "Fri–Sun departures",
        ])],
        TimingWindow::TwoToThreeMonths | TimingWindow::FourToSixMonths | TimingWindow::NotSure => {
            &[]
        }
    }
}

fn flex_overlay(flex: Flexibility) -> &'static [TimingPatch] {
    match flex {
        Flexibility::Fixed => &[TimingPatch::Tip(
            "With fixed dates, book within the recommended window to reduce pricing risk.",
        )],
        Flexibility::VeryFlexible => &[TimingPatch::Tip(
            "With high flexibility, wait for dips and avoid peak days to improve value.",
        )],
        Flexibility::SomewhatFlexible => &[],
    }
}

fn priority_overlay(priority: Priority) -> &'static [TimingPatch] {
    match priority {
        Priority::Cheapest => &[TimingPatch::Tip(
            "Cheapest-first: avoid Fri–Sun, target Tue–Wed, and compare alternate airports.",
        )],
        Priority::Fastest => &[TimingPatch::Tip(
            "Fastest-first: book earlier in the window to secure direct routings and short connections.",
        )],
        Priority::Comfort => &[TimingPatch::Tip(
            "Comfort-first: book earlier to secure better departure times, seat options, and fewer connections.",
        )],
        Priority::Balanced => &[],
    }
}
