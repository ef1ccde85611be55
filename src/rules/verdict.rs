//! Trip-check verdict engine
//!
//! The base case is keyed on the travel window. A priority overlay then
//! prepends options and appends a reason; both lists are capped afterwards,
//! so overlay options win over base options.

use crate::answers::{TravelWindow, TripCheckAnswers, TripType};
use crate::preferences::{Preferences, Priority};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of reasons and of options in a verdict
pub const MAX_ITEMS: usize = 3;

/// Departure values meaning "not chosen explicitly" (case-sensitive)
pub const UNSPECIFIED_DEPARTURES: [&str; 5] = ["", "Any", "ANY", "ANY LONDON", "LON"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Book,
    Wait,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Book => f.write_str("BOOK"),
            Verdict::Wait => f.write_str("WAIT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictResult {
    pub verdict: Verdict,
    pub reasons: Vec<String>,
    pub options: Vec<String>,
}

/// Route line shown alongside a verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub departure: String,
    pub destination: String,
    pub trip_type: TripType,
    pub priority: Priority,
    pub price: Option<String>,
}

impl TripSummary {
    pub fn new(answers: &TripCheckAnswers, prefs: &Preferences) -> Self {
        Self {
            departure: resolve_departure(&answers.departure, prefs).to_string(),
            destination: answers.destination.clone(),
            trip_type: answers.trip_type,
            priority: answers.priority,
            price: answers.price.clone(),
        }
    }
}

/// Substitute the preferred airport for an unspecified departure
pub fn resolve_departure<'a>(departure: &'a str, prefs: &'a Preferences) -> &'a str {
    if UNSPECIFIED_DEPARTURES.contains(&departure) && prefs.has_airport() {
        &prefs.departure_airport
    } else {
        departure
    }
}

/// A field write on top of the base verdict
#[derive(Debug, Clone, PartialEq, Eq)]
enum VerdictPatch {
    PrependOptions(Vec<String>),
    AppendReason(String),
}

impl VerdictPatch {
    fn apply(self, result: &mut VerdictResult) {
        match self {
            VerdictPatch::PrependOptions(mut options) => {
                options.append(&mut result.options);
                result.options = options;
            }
            VerdictPatch::AppendReason(reason) => result.reasons.push(reason),
        }
    }
}

pub fn evaluate_verdict(answers: &TripCheckAnswers, prefs: &Preferences) -> VerdictResult {
    let mut result = base_verdict(answers.window, answers.priority);
    for patch in priority_overlay(overlay_priority(answers, prefs), prefs) {
        patch.apply(&mut result);
    }
    result.reasons.truncate(MAX_ITEMS);
    result.options.truncate(MAX_ITEMS);
    result
}

/// The trip's own answer, unless it is Balanced, in which case the saved
/// preference decides.
fn overlay_priority(answers: &TripCheckAnswers, prefs: &Preferences) -> Priority {
    match answers.priority {
        Priority::Balanced => prefs.priority,
        answered => answered,
    }
}

fn base_verdict(window: TravelWindow, priority: Priority) -> VerdictResult {
    let (verdict, reasons, options): (Verdict, &[&str], &[&str]) = match window {
        TravelWindow::ZeroToTwoWeeks => (
            if matches!(priority, Priority::Fastest | Priority::Comfort) {
                Verdict::Book
            } else {
                Verdict::Wait
            },
            &[
                "Close to departure: fares can swing quickly as inventory tightens.",
                "Peak-day demand (Fri/Sun) can add a premium even on short routes.",
            ],
            &["If possible, shift to Tue–Wed or Saturday for cleaner pricing."],
        ),
        TravelWindow::TwoToSixWeeks => (
            Verdict::Book,
            &[
                "This is commonly the best optimisation window for many short/medium routes.",
                "Airlines have set pricing bands but demand hasn’t fully peaked yet.",
            ],
            &["Compare airport pairs (e.g., LHR vs LGW) for better value."],
        ),
        TravelWindow::OneToThreeMonths => (
            Verdict::Wait,
            &[
                "Often early for best pricing: good for planning, not always for buying.",
                "Watch for dips around 3–6 weeks pre-departure on many routes.",
            ],
            &["If it’s peak season or fixed dates, consider booking earlier."],
        ),
        TravelWindow::ThreePlusMonths => (
            Verdict::Wait,
            &[
                "Usually too early to lock the best price unless it’s peak dates.",
                "Better value often appears closer to the optimal window.",
            ],
            &["Set a reminder and re-check as you approach 8–12 / 3–6 weeks."],
        ),
        TravelWindow::NotSure => (
            Verdict::Wait,
            &["Without dates, safest move is to benchmark typical booking windows."],
            &["Run /when for a route-based booking window."],
        ),
    };

    VerdictResult {
        verdict,
        reasons: reasons.iter().map(|s| (*s).to_string()).collect(),
        options: options.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn priority_overlay(priority: Priority, prefs: &Preferences) -> Vec<VerdictPatch> {
    let (options, reason) = match priority {
        Priority::Balanced => return vec![],
        Priority::Cheapest => (
            vec![
                "Cheapest-first: aim Tue–Wed and avoid Fri–Sun if possible.".to_string(),
                format!(
                    "Default airport setting: {} (adjust in Preferences).",
                    prefs.departure_airport
                ),
            ],
            "Cheapest-first trips benefit most from flexibility and airport pair comparisons.",
        ),
        Priority::Fastest => (
            vec![
                "Fastest-first: prioritise direct routings and minimal connections.".to_string(),
                "Book earlier in the window to secure the best direct inventory.".to_string(),
            ],
            "Fastest-first trips often need earlier booking to lock direct seats.",
        ),
        Priority::Comfort => (
            vec![
                "Comfort-first: avoid extreme departure times and multiple connections."
                    .to_string(),
                "Book earlier to secure better cabin/seat availability.".to_string(),
            ],
            "Comfort-first trips benefit from better timing and route quality.",
        ),
    };

    vec![
        VerdictPatch::PrependOptions(options),
        VerdictPatch::AppendReason(reason.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::DepartureRegion;

    fn answers(window: TravelWindow, priority: Priority) -> TripCheckAnswers {
        TripCheckAnswers {
            trip_type: TripType::Return,
            departure_region: DepartureRegion::Uk,
            departure: "LHR".to_string(),
            destination_region: None,
            destination: "Paris".to_string(),
            window,
            priority,
            price: None,
        }
    }

    fn expected_verdict(window: TravelWindow, priority: Priority) -> Verdict {
        match window {
            TravelWindow::ZeroToTwoWeeks
                if matches!(priority, Priority::Fastest | Priority::Comfort) =>
            {
                Verdict::Book
            }
            TravelWindow::TwoToSixWeeks => Verdict::Book,
            _ => Verdict::Wait,
        }
    }

    #[test]
    fn test_verdict_table() {
        let prefs = Preferences::default();
        for &window in TravelWindow::ALL {
            for priority in Priority::ALL {
                let result = evaluate_verdict(&answers(window, priority), &prefs);
                assert_eq!(
                    result.verdict,
                    expected_verdict(window, priority),
                    "{window:?} / {priority:?}"
                );
                assert!(result.reasons.len() <= MAX_ITEMS);
                assert!(result.options.len() <= MAX_ITEMS);
                assert!(!result.reasons.is_empty());
                assert!(!result.options.is_empty());
            }
        }
    }

    #[test]
    fn test_cheapest_overlay_leads_options() {
        let result = evaluate_verdict(
            &answers(TravelWindow::TwoToSixWeeks, Priority::Cheapest),
            &Preferences::default(),
        );

        assert_eq!(result.verdict, Verdict::Book);
        assert!(result.options[0].starts_with("Cheapest-first: aim Tue–Wed"));
        assert_eq!(
            result.options[1],
            "Default airport setting: Any (adjust in Preferences)."
        );
        // The base option survives in third place
        assert!(result.options[2].starts_with("Compare airport pairs"));
        assert_eq!(result.reasons.len(), 3);
        assert!(result.reasons[2].starts_with("Cheapest-first trips"));
    }

    #[test]
    fn test_balanced_has_no_overlay() {
        let result = evaluate_verdict(
            &answers(TravelWindow::OneToThreeMonths, Priority::Balanced),
            &Preferences::default(),
        );
        assert_eq!(result.reasons.len(), 2);
        assert_eq!(result.options.len(), 1);
    }

    #[test]
    fn test_balanced_answer_defers_to_saved_priority() {
        let prefs = Preferences {
            departure_airport: "Any".to_string(),
            priority: Priority::Comfort,
        };
        let result = evaluate_verdict(
            &answers(TravelWindow::ThreePlusMonths, Priority::Balanced),
            &prefs,
        );
        assert!(result.options[0].starts_with("Comfort-first"));
        // Saved priority never changes the base verdict
        assert_eq!(result.verdict, Verdict::Wait);
    }

    #[test]
    fn test_answered_priority_beats_saved_priority() {
        let prefs = Preferences {
            departure_airport: "Any".to_string(),
            priority: Priority::Comfort,
        };
        let result = evaluate_verdict(
            &answers(TravelWindow::TwoToSixWeeks, Priority::Fastest),
            &prefs,
        );
        assert!(result.options[0].starts_with("Fastest-first"));
    }

    #[test]
    fn test_not_sure_points_to_timing_flow() {
        let result = evaluate_verdict(
            &answers(TravelWindow::NotSure, Priority::Balanced),
            &Preferences::default(),
        );
        assert_eq!(result.verdict, Verdict::Wait);
        assert_eq!(result.reasons.len(), 1);
        assert!(result.options[0].contains("/when"));
    }

    #[test]
    fn test_overlay_truncates_base_options() {
        let result = evaluate_verdict(
            &answers(TravelWindow::NotSure, Priority::Fastest),
            &Preferences::default(),
        );
        assert_eq!(result.options.len(), 3);
        assert_eq!(result.reasons.len(), 2);
        assert!(result.options[2].contains("/when"));
    }

    #[test]
    fn test_evaluation_is_pure() {
        let input = answers(TravelWindow::ZeroToTwoWeeks, Priority::Cheapest);
        let prefs = Preferences {
            departure_airport: "MAN".to_string(),
            priority: Priority::Fastest,
        };
        let before = (input.clone(), prefs.clone());

        let first = evaluate_verdict(&input, &prefs);
        let second = evaluate_verdict(&input, &prefs);

        assert_eq!(first, second);
        assert_eq!((input, prefs), before);
    }

    #[test]
    fn test_unspecified_departure_uses_preferred_airport() {
        let prefs = Preferences {
            departure_airport: "LHR".to_string(),
            priority: Priority::Balanced,
        };
        for sentinel in UNSPECIFIED_DEPARTURES {
            assert_eq!(resolve_departure(sentinel, &prefs), "LHR");
        }

        let mut input = answers(TravelWindow::TwoToSixWeeks, Priority::Balanced);
        input.departure = "ANY LONDON".to_string();
        assert_eq!(TripSummary::new(&input, &prefs).departure, "LHR");
    }

    #[test]
    fn test_explicit_departure_never_overridden() {
        let prefs = Preferences {
            departure_airport: "LHR".to_string(),
            priority: Priority::Balanced,
        };
        assert_eq!(resolve_departure("CDG", &prefs), "CDG");
        // Sentinels are case-sensitive
        assert_eq!(resolve_departure("any london", &prefs), "any london");
    }

    #[test]
    fn test_sentinel_kept_without_preferred_airport() {
        let prefs = Preferences::default();
        assert_eq!(resolve_departure("ANY LONDON", &prefs), "ANY LONDON");
    }
}
