//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across random event sequences.

use super::choice::Choice;
use super::event::Command;
use super::state::*;
use super::transition::*;
use super::*;
use crate::access::{AccessStatus, AccessTier};
use crate::preferences::{Preferences, Priority};
use crate::session::UserId;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context(has_access: bool, preferences: Preferences) -> ConvContext {
    ConvContext {
        user_id: UserId(7),
        preferences,
        has_access,
        access_status: if has_access {
            AccessStatus::Active {
                tier: AccessTier::Premium,
                hours_remaining: 700,
            }
        } else {
            AccessStatus::Expired
        },
        upgrade_url: "https://pay.example/airlo".to_string(),
    }
}

/// Run events from idle, skipping rejected ones
fn replay(ctx: &ConvContext, events: Vec<Event>) -> ConvState {
    let mut state = ConvState::Idle;
    for event in events {
        if let Ok(result) = transition(&state, ctx, event) {
            state = result.new_state;
        }
    }
    state
}

fn trip_rank(step: TripStep) -> u8 {
    match step {
        TripStep::TripType => 0,
        TripStep::DepRegion => 1,
        TripStep::DepArea | TripStep::DepLondonAirport | TripStep::DepTyped => 2,
        TripStep::DestRegion => 3,
        TripStep::DestPick | TripStep::DestTyped => 4,
        TripStep::TravelWindow => 5,
        TripStep::Priority => 6,
        TripStep::AskPrice | TripStep::PriceTyped => 7,
        TripStep::Done => 8,
    }
}

/// Every slot before the current step has been answered
fn answers_fit_step(state: &ConvState) -> bool {
    match state {
        ConvState::Idle => true,
        ConvState::TripCheck { step, answers } => {
            let rank = trip_rank(*step);
            (rank < 1 || answers.trip_type.is_some())
                && (rank < 2 || answers.departure_region.is_some())
                && (rank < 3 || answers.departure.is_some())
                && (rank < 5 || answers.destination.is_some())
                && (rank < 6 || answers.window.is_some())
                && (rank < 7 || answers.priority.is_some())
                && (*step != TripStep::Done || answers.complete().is_some())
        }
        ConvState::Timing { step, answers } => match step {
            TimingStep::RouteType => *answers == crate::answers::TimingDraft::default(),
            TimingStep::TravelWindow => answers.route_type.is_some(),
            TimingStep::Flex => answers.route_type.is_some() && answers.travel_window.is_some(),
            TimingStep::Done => answers.complete().is_some(),
        },
    }
}

fn reply_tokens(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Reply(reply) => Some(reply),
            _ => None,
        })
        .flat_map(|reply| reply.buttons().iter().flatten())
        .filter_map(|button| button.token().map(str::to_string))
        .collect()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_choice() -> impl Strategy<Value = Choice> {
    proptest::sample::select(Choice::all())
}

fn arb_global_choice() -> impl Strategy<Value = Choice> {
    proptest::sample::select(
        Choice::all()
            .into_iter()
            .filter(|choice| choice.is_global())
            .collect::<Vec<_>>(),
    )
}

fn arb_command() -> impl Strategy<Value = Event> {
    (
        proptest::sample::select(vec![
            "start", "/help", "status", "/check", "when", "settings", "/book",
        ]),
        proptest::option::of(proptest::sample::select(vec!["trial7", "PREMIUM", "x"])),
    )
        .prop_map(|(name, arg)| {
            let args: Vec<String> = arg.into_iter().map(str::to_string).collect();
            Event::command(name, &args)
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        8 => arb_choice().prop_map(Event::Choice),
        3 => "[a-zA-Z£0-9 ]{0,12}".prop_map(Event::text),
        1 => "[A-Z_]{1,10}".prop_map(|token| Event::choice_token(&token)),
        1 => arb_command(),
    ]
}

fn arb_preferences() -> impl Strategy<Value = Preferences> {
    (
        proptest::sample::select(vec!["Any", "ANY", "LON", "LHR", "MAN", "Leeds"]),
        proptest::sample::select(Priority::ALL.to_vec()),
    )
        .prop_map(|(airport, priority)| Preferences {
            departure_airport: airport.to_string(),
            priority,
        })
}

fn arb_reachable_state() -> impl Strategy<Value = ConvState> {
    proptest::collection::vec(arb_event(), 0..30)
        .prop_map(|events| replay(&test_context(true, Preferences::default()), events))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Answers always match how far the flow has progressed
    #[test]
    fn prop_answers_fit_step(
        events in proptest::collection::vec(arb_event(), 0..40),
        prefs in arb_preferences()
    ) {
        let ctx = test_context(true, prefs);
        let mut state = ConvState::Idle;

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                state = result.new_state;
                prop_assert!(answers_fit_step(&state), "Inconsistent state: {:?}", state);
            }
        }
    }

    // Free text is consumed only by the typed steps
    #[test]
    fn prop_text_only_in_typed_steps(state in arb_reachable_state(), text in "[a-zA-Z ]{0,20}") {
        let ctx = test_context(true, Preferences::default());
        let result = transition(&state, &ctx, Event::text(text));
        prop_assert_eq!(result.is_ok(), state.expects_text(), "State: {:?}", state);
        if let Err(err) = result {
            prop_assert_eq!(err.fallback().render(), "Use /start to begin. Or /help for commands.");
        }
    }

    // Global actions other than navigation never touch the flow
    #[test]
    fn prop_global_choices_keep_flow(
        state in arb_reachable_state(),
        choice in arb_global_choice(),
        has_access in any::<bool>()
    ) {
        let ctx = test_context(has_access, Preferences::default());
        let result = transition(&state, &ctx, Event::Choice(choice)).unwrap();

        match choice {
            Choice::StartMenu => prop_assert_eq!(result.new_state, ConvState::Idle),
            Choice::CheckStart if has_access => {
                prop_assert_eq!(result.new_state, ConvState::trip_check());
            }
            Choice::WhenStart if has_access => {
                prop_assert_eq!(result.new_state, ConvState::timing());
            }
            _ => prop_assert_eq!(result.new_state, state),
        }
    }

    // Commands always succeed and only entry commands move the flow
    #[test]
    fn prop_commands_always_accepted(state in arb_reachable_state(), event in arb_command()) {
        let ctx = test_context(true, Preferences::default());
        let result = transition(&state, &ctx, event.clone());
        prop_assert!(result.is_ok());
        let new_state = result.unwrap().new_state;

        match event {
            Event::Command(Command::Check) => prop_assert_eq!(new_state, ConvState::trip_check()),
            Event::Command(Command::When) => prop_assert_eq!(new_state, ConvState::timing()),
            _ => prop_assert_eq!(new_state, state),
        }
    }

    // Without access a user never gets into a flow
    #[test]
    fn prop_no_access_stays_idle(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context(false, Preferences::default());
        prop_assert_eq!(replay(&ctx, events), ConvState::Idle);
    }

    // Every button the bot renders can be pressed back
    #[test]
    fn prop_rendered_tokens_parse(
        events in proptest::collection::vec(arb_event(), 0..30),
        has_access in any::<bool>()
    ) {
        let ctx = test_context(has_access, Preferences::default());
        let mut state = ConvState::Idle;

        for event in events {
            if let Ok(result) = transition(&state, &ctx, event) {
                for token in reply_tokens(&result.effects) {
                    prop_assert!(Choice::parse(&token).is_some(), "Unparseable token {}", token);
                }
                state = result.new_state;
            }
        }
    }

    // Rejected events only ever come from flow input
    #[test]
    fn prop_errors_only_for_flow_input(state in arb_reachable_state(), event in arb_event()) {
        let ctx = test_context(true, Preferences::default());
        if transition(&state, &ctx, event.clone()).is_err() {
            let is_flow_input = match &event {
                Event::Choice(choice) => !choice.is_global(),
                Event::Text(_) | Event::UnknownToken(_) => true,
                Event::Command(_) => false,
            };
            prop_assert!(is_flow_input, "Rejected {:?} in {:?}", event, state);
        }
    }
}
