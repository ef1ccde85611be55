//! Pure state transition function
//!
//! Given the same state, context and event, `transition` always produces the
//! same new state and effects. Access grants and preference writes are
//! requested as effects and applied by the runtime.

use super::choice::Choice;
use super::event::Command;
use super::prompts;
use super::reply::Reply;
use super::state::{TimingStep, TripStep};
use super::{ConvContext, ConvState, Effect, Event};
use crate::answers::{DepartureArea, DepartureRegion, DestinationRegion, TimingDraft, TripCheckDraft};
use crate::preferences::PreferenceUpdate;
use crate::rules::{evaluate_timing_window, evaluate_verdict, TripSummary};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }

    fn reply(self, reply: Reply) -> Self {
        self.with_effect(Effect::reply(reply))
    }
}

/// Events that do not fit the current step. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Choice {token} is not expected in step {step}")]
    UnexpectedChoice { step: &'static str, token: String },
    #[error("Free text is not expected in step {0}")]
    UnexpectedText(&'static str),
    #[error("Unknown choice token: {0}")]
    UnknownToken(String),
    #[error("Answers incomplete at step {0}")]
    IncompleteAnswers(&'static str),
}

impl TransitionError {
    /// What the user sees instead
    pub fn fallback(&self) -> Reply {
        match self {
            TransitionError::UnexpectedText(_) => prompts::text_fallback(),
            _ => prompts::choice_fallback(),
        }
    }
}

/// Pure transition function
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        Event::Command(command) => Ok(handle_command(state, context, command)),
        Event::Choice(choice) if choice.is_global() => Ok(handle_global(state, context, choice)),
        Event::Choice(choice) => match state {
            ConvState::TripCheck { step, answers } => trip_choice(*step, answers, context, choice),
            ConvState::Timing { step, answers } => timing_choice(*step, answers, context, choice),
            ConvState::Idle => Err(TransitionError::UnexpectedChoice {
                step: state.step_name(),
                token: choice.token(),
            }),
        },
        Event::UnknownToken(token) => Err(TransitionError::UnknownToken(token)),
        Event::Text(text) => match state {
            ConvState::TripCheck { step, answers } if state.expects_text() => {
                trip_text(*step, answers, context, text.trim())
            }
            _ => Err(TransitionError::UnexpectedText(state.step_name())),
        },
    }
}

// ============================================================================
// Global Actions
// ============================================================================

fn handle_command(state: &ConvState, ctx: &ConvContext, command: Command) -> TransitionResult {
    let unchanged = TransitionResult::new(state.clone());
    match command {
        Command::Start { unlock } => unchanged
            .with_effects(unlock.map(Effect::unlock))
            .reply(prompts::welcome()),
        Command::Help | Command::Unknown(_) => unchanged.reply(prompts::help()),
        Command::Status => unchanged.reply(prompts::status(
            ctx.access_status,
            ctx.has_access,
            &ctx.upgrade_url,
        )),
        Command::Check if ctx.has_access => {
            TransitionResult::new(ConvState::trip_check()).reply(prompts::check_intro())
        }
        Command::When if ctx.has_access => {
            TransitionResult::new(ConvState::timing()).reply(prompts::when_intro())
        }
        Command::Check | Command::When => unchanged.reply(prompts::upgrade(&ctx.upgrade_url)),
        Command::Settings => unchanged.reply(prompts::settings(&ctx.preferences)),
    }
}

fn handle_global(state: &ConvState, ctx: &ConvContext, choice: Choice) -> TransitionResult {
    let unchanged = TransitionResult::new(state.clone());
    match choice {
        Choice::StartMenu => TransitionResult::new(ConvState::Idle).reply(prompts::main_menu()),
        Choice::ShowStatus if ctx.has_access => {
            unchanged.reply(prompts::status_with_back(ctx.access_status))
        }
        Choice::ShowStatus => unchanged
            .reply(Reply::text(ctx.access_status.to_string()))
            .reply(prompts::upgrade(&ctx.upgrade_url)),
        Choice::CheckStart | Choice::WhenStart if !ctx.has_access => unchanged
            .reply(prompts::access_required())
            .reply(prompts::upgrade(&ctx.upgrade_url)),
        Choice::CheckStart => {
            TransitionResult::new(ConvState::trip_check()).reply(prompts::ask_trip_type())
        }
        Choice::WhenStart => {
            TransitionResult::new(ConvState::timing()).reply(prompts::ask_route_type())
        }
        Choice::CheckInfo => unchanged.reply(prompts::check_info()),
        Choice::WhenInfo => unchanged.reply(prompts::when_info()),
        Choice::SettingsMenu => unchanged.reply(prompts::settings(&ctx.preferences)),
        Choice::AirportMenu => unchanged.reply(prompts::airport_menu()),
        Choice::PriorityMenu => unchanged.reply(prompts::priority_menu()),
        Choice::SetAirport(preset) => unchanged
            .with_effect(Effect::UpdatePreferences(PreferenceUpdate::Airport(
                preset.airport().to_string(),
            )))
            .reply(prompts::airport_saved(preset.airport())),
        Choice::SetPriority(priority) => unchanged
            .with_effect(Effect::UpdatePreferences(PreferenceUpdate::Priority(priority)))
            .reply(prompts::priority_saved(priority)),
        Choice::ResetPreferences => unchanged
            .with_effect(Effect::UpdatePreferences(PreferenceUpdate::Reset))
            .reply(prompts::preferences_reset()),
        // Flow choices are routed before reaching here
        _ => unchanged.reply(prompts::choice_fallback()),
    }
}

// ============================================================================
// Trip Check
// ============================================================================

fn trip_choice(
    step: TripStep,
    answers: &TripCheckDraft,
    ctx: &ConvContext,
    choice: Choice,
) -> Result<TransitionResult, TransitionError> {
    let mut answers = answers.clone();
    let (next, reply) = match (step, choice) {
        (TripStep::TripType, Choice::TripType(trip_type)) => {
            answers.trip_type = Some(trip_type);
            (TripStep::DepRegion, prompts::ask_departure_region())
        }
        (TripStep::DepRegion, Choice::DepartureRegion(region)) => {
            answers.departure_region = Some(region);
            if region == DepartureRegion::Uk {
                (TripStep::DepArea, prompts::ask_departure_area())
            } else {
                (TripStep::DepTyped, prompts::ask_departure_typed())
            }
        }
        (TripStep::DepArea, Choice::DepartureArea(area)) => match area {
            DepartureArea::London => (TripStep::DepLondonAirport, prompts::ask_london_airport()),
            DepartureArea::Manchester | DepartureArea::Birmingham => {
                answers.departure = Some(area.code().to_string());
                (TripStep::DestRegion, prompts::ask_destination_region())
            }
            DepartureArea::Typed => (TripStep::DepTyped, prompts::ask_departure_typed()),
        },
        (TripStep::DepLondonAirport, Choice::LondonAirport(airport)) => {
            answers.departure = Some(airport.departure().to_string());
            (TripStep::DestRegion, prompts::ask_destination_region())
        }
        (TripStep::DestRegion, Choice::DestinationRegion(region)) => {
            answers.destination_region = Some(region);
            if region == DestinationRegion::Europe {
                (TripStep::DestPick, prompts::ask_destination_pick())
            } else {
                (TripStep::DestTyped, prompts::ask_destination_typed())
            }
        }
        (TripStep::DestRegion | TripStep::DestPick, Choice::TypeDestination) => {
            (TripStep::DestTyped, prompts::ask_destination_typed())
        }
        (TripStep::DestPick, Choice::Destination(city)) => {
            answers.destination = Some(city.label().to_string());
            (TripStep::TravelWindow, prompts::ask_travel_window())
        }
        (TripStep::TravelWindow, Choice::Window(window)) => {
            answers.window = Some(window);
            (TripStep::Priority, prompts::ask_priority())
        }
        (TripStep::Priority, Choice::Priority(priority)) => {
            answers.priority = Some(priority);
            (TripStep::AskPrice, prompts::ask_price())
        }
        (TripStep::AskPrice, Choice::PriceYes) => (TripStep::PriceTyped, prompts::ask_price_typed()),
        (TripStep::AskPrice, Choice::PriceNo) => {
            answers.price = None;
            return finish_trip(step, answers, ctx, None);
        }
        _ => {
            return Err(TransitionError::UnexpectedChoice {
                step: step.name(),
                token: choice.token(),
            })
        }
    };

    Ok(TransitionResult::new(ConvState::TripCheck {
        step: next,
        answers,
    })
    .reply(reply))
}

fn trip_text(
    step: TripStep,
    answers: &TripCheckDraft,
    ctx: &ConvContext,
    text: &str,
) -> Result<TransitionResult, TransitionError> {
    let mut answers = answers.clone();
    let (next, reply) = match step {
        TripStep::DepTyped => {
            answers.departure = Some(text.to_string());
            (TripStep::DestRegion, prompts::ask_destination_region())
        }
        TripStep::DestTyped => {
            answers.destination = Some(text.to_string());
            (TripStep::TravelWindow, prompts::ask_travel_window())
        }
        TripStep::PriceTyped => {
            answers.price = Some(text.to_string()).filter(|price| !price.is_empty());
            return finish_trip(step, answers, ctx, Some(prompts::generating_verdict()));
        }
        _ => return Err(TransitionError::UnexpectedText(step.name())),
    };

    Ok(TransitionResult::new(ConvState::TripCheck {
        step: next,
        answers,
    })
    .reply(reply))
}

/// Evaluate the verdict and park the flow in `DONE`
fn finish_trip(
    step: TripStep,
    answers: TripCheckDraft,
    ctx: &ConvContext,
    lead: Option<Reply>,
) -> Result<TransitionResult, TransitionError> {
    let complete = answers
        .complete()
        .ok_or(TransitionError::IncompleteAnswers(step.name()))?;
    let result = evaluate_verdict(&complete, &ctx.preferences);
    let summary = TripSummary::new(&complete, &ctx.preferences);

    Ok(TransitionResult::new(ConvState::TripCheck {
        step: TripStep::Done,
        answers,
    })
    .with_effects(lead.map(Effect::reply))
    .reply(Reply::Verdict {
        summary,
        result,
        buttons: prompts::verdict_buttons(),
    }))
}

// ============================================================================
// Timing
// ============================================================================

fn timing_choice(
    step: TimingStep,
    answers: &TimingDraft,
    ctx: &ConvContext,
    choice: Choice,
) -> Result<TransitionResult, TransitionError> {
    let mut answers = answers.clone();
    let (next, reply) = match (step, choice) {
        (TimingStep::RouteType, Choice::RouteType(route)) => {
            answers.route_type = Some(route);
            (TimingStep::TravelWindow, prompts::ask_timing_window())
        }
        (TimingStep::TravelWindow, Choice::TimingWindow(window)) => {
            answers.travel_window = Some(window);
            (TimingStep::Flex, prompts::ask_flex())
        }
        (TimingStep::Flex, Choice::Flex(flex)) => {
            answers.flex = Some(flex);
            let complete = answers
                .complete()
                .ok_or(TransitionError::IncompleteAnswers(step.name()))?;
            let result = evaluate_timing_window(&complete, ctx.preferences.priority);
            (
                TimingStep::Done,
                Reply::Timing {
                    result,
                    buttons: prompts::timing_buttons(),
                },
            )
        }
        _ => {
            return Err(TransitionError::UnexpectedChoice {
                step: step.name(),
                token: choice.token(),
            })
        }
    };

    Ok(TransitionResult::new(ConvState::Timing {
        step: next,
        answers,
    })
    .reply(reply))
}

#[cfg(test)]
mod tests {
    use super::super::reply::ButtonAction;
    use super::*;
    use crate::access::{AccessStatus, AccessTier};
    use crate::preferences::{Preferences, Priority};
    use crate::rules::Verdict;
    use crate::session::UserId;

    fn test_context(has_access: bool) -> ConvContext {
        ConvContext {
            user_id: UserId(42),
            preferences: Preferences::default(),
            has_access,
            access_status: if has_access {
                AccessStatus::Active {
                    tier: AccessTier::Trial,
                    hours_remaining: 160,
                }
            } else {
                AccessStatus::NoAccess
            },
            upgrade_url: "https://pay.example/airlo".to_string(),
        }
    }

    fn token(token: &str) -> Event {
        Event::choice_token(token)
    }

    /// Apply events in order, failing the test on any error
    fn run(ctx: &ConvContext, start: ConvState, events: Vec<Event>) -> (ConvState, Vec<Effect>) {
        let mut state = start;
        let mut effects = vec![];
        for event in events {
            let result = transition(&state, ctx, event).unwrap();
            state = result.new_state;
            effects = result.effects;
        }
        (state, effects)
    }

    fn replies(effects: &[Effect]) -> Vec<&Reply> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Reply(reply) => Some(reply),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_london_walk_to_verdict() {
        let ctx = test_context(true);
        let (state, effects) = run(
            &ctx,
            ConvState::Idle,
            vec![
                token("CHECK_START"),
                token("TRIP_RETURN"),
                token("DEP_UK"),
                token("DEPAREA_LONDON"),
                token("DEPAPT_LHR"),
                token("DST_EU"),
                token("DEST_PARIS"),
                token("WIN_2_6"),
                token("PR_BAL"),
                token("PRICE_NO"),
            ],
        );

        assert_eq!(state.step_name(), "DONE");
        let ConvState::TripCheck { answers, .. } = &state else {
            panic!("Expected trip check, got {state:?}");
        };
        assert_eq!(answers.destination.as_deref(), Some("Paris"));
        assert_eq!(answers.destination_region, Some(DestinationRegion::Europe));

        match replies(&effects).as_slice() {
            [Reply::Verdict {
                summary, result, ..
            }] => {
                assert_eq!(summary.departure, "LHR");
                assert_eq!(summary.destination, "Paris");
                assert_eq!(result.verdict, Verdict::Book);
            }
            other => panic!("Expected a single verdict, got {other:?}"),
        }
    }

    #[test]
    fn test_typed_walk_with_price() {
        let ctx = test_context(true);
        let (state, effects) = run(
            &ctx,
            ConvState::trip_check(),
            vec![
                token("TRIP_ONEWAY"),
                token("DEP_US"),
                Event::text("  JFK "),
                token("DST_TYPE"),
                Event::text("Lisbon"),
                token("WIN_NS"),
                token("PR_CHEAP"),
                token("PRICE_YES"),
                Event::text("£340"),
            ],
        );

        let ConvState::TripCheck { step, answers } = &state else {
            panic!("Expected trip check, got {state:?}");
        };
        assert_eq!(*step, TripStep::Done);
        assert_eq!(answers.departure.as_deref(), Some("JFK"));
        assert_eq!(answers.destination_region, None);

        let replies = replies(&effects);
        assert_eq!(replies.len(), 2);
        assert!(replies[0].render().starts_with("Thanks"));
        match replies[1] {
            Reply::Verdict {
                summary, result, ..
            } => {
                assert_eq!(summary.price.as_deref(), Some("£340"));
                assert_eq!(result.verdict, Verdict::Wait);
            }
            other => panic!("Expected verdict, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_price_is_left_out() {
        let ctx = test_context(true);
        let (_, effects) = run(
            &ctx,
            ConvState::trip_check(),
            vec![
                token("TRIP_RETURN"),
                token("DEP_EU"),
                Event::text("BCN"),
                token("DST_TYPE"),
                Event::text("Oslo"),
                token("WIN_2_6"),
                token("PR_BAL"),
                token("PRICE_YES"),
                Event::text("   "),
            ],
        );

        let verdict = replies(&effects)[1];
        match verdict {
            Reply::Verdict { summary, .. } => assert_eq!(summary.price, None),
            other => panic!("Expected verdict, got {other:?}"),
        }
        let text = verdict.render();
        assert!(text.contains("Return · Balanced priority\n\nVerdict\nBOOK"));
        assert!(!text.contains("Price:"));
    }

    #[test]
    fn test_uk_area_shortcuts() {
        let ctx = test_context(true);
        let (state, _) = run(
            &ctx,
            ConvState::trip_check(),
            vec![token("TRIP_RETURN"), token("DEP_UK"), token("DEPAREA_BHX")],
        );
        assert_eq!(state.step_name(), "DEST_REGION");
        let ConvState::TripCheck { answers, .. } = state else {
            panic!("Expected trip check");
        };
        assert_eq!(answers.departure.as_deref(), Some("BHX"));

        let (state, _) = run(
            &ctx,
            ConvState::trip_check(),
            vec![token("TRIP_RETURN"), token("DEP_UK"), token("DEPAREA_TYPE")],
        );
        assert_eq!(state.step_name(), "DEP_TYPED");
    }

    #[test]
    fn test_any_london_uses_preferred_airport() {
        let mut ctx = test_context(true);
        ctx.preferences.departure_airport = "LGW".to_string();
        let (_, effects) = run(
            &ctx,
            ConvState::trip_check(),
            vec![
                token("TRIP_RETURN"),
                token("DEP_UK"),
                token("DEPAREA_LONDON"),
                token("DEPAPT_ANY"),
                token("DST_US"),
                Event::text("New York"),
                token("WIN_1_3"),
                token("PR_FAST"),
                token("PRICE_NO"),
            ],
        );

        match replies(&effects).as_slice() {
            [Reply::Verdict { summary, .. }] => assert_eq!(summary.departure, "LGW"),
            other => panic!("Expected verdict, got {other:?}"),
        }
    }

    #[test]
    fn test_text_outside_typed_steps_rejected() {
        let ctx = test_context(true);
        assert_eq!(
            transition(&ConvState::Idle, &ctx, Event::text("hello")).unwrap_err(),
            TransitionError::UnexpectedText("IDLE")
        );
        assert_eq!(
            transition(&ConvState::trip_check(), &ctx, Event::text("LHR")).unwrap_err(),
            TransitionError::UnexpectedText("TRIP_TYPE")
        );
        assert_eq!(
            transition(&ConvState::timing(), &ctx, Event::text("soon")).unwrap_err(),
            TransitionError::UnexpectedText("WHEN_ROUTE_TYPE")
        );
    }

    #[test]
    fn test_choice_in_wrong_step_rejected() {
        let ctx = test_context(true);
        let state = ConvState::TripCheck {
            step: TripStep::DepRegion,
            answers: TripCheckDraft::default(),
        };
        let err = transition(&state, &ctx, token("WIN_2_6")).unwrap_err();
        assert_eq!(
            err,
            TransitionError::UnexpectedChoice {
                step: "DEP_REGION",
                token: "WIN_2_6".to_string(),
            }
        );
        assert_eq!(err.fallback().render(), "Use /start to begin.");

        let err = transition(&ConvState::Idle, &ctx, token("WHEN_FX_VF")).unwrap_err();
        assert!(matches!(err, TransitionError::UnexpectedChoice { step: "IDLE", .. }));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let ctx = test_context(true);
        let err = transition(&ConvState::Idle, &ctx, token("DEST_Lisbon")).unwrap_err();
        assert_eq!(err, TransitionError::UnknownToken("DEST_Lisbon".to_string()));
    }

    #[test]
    fn test_entry_without_access_shows_upgrade() {
        let ctx = test_context(false);
        let mid_flow = ConvState::TripCheck {
            step: TripStep::Priority,
            answers: TripCheckDraft {
                trip_type: Some(crate::answers::TripType::Return),
                ..TripCheckDraft::default()
            },
        };

        let result = transition(&mid_flow, &ctx, token("WHEN_START")).unwrap();
        assert_eq!(result.new_state, mid_flow);
        let replies = replies(&result.effects);
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].render(), "🔒 Airlo access required.");
        assert!(replies[1].buttons()[0][0].token().is_none());

        let result = transition(&ConvState::Idle, &ctx, Event::command("/check", &[])).unwrap();
        assert_eq!(result.new_state, ConvState::Idle);
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_status_with_access_offers_back() {
        let ctx = test_context(true);
        let mid_flow = ConvState::timing();

        let result = transition(&mid_flow, &ctx, token("SHOW_STATUS")).unwrap();
        assert_eq!(result.new_state, mid_flow);
        let shown = replies(&result.effects);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].render(), "Access: trial\nExpires in ~160 hours");
        assert_eq!(shown[0].buttons()[0][0].token(), Some("START_MENU"));

        let result = transition(&mid_flow, &ctx, Event::command("status", &[])).unwrap();
        let shown = replies(&result.effects);
        assert_eq!(shown.len(), 1);
        assert!(shown[0].buttons().is_empty());
    }

    #[test]
    fn test_status_without_access_links_upgrade() {
        let ctx = test_context(false);

        let result = transition(&ConvState::Idle, &ctx, token("SHOW_STATUS")).unwrap();
        let shown = replies(&result.effects);
        assert_eq!(shown.len(), 2);
        assert!(shown[0].render().starts_with("No access active."));
        assert!(shown[0].buttons().is_empty());
        assert_eq!(
            shown[1].buttons()[0][0].action,
            ButtonAction::Url("https://pay.example/airlo".to_string())
        );

        let result = transition(&ConvState::Idle, &ctx, Event::command("/status", &[])).unwrap();
        let shown = replies(&result.effects);
        assert_eq!(shown.len(), 1);
        assert!(shown[0].render().starts_with("No access active."));
        assert_eq!(
            shown[0].buttons()[0][0].action,
            ButtonAction::Url("https://pay.example/airlo".to_string())
        );
    }

    #[test]
    fn test_entry_discards_other_flow() {
        let ctx = test_context(true);
        let (state, _) = run(
            &ctx,
            ConvState::trip_check(),
            vec![token("TRIP_RETURN"), token("DEP_EU"), token("WHEN_START")],
        );
        assert_eq!(state, ConvState::timing());

        let (state, _) = run(
            &ctx,
            state,
            vec![token("WHEN_RT_LONG"), Event::command("check", &[])],
        );
        assert_eq!(state, ConvState::trip_check());
    }

    #[test]
    fn test_back_to_menu_goes_idle() {
        let ctx = test_context(true);
        let (state, effects) = run(
            &ctx,
            ConvState::trip_check(),
            vec![token("TRIP_RETURN"), token("START_MENU")],
        );
        assert_eq!(state, ConvState::Idle);
        assert_eq!(replies(&effects)[0].buttons().len(), 4);
    }

    #[test]
    fn test_settings_keep_flow_state() {
        let ctx = test_context(true);
        let (mid_flow, _) = run(&ctx, ConvState::trip_check(), vec![token("TRIP_RETURN")]);

        let result = transition(&mid_flow, &ctx, token("SET_AP_LGW")).unwrap();
        assert_eq!(result.new_state, mid_flow);
        assert_eq!(
            result.effects[0],
            Effect::UpdatePreferences(PreferenceUpdate::Airport("LGW".to_string()))
        );

        let result = transition(&mid_flow, &ctx, token("SET_PR_COMF")).unwrap();
        assert_eq!(
            result.effects[0],
            Effect::UpdatePreferences(PreferenceUpdate::Priority(Priority::Comfort))
        );

        let result = transition(&mid_flow, &ctx, token("SET_RESET")).unwrap();
        assert_eq!(
            result.effects[0],
            Effect::UpdatePreferences(PreferenceUpdate::Reset)
        );
    }

    #[test]
    fn test_start_with_code_requests_grant() {
        let ctx = test_context(false);
        let result = transition(
            &ConvState::Idle,
            &ctx,
            Event::command("start", &["premium".to_string()]),
        )
        .unwrap();
        assert_eq!(result.new_state, ConvState::Idle);
        assert_eq!(
            result.effects[0],
            Effect::GrantAccess {
                tier: AccessTier::Premium,
                duration_days: 30,
            }
        );
    }

    #[test]
    fn test_unknown_command_shows_help() {
        let ctx = test_context(true);
        let result = transition(&ConvState::Idle, &ctx, Event::command("/book", &[])).unwrap();
        assert!(replies(&result.effects)[0]
            .render()
            .starts_with("Available commands"));
    }

    #[test]
    fn test_timing_walk() {
        let mut ctx = test_context(true);
        ctx.preferences.priority = Priority::Cheapest;
        let (state, effects) = run(
            &ctx,
            ConvState::Idle,
            vec![
                token("WHEN_START"),
                token("WHEN_RT_LONG"),
                token("WHEN_TW_PEAK"),
                token("WHEN_FX_FX"),
            ],
        );

        assert_eq!(state.step_name(), "WHEN_DONE");
        match replies(&effects).as_slice() {
            [Reply::Timing { result, .. }] => {
                assert_eq!(result.booking_window, "8–12 weeks before departure");
                assert!(result.tip.starts_with("Cheapest-first"));
            }
            other => panic!("Expected timing insight, got {other:?}"),
        }
    }

    #[test]
    fn test_done_step_accepts_no_flow_input() {
        let ctx = test_context(true);
        let done = ConvState::Timing {
            step: TimingStep::Done,
            answers: TimingDraft::default(),
        };
        assert!(transition(&done, &ctx, token("WHEN_FX_VF")).is_err());
        assert!(transition(&done, &ctx, token("CHECK_START")).is_ok());
    }
}
