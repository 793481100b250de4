use dlwatch_core::{update, AppState, Effect, JobId, Msg, NoticeLevel};

fn submit(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitRequested {
            url: url.to_string(),
        },
    )
}

#[test]
fn valid_submission_disables_input_and_requests_network() {
    let state = AppState::new();
    let (mut state, effects) = submit(state, "  https://example.com/v  ");

    assert_eq!(
        effects,
        vec![Effect::SubmitJob {
            url: "https://example.com/v".to_string(),
        }]
    );
    let view = state.view();
    assert!(!view.input_enabled);
    // Optimistic card is rendered before the server answers.
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.cards[0].subject, "https://example.com/v");
    assert_eq!(view.cards[0].progress, 0);
    assert_eq!(view.tracked_count, 0);
    assert!(state.consume_dirty());
}

#[test]
fn whitespace_only_url_never_reaches_the_network() {
    let state = AppState::new();
    let (mut state, effects) = submit(state, "   \t ");

    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NoticeLevel::Danger,
            message: "Please enter a valid URL".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.input_enabled);
    assert!(view.cards.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn accepted_submission_registers_exactly_one_job() {
    let state = AppState::new();
    let (state, _effects) = submit(state, "https://example.com/v");
    let (mut state, effects) = update(
        state,
        Msg::SubmitCompleted {
            result: Ok(JobId::new("1700000000")),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NoticeLevel::Success,
            message: "Download started".to_string(),
        }]
    );
    assert!(state.is_tracked(&JobId::new("1700000000")));
    assert_eq!(state.tracked_count(), 1);
    let view = state.view();
    assert!(view.input_enabled);
    assert_eq!(view.cards.len(), 1);
    assert!(state.consume_dirty());
}

#[test]
fn rejected_submission_drops_the_optimistic_card_and_reenables_input() {
    let state = AppState::new();
    let (state, _effects) = submit(state, "https://example.com/v");
    let (mut state, effects) = update(
        state,
        Msg::SubmitCompleted {
            result: Err("Unsupported site".to_string()),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NoticeLevel::Danger,
            message: "Unsupported site".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.input_enabled);
    assert!(view.cards.is_empty());
    assert_eq!(view.tracked_count, 0);
    assert!(state.consume_dirty());
}

#[test]
fn second_submission_while_one_is_in_flight_is_dropped() {
    let state = AppState::new();
    let (state, _effects) = submit(state, "https://example.com/a");
    let (state, effects) = submit(state, "https://example.com/b");

    assert!(effects.is_empty());
    assert_eq!(state.view().cards.len(), 1);
}

#[test]
fn completion_without_a_pending_submission_is_a_noop() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::SubmitCompleted {
            result: Ok(JobId::new("77")),
        },
    );

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
