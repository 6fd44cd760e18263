use serde_json::Value;

use crate::{
    compose_status_message, validate_response, AgentState, CursorField, CycleError, Effect, Msg,
    Notice,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AgentState, msg: Msg) -> (AgentState, Vec<Effect>) {
    let effects = match msg {
        Msg::PollCompleted(Ok(payload)) => apply_response(&mut state, payload),
        Msg::PollCompleted(Err(error)) => fail_cycle(&state, error),
        Msg::NoticeDelivered { notice } => {
            log::debug!("notice delivered: {}", notice.to_text());
            if let Notice::Failure(error) = notice {
                state.remember_failure(error);
            }
            Vec::new()
        }
        Msg::NoticeFailed { notice, reason } => {
            // Failure memory stays unchanged, so an undelivered failure
            // notice is attempted again on the next cycle.
            log::error!("failed to deliver notice ({reason}): {}", notice.to_text());
            Vec::new()
        }
    };

    (state, effects)
}

fn apply_response(state: &mut AgentState, payload: Value) -> Vec<Effect> {
    let validated = match validate_response(payload) {
        Ok(validated) => validated,
        Err(error) => return fail_cycle(state, error),
    };

    match validated.cursor {
        CursorField::Valid(timestamp) => state.advance_cursor(timestamp),
        CursorField::Missing => log::warn!(
            "response carries no `current_date`; keeping cursor at {}",
            state.cursor()
        ),
        CursorField::Invalid => log::warn!(
            "`current_date` is not an integer; keeping cursor at {}",
            state.cursor()
        ),
    }

    // Only the most recent homework is examined per cycle.
    let Some(record) = validated.homeworks.first() else {
        log::debug!("no status change since {}", state.cursor());
        return Vec::new();
    };

    match compose_status_message(record) {
        Ok(text) => vec![Effect::Notify(Notice::StatusChange(text))],
        Err(error) => fail_cycle(state, error),
    }
}

fn fail_cycle(state: &AgentState, error: CycleError) -> Vec<Effect> {
    log::error!("cycle failed: {error}");
    if state.last_failure() == Some(&error) {
        log::debug!("failure repeats the last delivered notice; staying quiet");
        Vec::new()
    } else {
        vec![Effect::Notify(Notice::Failure(error))]
    }
}
