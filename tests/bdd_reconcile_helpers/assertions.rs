//! Assertion helpers for reconciliation behavioural tests.

use rstest_bdd_macros::then;

use super::StepResult;
use super::state::{ReconcileResult, ReconcileState};

fn result(reconcile_state: &ReconcileState) -> StepResult<ReconcileResult> {
    reconcile_state
        .result
        .get()
        .ok_or_else(|| String::from("result should be set"))
}

fn calls(reconcile_state: &ReconcileState) -> StepResult<Vec<String>> {
    reconcile_state
        .calls
        .get()
        .ok_or_else(|| String::from("calls should be recorded"))
}

#[then("the outcomes are {expected}")]
fn outcomes_are(reconcile_state: &ReconcileState, expected: String) -> StepResult<()> {
    let wanted: Vec<&str> = expected.split(',').collect();
    match result(reconcile_state)? {
        ReconcileResult::Ok(kinds) if kinds == wanted => Ok(()),
        ReconcileResult::Ok(kinds) => Err(format!("expected outcomes {wanted:?}, got {kinds:?}")),
        ReconcileResult::Err(msg) => Err(format!("expected outcomes {wanted:?}, got error: {msg}")),
    }
}

#[then("reconciliation fails mentioning {fragment}")]
fn reconciliation_fails(reconcile_state: &ReconcileState, fragment: String) -> StepResult<()> {
    match result(reconcile_state)? {
        ReconcileResult::Err(msg) if msg.contains(&fragment) => Ok(()),
        ReconcileResult::Err(msg) => {
            Err(format!("expected error mentioning {fragment}, got: {msg}"))
        }
        ReconcileResult::Ok(kinds) => Err(format!("expected failure, got outcomes {kinds:?}")),
    }
}

#[then("the gateway calls were {expected}")]
fn gateway_calls_were(reconcile_state: &ReconcileState, expected: String) -> StepResult<()> {
    let wanted: Vec<&str> = expected.split(',').collect();
    let recorded = calls(reconcile_state)?;
    if recorded == wanted {
        Ok(())
    } else {
        Err(format!("expected calls {wanted:?}, got {recorded:?}"))
    }
}

#[then("no defect is updated")]
fn no_defect_is_updated(reconcile_state: &ReconcileState) -> StepResult<()> {
    let recorded = calls(reconcile_state)?;
    match recorded.iter().find(|call| call.starts_with("put:")) {
        Some(call) => Err(format!("expected no update, got {call}")),
        None => Ok(()),
    }
}
