//! Scenario state for reconciliation behavioural tests.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// High-level result of a reconciliation run.
#[derive(Debug, Clone)]
pub(crate) enum ReconcileResult {
    /// The run finished; one `updated` or `skipped` entry per defect.
    Ok(Vec<String>),
    /// The run failed with this message.
    Err(String),
}

#[derive(Default, ScenarioState)]
pub(crate) struct ReconcileState {
    pub(crate) manifest: Slot<String>,
    pub(crate) remote_status: Slot<String>,
    pub(crate) sign_in_rejected: Slot<bool>,
    pub(crate) from_status: Slot<String>,
    pub(crate) into_status: Slot<String>,
    pub(crate) result: Slot<ReconcileResult>,
    pub(crate) calls: Slot<Vec<String>>,
}

#[fixture]
pub(crate) fn reconcile_state() -> ReconcileState {
    let state = ReconcileState::default();
    state.remote_status.set(String::from("Open"));
    state.sign_in_rejected.set(false);
    state.from_status.set(String::new());
    state
}
