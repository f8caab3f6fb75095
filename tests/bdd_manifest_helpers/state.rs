//! Scenario state for manifest behavioural tests.

use alm_defect::manifest::DeliveryManifest;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Outcome of parsing the scenario's input.
#[derive(Debug, Clone)]
pub(crate) enum ParseResult {
    /// The manifest parsed and validated.
    Ok(DeliveryManifest),
    /// Parsing failed with this message.
    Err(String),
}

#[derive(Default, ScenarioState)]
pub(crate) struct ManifestState {
    pub(crate) input: Slot<String>,
    pub(crate) result: Slot<ParseResult>,
}

#[fixture]
pub(crate) fn manifest_state() -> ManifestState {
    ManifestState::default()
}
