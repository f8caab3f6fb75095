//! Given/when steps for manifest scenarios.

use std::fs;

use alm_defect::manifest::DeliveryManifest;
use rstest_bdd_macros::{given, when};

use super::StepResult;
use super::state::{ManifestState, ParseResult};

const DELIVERY_FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/delivery.yml");

#[given("the delivery fixture file")]
fn given_delivery_fixture(manifest_state: &ManifestState) -> StepResult<()> {
    let input = fs::read_to_string(DELIVERY_FIXTURE)
        .map_err(|e| format!("failed to read {DELIVERY_FIXTURE}: {e}"))?;
    manifest_state.input.set(input);
    Ok(())
}

#[given("a manifest with domain and project but no defects")]
fn given_manifest_without_defects(manifest_state: &ManifestState) {
    manifest_state
        .input
        .set(String::from("tmt:\n  domain: D\n  project: P\n"));
}

#[given("an empty manifest")]
fn given_empty_manifest(manifest_state: &ManifestState) {
    manifest_state.input.set(String::new());
}

#[given("a manifest with an empty tmt section")]
fn given_empty_section(manifest_state: &ManifestState) {
    manifest_state.input.set(String::from("tmt:\n"));
}

#[given("a manifest with only defects")]
fn given_only_defects(manifest_state: &ManifestState) {
    manifest_state
        .input
        .set(String::from("tmt:\n  defects: [4711]\n"));
}

#[given("a manifest with only a domain")]
fn given_only_domain(manifest_state: &ManifestState) {
    manifest_state
        .input
        .set(String::from("tmt:\n  domain: TMT_DOMAIN\n"));
}

#[when("the manifest is parsed")]
fn when_manifest_parsed(manifest_state: &ManifestState) -> StepResult<()> {
    let input = manifest_state
        .input
        .get()
        .ok_or_else(|| String::from("input should be configured"))?;
    let result = match DeliveryManifest::parse(input.as_bytes()) {
        Ok(manifest) => ParseResult::Ok(manifest),
        Err(e) => ParseResult::Err(e.to_string()),
    };
    manifest_state.result.set(result);
    Ok(())
}
