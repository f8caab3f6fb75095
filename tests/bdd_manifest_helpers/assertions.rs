//! Assertion helpers for manifest behavioural tests.

use alm_defect::manifest::DeliveryManifest;
use rstest_bdd_macros::then;

use super::StepResult;
use super::state::{ManifestState, ParseResult};

fn parsed(manifest_state: &ManifestState) -> StepResult<DeliveryManifest> {
    match manifest_state.result.get() {
        Some(ParseResult::Ok(manifest)) => Ok(manifest),
        Some(ParseResult::Err(msg)) => Err(format!("expected a manifest, got error: {msg}")),
        None => Err(String::from("result should be set")),
    }
}

#[then("the manifest targets {domain} and {project}")]
fn manifest_targets(
    manifest_state: &ManifestState,
    domain: String,
    project: String,
) -> StepResult<()> {
    let manifest = parsed(manifest_state)?;
    if manifest.domain() == domain && manifest.project() == project {
        Ok(())
    } else {
        Err(format!(
            "expected {domain}/{project}, got {}/{}",
            manifest.domain(),
            manifest.project()
        ))
    }
}

#[then("the manifest lists {ids}")]
fn manifest_lists(manifest_state: &ManifestState, ids: String) -> StepResult<()> {
    let manifest = parsed(manifest_state)?;
    let wanted: Vec<&str> = ids.split(',').collect();
    if manifest.defects() == wanted.as_slice() {
        Ok(())
    } else {
        Err(format!("expected {wanted:?}, got {:?}", manifest.defects()))
    }
}

#[then("the manifest has no defects")]
fn manifest_lists_no_defects(manifest_state: &ManifestState) -> StepResult<()> {
    let manifest = parsed(manifest_state)?;
    if manifest.defects().is_empty() {
        Ok(())
    } else {
        Err(format!("expected no defects, got {:?}", manifest.defects()))
    }
}

#[then("parsing fails with {expected}")]
fn parsing_fails_with(manifest_state: &ManifestState, expected: String) -> StepResult<()> {
    match manifest_state.result.get() {
        Some(ParseResult::Err(msg)) if msg == expected => Ok(()),
        Some(ParseResult::Err(msg)) => Err(format!("expected error '{expected}', got '{msg}'")),
        Some(ParseResult::Ok(manifest)) => Err(format!("expected failure, got {manifest:?}")),
        None => Err(String::from("result should be set")),
    }
}
