//! Given/when steps for reconciliation scenarios.

use std::sync::{Arc, Mutex, PoisonError};

use alm_defect::api::deliver;
use alm_defect::error::GatewayError;
use alm_defect::gateway::{
    BoxFuture, Credentials, Defect, DefectGateway, Domain, ProjectScope, Release,
};
use alm_defect::manifest::DeliveryManifest;
use alm_defect::reconcile::{DefectOutcome, StatusTransition};
use alm_defect::session::Session;
use mockall::mock;
use rstest_bdd_macros::{given, when};

use super::StepResult;
use super::state::{ReconcileResult, ReconcileState};

type CallLog = Arc<Mutex<Vec<String>>>;

mock! {
    Gateway {}

    impl DefectGateway for Gateway {
        fn sign_in(&self, credentials: &Credentials) -> BoxFuture<'_, Result<(), GatewayError>>;
        fn sign_out(&self) -> BoxFuture<'_, Result<(), GatewayError>>;
        fn get_defect(
            &self,
            scope: &ProjectScope,
            id: u64,
        ) -> BoxFuture<'_, Result<Defect, GatewayError>>;
        fn put_defect(
            &self,
            scope: &ProjectScope,
            defect: &Defect,
        ) -> BoxFuture<'_, Result<Defect, GatewayError>>;
        fn list_domains(&self) -> BoxFuture<'_, Result<Vec<Domain>, GatewayError>>;
        fn list_defects(
            &self,
            scope: &ProjectScope,
        ) -> BoxFuture<'_, Result<Vec<Defect>, GatewayError>>;
        fn list_releases(
            &self,
            scope: &ProjectScope,
        ) -> BoxFuture<'_, Result<Vec<Release>, GatewayError>>;
    }
}

fn record(log: &CallLog, entry: String) {
    log.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
}

/// Builds a gateway whose defects all carry `status`, logging every call.
fn recording_gateway(log: &CallLog, status: String, sign_in_rejected: bool) -> MockGateway {
    let mut gateway = MockGateway::new();

    let sign_in_log = Arc::clone(log);
    gateway.expect_sign_in().returning(move |_| {
        record(&sign_in_log, String::from("sign-in"));
        Box::pin(async move {
            if sign_in_rejected {
                Err(GatewayError::Auth {
                    message: String::from("401 Unauthorized"),
                })
            } else {
                Ok(())
            }
        })
    });

    let sign_out_log = Arc::clone(log);
    gateway.expect_sign_out().returning(move || {
        record(&sign_out_log, String::from("sign-out"));
        Box::pin(async { Ok(()) })
    });

    let get_log = Arc::clone(log);
    gateway.expect_get_defect().returning(move |_, id| {
        record(&get_log, format!("get:{id}"));
        let defect = Defect {
            id,
            status: status.clone(),
            ..Defect::default()
        };
        Box::pin(async move { Ok(defect) })
    });

    let put_log = Arc::clone(log);
    gateway.expect_put_defect().returning(move |_, defect| {
        record(&put_log, format!("put:{}:{}", defect.id, defect.status));
        let stored = defect.clone();
        Box::pin(async move { Ok(stored) })
    });

    gateway.expect_list_domains().never();
    gateway.expect_list_defects().never();
    gateway.expect_list_releases().never();
    gateway
}

fn manifest_yaml(domain: &str, project: &str, ids: &[&str]) -> String {
    format!(
        "tmt:\n  domain: {domain}\n  project: {project}\n  defects: [{}]\n",
        ids.join(", ")
    )
}

#[given("a delivery manifest for {domain} and {project} listing {ids}")]
fn given_manifest(
    reconcile_state: &ReconcileState,
    domain: String,
    project: String,
    ids: String,
) {
    let listed: Vec<&str> = ids.split(',').collect();
    reconcile_state
        .manifest
        .set(manifest_yaml(&domain, &project, &listed));
}

#[given("a delivery manifest for {domain} and {project} without defects")]
fn given_manifest_without_defects(
    reconcile_state: &ReconcileState,
    domain: String,
    project: String,
) {
    reconcile_state
        .manifest
        .set(manifest_yaml(&domain, &project, &[]));
}

#[given("remote defects have status {status}")]
fn given_remote_status(reconcile_state: &ReconcileState, status: String) {
    reconcile_state.remote_status.set(status);
}

#[given("the server rejects sign-in")]
fn given_sign_in_rejected(reconcile_state: &ReconcileState) {
    reconcile_state.sign_in_rejected.set(true);
}

#[given("the transition has no from-status and targets {into}")]
fn given_open_transition(reconcile_state: &ReconcileState, into: String) {
    reconcile_state.from_status.set(String::new());
    reconcile_state.into_status.set(into);
}

#[given("the transition is from {from} into {into}")]
fn given_transition(reconcile_state: &ReconcileState, from: String, into: String) {
    reconcile_state.from_status.set(from);
    reconcile_state.into_status.set(into);
}

#[when("the delivery is reconciled")]
fn when_delivery_reconciled(reconcile_state: &ReconcileState) -> StepResult<()> {
    let manifest_text = reconcile_state
        .manifest
        .get()
        .ok_or_else(|| String::from("manifest should be configured"))?;
    let manifest = DeliveryManifest::parse_str(&manifest_text)
        .map_err(|e| format!("manifest should parse: {e}"))?;
    let into_status = reconcile_state
        .into_status
        .get()
        .ok_or_else(|| String::from("into-status should be configured"))?;
    let from_status = reconcile_state.from_status.get().unwrap_or_default();
    let transition = StatusTransition::new(&from_status, &into_status)
        .map_err(|e| format!("transition should be valid: {e}"))?;

    let log = CallLog::default();
    let gateway = recording_gateway(
        &log,
        reconcile_state.remote_status.get().unwrap_or_default(),
        reconcile_state.sign_in_rejected.get().unwrap_or(false),
    );
    let credentials = Credentials::new("jdoe", "secret");
    let session = Session::new(&gateway, &credentials);

    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| format!("failed to create runtime: {e}"))?;
    let result = match runtime.block_on(deliver(&session, &manifest, &transition)) {
        Ok(outcomes) => ReconcileResult::Ok(outcomes.iter().map(outcome_kind).collect()),
        Err(e) => ReconcileResult::Err(e.to_string()),
    };
    reconcile_state.result.set(result);

    let calls = log.lock().unwrap_or_else(PoisonError::into_inner).clone();
    reconcile_state.calls.set(calls);
    Ok(())
}

fn outcome_kind(outcome: &DefectOutcome) -> String {
    match outcome {
        DefectOutcome::Updated { .. } => String::from("updated"),
        DefectOutcome::Skipped { .. } => String::from("skipped"),
    }
}
