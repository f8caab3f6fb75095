//! Orchestration API for `alm` commands.
//!
//! This module provides one function per CLI command: [`list_defects`],
//! [`deliver`], [`list_domains`], [`update_defects`], and [`show_releases`].
//! Each runs its gateway calls inside a [`Session`], so sign-in and sign-out
//! bracket the work.
//!
//! All functions accept library-owned types (not clap types) and return
//! [`crate::error::Result`]. They do not print to stdout/stderr or call
//! `std::process::exit`; the CLI adapter renders what they return.

use tracing::warn;

use crate::config::AlmConfig;
use crate::error::{AlmError, Result as AlmResult};
use crate::gateway::{Defect, Domain, ProjectScope, Release};
use crate::manifest::DeliveryManifest;
use crate::reconcile::{DefectOutcome, StatusTransition, reconcile_ids, reconcile_manifest};
use crate::session::Session;

/// Builds the project scope named by a resolved configuration.
///
/// # Errors
///
/// Returns `ConfigError::MissingRequired` if `domain` or `project` is empty.
pub fn project_scope(config: &AlmConfig) -> AlmResult<ProjectScope> {
    Ok(ProjectScope::new(&config.domain, &config.project)?)
}

/// List the defects of a project.
///
/// # Errors
///
/// Returns sign-in, transport, or decode errors from the gateway.
pub async fn list_defects(session: &Session<'_>, scope: &ProjectScope) -> AlmResult<Vec<Defect>> {
    session
        .run(async { session.gateway().list_defects(scope).await.map_err(AlmError::from) })
        .await
}

/// List every domain visible to the signed-in user.
///
/// # Errors
///
/// Returns sign-in, transport, or decode errors from the gateway.
pub async fn list_domains(session: &Session<'_>) -> AlmResult<Vec<Domain>> {
    session
        .run(async { session.gateway().list_domains().await.map_err(AlmError::from) })
        .await
}

/// Reconcile the defects of a delivery manifest.
///
/// The manifest's domain and project take the place of the configured ones.
///
/// # Errors
///
/// Returns sign-in errors, and any error that aborted reconciliation.
pub async fn deliver(
    session: &Session<'_>,
    manifest: &DeliveryManifest,
    transition: &StatusTransition,
) -> AlmResult<Vec<DefectOutcome>> {
    session
        .run(reconcile_manifest(session.gateway(), manifest, transition))
        .await
}

/// Reconcile explicitly named defects.
///
/// # Errors
///
/// Returns sign-in errors, and any error that aborted reconciliation.
pub async fn update_defects<S>(
    session: &Session<'_>,
    scope: &ProjectScope,
    ids: &[S],
    transition: &StatusTransition,
) -> AlmResult<Vec<DefectOutcome>>
where
    S: AsRef<str> + Sync,
{
    session
        .run(reconcile_ids(session.gateway(), scope, ids, transition))
        .await
}

/// Show the releases of a project.
///
/// With no `ids` every release is returned. Otherwise only releases whose ID
/// is listed are returned, in server order; requested IDs that match no
/// release are logged.
///
/// # Errors
///
/// Returns sign-in, transport, or decode errors from the gateway.
pub async fn show_releases<S>(
    session: &Session<'_>,
    scope: &ProjectScope,
    ids: &[S],
) -> AlmResult<Vec<Release>>
where
    S: AsRef<str> + Sync,
{
    let releases = session
        .run(async { session.gateway().list_releases(scope).await.map_err(AlmError::from) })
        .await?;
    Ok(select_releases(releases, ids))
}

fn select_releases<S: AsRef<str>>(releases: Vec<Release>, ids: &[S]) -> Vec<Release> {
    if ids.is_empty() {
        return releases;
    }
    for raw in ids {
        let wanted = raw.as_ref();
        if !releases.iter().any(|release| release.id.to_string() == wanted) {
            warn!(id = wanted, "no such release");
        }
    }
    releases
        .into_iter()
        .filter(|release| {
            let id = release.id.to_string();
            ids.iter().any(|wanted| wanted.as_ref() == id)
        })
        .collect()
}
