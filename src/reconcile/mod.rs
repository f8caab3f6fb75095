//! Defect status reconciliation.
//!
//! The engine walks a list of defect IDs in order. For each ID it fetches the
//! defect, checks the current status against the configured from-status
//! prefix, and either replaces the status with the into-status or skips the
//! defect. Processing is strictly sequential.
//!
//! A malformed ID or any gateway failure aborts the run at that ID. Defects
//! updated before the failure stay updated; there is no rollback.

use std::fmt;

use tracing::{debug, info};

use crate::config::AlmConfig;
use crate::error::{ConfigError, ReconcileError, Result};
use crate::gateway::{Defect, DefectGateway, ProjectScope};
use crate::manifest::DeliveryManifest;

/// The status change applied to eligible defects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    from_status: String,
    into_status: String,
}

impl StatusTransition {
    /// Creates a transition. An empty `from_status` admits every defect.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` for `intostatus` when
    /// `into_status` is empty.
    pub fn new(from_status: &str, into_status: &str) -> std::result::Result<Self, ConfigError> {
        if into_status.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: String::from("intostatus"),
            });
        }
        Ok(Self {
            from_status: String::from(from_status),
            into_status: String::from(into_status),
        })
    }

    /// Creates the transition named by a resolved configuration.
    ///
    /// # Errors
    ///
    /// As for [`StatusTransition::new`].
    pub fn from_config(config: &AlmConfig) -> std::result::Result<Self, ConfigError> {
        Self::new(&config.from_status, &config.into_status)
    }

    /// Returns the status prefix a defect must carry to be updated.
    #[must_use]
    pub fn from_status(&self) -> &str {
        &self.from_status
    }

    /// Returns the status eligible defects are moved into.
    #[must_use]
    pub fn into_status(&self) -> &str {
        &self.into_status
    }

    /// Whether a defect in `status` may be transitioned.
    ///
    /// ALM statuses are hierarchical (`Open/InProgress`), so this is a
    /// prefix match rather than equality.
    #[must_use]
    pub fn admits(&self, status: &str) -> bool {
        status.starts_with(&self.from_status)
    }

    /// Builds the update record sent for defect `id`.
    #[must_use]
    pub fn target(&self, id: u64) -> Defect {
        Defect::status_update(id, &self.into_status)
    }
}

/// What happened to one requested defect.
#[derive(Debug, Clone, PartialEq)]
pub enum DefectOutcome {
    /// The status was replaced.
    Updated {
        /// Defect identifier.
        id: u64,
        /// The record returned by the gateway after the update.
        defect: Defect,
    },
    /// The current status did not match the from-status prefix.
    Skipped {
        /// Defect identifier.
        id: u64,
        /// The status the defect was found in.
        status: String,
    },
}

impl DefectOutcome {
    /// Returns the defect identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        match self {
            Self::Updated { id, .. } | Self::Skipped { id, .. } => *id,
        }
    }

    /// Whether the defect was updated.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

impl fmt::Display for DefectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated { id, defect } => write!(f, "{id}\tupdated\t{}", defect.status),
            Self::Skipped { id, status } => write!(f, "{id}\tskipped\t{status}"),
        }
    }
}

/// Reconciles explicit defect IDs within one project.
///
/// Outcomes are returned in the order of `ids`.
///
/// # Errors
///
/// Returns `ReconcileError::InvalidDefectId` for the first ID that is not an
/// unsigned 64-bit integer, or the first `GatewayError` raised while fetching or updating.
/// IDs after the failing one are not processed.
pub async fn reconcile_ids<S>(
    gateway: &dyn DefectGateway,
    scope: &ProjectScope,
    ids: &[S],
    transition: &StatusTransition,
) -> Result<Vec<DefectOutcome>>
where
    S: AsRef<str> + Sync,
{
    let mut outcomes = Vec::with_capacity(ids.len());
    for raw in ids {
        let id = parse_defect_id(raw.as_ref())?;
        let outcome = reconcile_defect(gateway, scope, id, transition).await?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Reconciles every defect listed in a delivery manifest, scoped to the
/// manifest's domain and project.
///
/// # Errors
///
/// As for [`reconcile_ids`].
pub async fn reconcile_manifest(
    gateway: &dyn DefectGateway,
    manifest: &DeliveryManifest,
    transition: &StatusTransition,
) -> Result<Vec<DefectOutcome>> {
    let scope = manifest.scope()?;
    info!(
        domain = scope.domain(),
        project = scope.project(),
        defects = manifest.defects().len(),
        "reconciling delivery"
    );
    reconcile_ids(gateway, &scope, manifest.defects(), transition).await
}

fn parse_defect_id(raw: &str) -> std::result::Result<u64, ReconcileError> {
    raw.parse()
        .map_err(|source| ReconcileError::InvalidDefectId {
            value: String::from(raw),
            source,
        })
}

async fn reconcile_defect(
    gateway: &dyn DefectGateway,
    scope: &ProjectScope,
    id: u64,
    transition: &StatusTransition,
) -> Result<DefectOutcome> {
    let current = gateway.get_defect(scope, id).await?;
    debug!(id, status = %current.status, "fetched defect");

    if !transition.admits(&current.status) {
        info!(
            id,
            status = %current.status,
            from_status = transition.from_status(),
            "skipping defect, status does not match"
        );
        return Ok(DefectOutcome::Skipped {
            id,
            status: current.status,
        });
    }

    let defect = gateway.put_defect(scope, &transition.target(id)).await?;
    info!(
        id,
        from = %current.status,
        into = transition.into_status(),
        "updated defect"
    );
    Ok(DefectOutcome::Updated { id, defect })
}
