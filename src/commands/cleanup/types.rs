//! Data types for the cleanup command.

use crate::config::StorageType;
use crate::v2::ReleaseScope;
use std::fmt;

/// Cleanup categories and modes as the operator asked for them.
#[derive(Debug, Clone, Default)]
pub struct CleanupRequest {
    pub config_cleanup: bool,
    pub release_cleanup: bool,
    pub tiller_cleanup: bool,
    /// Restrict release cleanup to one release.
    pub release_name: Option<String>,
    pub dry_run: bool,
    pub skip_confirmation: bool,
}

/// A validated cleanup plan.
///
/// Built once by [`resolve_plan`](super::options::resolve_plan) and only read
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Remove the local Helm v2 home folder.
    pub config_cleanup: bool,
    /// Remove release records.
    pub release_cleanup: bool,
    /// Remove the Tiller deployment.
    pub tiller_cleanup: bool,
    /// When set, only this release's records are removed.
    pub release_name: Option<String>,
    pub dry_run: bool,
    pub skip_confirmation: bool,
    /// Where Tiller stored releases.
    pub storage_type: StorageType,
    /// Namespace of Tiller and its release records.
    pub tiller_namespace: String,
    /// Label selector of Tiller release records.
    pub label: String,
    /// Label selector of the Tiller deployment and service.
    pub tiller_selector: String,
    /// Tiller ran outside the cluster.
    pub tiller_out_cluster: bool,
}

impl CleanupPlan {
    /// Whether the Tiller phase will actually run.
    ///
    /// Out-of-cluster Tiller has no deployment, so the request is ignored.
    pub fn runs_tiller_phase(&self) -> bool {
        self.tiller_cleanup && !self.tiller_out_cluster
    }

    /// Release records the release phase works on.
    pub fn release_scope(&self) -> ReleaseScope<'_> {
        ReleaseScope {
            namespace: &self.tiller_namespace,
            label: &self.label,
            storage: self.storage_type,
        }
    }

    /// Phases that will run, in execution order.
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = Vec::new();
        if self.release_cleanup {
            phases.push(Phase::Release);
        }
        if self.runs_tiller_phase() {
            phases.push(Phase::Tiller);
        }
        if self.config_cleanup {
            phases.push(Phase::Config);
        }
        phases
    }
}

/// One independently scoped cleanup action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Release,
    Tiller,
    Config,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Release => write!(f, "release data"),
            Phase::Tiller => write!(f, "Tiller"),
            Phase::Config => write!(f, "configuration"),
        }
    }
}

/// Summary of a cleanup run that reached the end of its plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Phases that finished, in execution order.
    pub completed: Vec<Phase>,
    /// Phases only described their actions.
    pub dry_run: bool,
}

/// How a cleanup invocation ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// Every requested phase was suppressed; nothing ran.
    NothingToClean,
    /// The operator did not confirm; nothing ran.
    Declined,
    /// Every planned phase finished.
    Completed(CleanupReport),
}
