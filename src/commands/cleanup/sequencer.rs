//! Cleanup execution: runs the planned phases in order.

use super::types::{CleanupPlan, CleanupReport, Phase};
use crate::error::{CleanupError, Result};
use crate::v2::{ConfigRemover, ControllerRemover, ReleaseStore};
use std::collections::BTreeSet;

/// The Helm v2 services each phase delegates to.
pub struct Collaborators<'a> {
    pub releases: &'a dyn ReleaseStore,
    pub controller: &'a dyn ControllerRemover,
    pub config: &'a dyn ConfigRemover,
}

/// Execute the plan: release data, then Tiller, then configuration.
///
/// Stops at the first failing phase. Earlier phases are not rolled back; the
/// returned `PhaseFailed` error lists them.
pub fn execute_cleanup(plan: &CleanupPlan, collaborators: &Collaborators<'_>) -> Result<CleanupReport> {
    let mut report = CleanupReport {
        completed: Vec::new(),
        dry_run: plan.dry_run,
    };

    for phase in plan.phases() {
        let outcome = match phase {
            Phase::Release => clean_releases(plan, collaborators.releases),
            Phase::Tiller => clean_tiller(plan, collaborators.controller),
            Phase::Config => collaborators.config.remove_config_root(plan.dry_run),
        };

        if let Err(source) = outcome {
            return Err(CleanupError::PhaseFailed {
                phase,
                completed: report.completed,
                source: Box::new(source),
            });
        }
        report.completed.push(phase);
    }

    Ok(report)
}

fn clean_releases(plan: &CleanupPlan, releases: &dyn ReleaseStore) -> Result<()> {
    let scope = plan.release_scope();
    match &plan.release_name {
        None => {
            tracing::info!("[Helm 2] Releases will be deleted.");
            releases.delete_all_release_versions(&scope, plan.dry_run)?;
            if !plan.dry_run {
                tracing::info!("[Helm 2] Releases deleted.");
            }
        }
        Some(name) => {
            tracing::info!("[Helm 2] Release '{}' will be deleted.", name);
            // Every stored version belongs to the release and goes with it.
            let versions: BTreeSet<i32> = releases
                .list_release_versions(&scope, name)?
                .into_iter()
                .map(|release| release.version)
                .collect();
            releases.delete_release_versions(&scope, name, &versions, plan.dry_run)?;
            if !plan.dry_run {
                tracing::info!("[Helm 2] Release '{}' deleted.", name);
            }
        }
    }
    Ok(())
}

fn clean_tiller(plan: &CleanupPlan, controller: &dyn ControllerRemover) -> Result<()> {
    tracing::info!(
        "[Helm 2] Tiller in \"{}\" namespace will be removed.",
        plan.tiller_namespace
    );
    controller.remove_controller(&plan.tiller_namespace, &plan.tiller_selector, plan.dry_run)?;
    if !plan.dry_run {
        tracing::info!(
            "[Helm 2] Tiller in \"{}\" namespace was removed.",
            plan.tiller_namespace
        );
    }
    Ok(())
}

/// Closing line for a run that reached the end of its plan.
pub fn final_message(report: &CleanupReport) -> &'static str {
    if report.dry_run {
        "Dry-run mode: the actions above were described only, nothing was removed."
    } else {
        "Helm v2 data was cleaned up successfully."
    }
}
