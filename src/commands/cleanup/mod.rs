//! Implementation of the `helm-v2-cleanup cleanup` command.
//!
//! Removes what a Helm v2 installation leaves behind:
//! - Release records Tiller stored as ConfigMaps or Secrets
//! - The in-cluster Tiller deployment
//! - The local Helm v2 home folder
//!
//! # Safety
//!
//! - Asks for confirmation unless `--skip-confirmation` is given
//! - `--dry-run` describes every action without performing it
//! - `--name` removes a single release and nothing else
//!
//! # Failure
//!
//! Phases run in a fixed order and the first failure stops the run. Phases
//! that already finished stay finished; the error says which ones did.

mod confirm;
mod options;
mod sequencer;
mod types;


pub use types::{CleanupRequest, Phase};

use crate::cli::CleanupArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::kube::Kubectl;
use crate::prompt::{Confirm, stdio_prompt};
use crate::v2::{HomeFolderRemover, KubectlControllerRemover, KubectlReleaseStore};

use confirm::confirm_cleanup;
use options::resolve_plan;
use sequencer::{Collaborators, execute_cleanup, final_message};
use types::CleanupOutcome;

/// Execute the `cleanup` command.
///
/// # Behavior
///
/// - No category flag and no `--name`: clean configuration, releases and Tiller
/// - `--name <release>`: remove every version of that release only
/// - `--tiller-out-cluster`: Tiller cleanup is skipped
pub fn cmd_cleanup(args: CleanupArgs) -> Result<()> {
    let settings = Settings::resolve(args.settings.file.as_deref(), args.settings.overrides())?;

    let kubectl = Kubectl::from_settings(&settings);
    let releases = KubectlReleaseStore::new(kubectl.clone());
    let controller = KubectlControllerRemover::new(kubectl);
    let config = HomeFolderRemover::new(settings.helm_v2_home.clone());
    let collaborators = Collaborators {
        releases: &releases,
        controller: &controller,
        config: &config,
    };

    let mut prompt = stdio_prompt();
    run_cleanup(args.request(), &settings, &mut prompt, &collaborators)?;
    Ok(())
}

/// Validate, confirm, and execute a cleanup request.
pub fn run_cleanup(
    request: CleanupRequest,
    settings: &Settings,
    prompt: &mut dyn Confirm,
    collaborators: &Collaborators<'_>,
) -> Result<CleanupOutcome> {
    let plan = resolve_plan(request, settings)?;

    if plan.phases().is_empty() {
        tracing::info!(
            "Tiller runs outside the cluster and no other cleanup was requested: nothing to clean up."
        );
        return Ok(CleanupOutcome::NothingToClean);
    }

    if plan.dry_run {
        tracing::info!("NOTE: This is in dry-run mode, the following actions will not be executed.");
        tracing::info!("Run without --dry-run to take the actions described below:");
    }

    if !confirm_cleanup(&plan, prompt)? {
        return Ok(CleanupOutcome::Declined);
    }

    tracing::info!("Helm v2 data will be cleaned up.");

    let report = execute_cleanup(&plan, collaborators)?;

    tracing::info!("{}", final_message(&report));

    Ok(CleanupOutcome::Completed(report))
}
