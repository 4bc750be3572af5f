//! Warning message and operator confirmation.

use super::types::CleanupPlan;
use crate::error::Result;
use crate::prompt::Confirm;

/// Build the warning naming exactly what the plan removes.
pub fn confirmation_message(plan: &CleanupPlan) -> String {
    let mut targets = Vec::new();
    if plan.config_cleanup {
        targets.push("\"Helm v2 Configuration\"".to_string());
    }
    if plan.release_cleanup {
        match &plan.release_name {
            Some(name) => targets.push(format!("\"Release '{}' Data\"", name)),
            None => targets.push("\"Release Data\"".to_string()),
        }
    }
    if plan.runs_tiller_phase() {
        targets.push("\"Tiller\"".to_string());
    }

    let mut lines = vec![format!("WARNING: {} will be removed.", targets.join(" "))];
    if plan.release_cleanup && plan.release_name.is_none() {
        lines.push(
            "This will clean up all releases managed by Helm v2. It will not be possible to \
             restore them if you haven't made a backup of the releases."
                .to_string(),
        );
    }
    if plan.release_name.is_none() {
        lines.push("Helm v2 may not be usable afterwards.".to_string());
    }

    lines.join("\n")
}

/// Show the warning and obtain consent.
///
/// Returns `Ok(false)` when the operator declines.
pub fn confirm_cleanup(plan: &CleanupPlan, prompt: &mut dyn Confirm) -> Result<bool> {
    println!("{}", confirmation_message(plan));
    println!();

    if plan.skip_confirmation {
        tracing::info!("Skipping confirmation before performing cleanup.");
        return Ok(true);
    }

    let proceed = prompt.confirm("Cleanup", "cleanup Helm v2 data")?;
    if !proceed {
        tracing::info!(
            "Cleanup will not proceed as the user didn't answer (Y|y) in order to continue."
        );
    }
    Ok(proceed)
}
