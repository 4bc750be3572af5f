//! Cleanup option resolution.

use super::types::{CleanupPlan, CleanupRequest};
use crate::config::Settings;
use crate::error::{CleanupError, Result};

const EXCLUSIVE_RELEASE_MESSAGE: &str = "cleanup of a specific release is a singular operation. \
Other operations like configuration cleanup or Tiller cleanup are not allowed in conjunction with the operation";

/// Turn the requested flags into a validated plan.
///
/// - A release name forces release cleanup and excludes the other categories.
/// - No category and no release name means all three categories.
pub fn resolve_plan(request: CleanupRequest, settings: &Settings) -> Result<CleanupPlan> {
    let release_name = request.release_name.filter(|name| !name.is_empty());

    let (config_cleanup, release_cleanup, tiller_cleanup) = match &release_name {
        Some(_) => {
            if request.config_cleanup || request.tiller_cleanup {
                return Err(CleanupError::ValidationError(
                    EXCLUSIVE_RELEASE_MESSAGE.to_string(),
                ));
            }
            (false, true, false)
        }
        None if !request.config_cleanup && !request.release_cleanup && !request.tiller_cleanup => {
            (true, true, true)
        }
        None => (
            request.config_cleanup,
            request.release_cleanup,
            request.tiller_cleanup,
        ),
    };

    Ok(CleanupPlan {
        config_cleanup,
        release_cleanup,
        tiller_cleanup,
        release_name,
        dry_run: request.dry_run,
        skip_confirmation: request.skip_confirmation,
        storage_type: settings.release_storage,
        tiller_namespace: settings.tiller_namespace.clone(),
        label: settings.label.clone(),
        tiller_selector: settings.tiller_selector.clone(),
        tiller_out_cluster: settings.tiller_out_cluster,
    })
}
