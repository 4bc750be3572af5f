//! Helm v2 state the cleanup removes.
//!
//! The cleanup command talks to Helm v2 only through the traits defined
//! here, one per kind of residual state. Concrete implementations backed by
//! `kubectl` and the local filesystem live in the submodules.

mod home;
mod releases;
mod tiller;

pub use home::{HomeFolderRemover, resolve_home_dir};
pub use releases::KubectlReleaseStore;
pub use tiller::KubectlControllerRemover;

use crate::config::StorageType;
use crate::error::Result;
use std::collections::BTreeSet;

/// Where Tiller kept the release records a cleanup works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseScope<'a> {
    pub namespace: &'a str,
    /// Label selector matching every release record.
    pub label: &'a str,
    pub storage: StorageType,
}

/// One stored version record of a Helm v2 release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersionRef {
    pub name: String,
    pub version: i32,
}

/// Release records Tiller kept in the cluster.
pub trait ReleaseStore {
    /// List every stored version of the named release.
    ///
    /// Fails with `LookupError`.
    fn list_release_versions(
        &self,
        scope: &ReleaseScope<'_>,
        name: &str,
    ) -> Result<Vec<ReleaseVersionRef>>;

    /// Delete every version of every release.
    ///
    /// Fails with `DeletionError`.
    fn delete_all_release_versions(&self, scope: &ReleaseScope<'_>, dry_run: bool) -> Result<()>;

    /// Delete exactly the given versions of the named release.
    ///
    /// Fails with `DeletionError`.
    fn delete_release_versions(
        &self,
        scope: &ReleaseScope<'_>,
        name: &str,
        versions: &BTreeSet<i32>,
        dry_run: bool,
    ) -> Result<()>;
}

/// The in-cluster Tiller deployment.
pub trait ControllerRemover {
    /// Remove the Tiller objects matching `selector` in `namespace`.
    fn remove_controller(&self, namespace: &str, selector: &str, dry_run: bool) -> Result<()>;
}

/// The local Helm v2 configuration folder.
pub trait ConfigRemover {
    /// Remove the Helm v2 home folder.
    fn remove_config_root(&self, dry_run: bool) -> Result<()>;
}
