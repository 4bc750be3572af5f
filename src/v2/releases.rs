//! Release records stored by Tiller as ConfigMaps or Secrets.
//!
//! Tiller writes one object per release version, named `<release>.v<version>`
//! and labeled `OWNER=TILLER,NAME=<release>,VERSION=<version>,STATUS=...`.

use super::{ReleaseScope, ReleaseStore, ReleaseVersionRef};
use crate::error::{CleanupError, Result};
use crate::kube::Kubectl;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Vec<StoredObject>,
}

#[derive(Debug, Deserialize)]
struct StoredObject {
    metadata: ObjectMeta,
}

#[derive(Debug, Deserialize)]
struct ObjectMeta {
    name: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
}

/// Release store reached through `kubectl`.
#[derive(Debug, Clone)]
pub struct KubectlReleaseStore {
    kubectl: Kubectl,
}

impl KubectlReleaseStore {
    pub fn new(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }

    /// Fetch the release records matching `selector`, sorted by name and version.
    fn fetch(
        &self,
        scope: &ReleaseScope<'_>,
        selector: &str,
    ) -> std::result::Result<Vec<ReleaseVersionRef>, String> {
        let output = self
            .kubectl
            .run(&[
                "get",
                scope.storage.resource(),
                "--namespace",
                scope.namespace,
                "--selector",
                selector,
                "--output",
                "json",
            ])
            .map_err(|e| e.to_string())?;

        parse_release_versions(&output.stdout)
    }

    fn delete_object(&self, scope: &ReleaseScope<'_>, object: &str) -> Result<()> {
        self.kubectl
            .run(&[
                "delete",
                scope.storage.resource(),
                object,
                "--namespace",
                scope.namespace,
            ])
            .map(|_| ())
            .map_err(|e| {
                CleanupError::DeletionError(format!(
                    "failed to delete release version \"{}\": {}",
                    object, e
                ))
            })
    }
}

/// Storage object name Tiller gives a release version.
pub(super) fn object_name(name: &str, version: i32) -> String {
    format!("{}.v{}", name, version)
}

/// Parse `kubectl get -o json` output into release version references.
pub(super) fn parse_release_versions(json: &str) -> std::result::Result<Vec<ReleaseVersionRef>, String> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let list: ObjectList =
        serde_json::from_str(json).map_err(|e| format!("unexpected kubectl output: {}", e))?;

    let mut versions = Vec::with_capacity(list.items.len());
    for item in list.items {
        let meta = item.metadata;
        let name = meta
            .labels
            .get("NAME")
            .cloned()
            .ok_or_else(|| format!("release record \"{}\" has no NAME label", meta.name))?;
        let version = meta
            .labels
            .get("VERSION")
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(|| {
                format!(
                    "release record \"{}\" has a missing or invalid VERSION label",
                    meta.name
                )
            })?;
        versions.push(ReleaseVersionRef { name, version });
    }

    versions.sort_by(|a, b| a.name.cmp(&b.name).then(a.version.cmp(&b.version)));
    Ok(versions)
}

impl ReleaseStore for KubectlReleaseStore {
    fn list_release_versions(
        &self,
        scope: &ReleaseScope<'_>,
        name: &str,
    ) -> Result<Vec<ReleaseVersionRef>> {
        let selector = format!("{},NAME={}", scope.label, name);
        self.fetch(scope, &selector).map_err(|e| {
            CleanupError::LookupError(format!(
                "release '{}' in \"{}\" namespace: {}",
                name, scope.namespace, e
            ))
        })
    }

    fn delete_all_release_versions(&self, scope: &ReleaseScope<'_>, dry_run: bool) -> Result<()> {
        let records = self.fetch(scope, scope.label).map_err(|e| {
            CleanupError::DeletionError(format!(
                "failed to list release records in \"{}\" namespace: {}",
                scope.namespace, e
            ))
        })?;

        if records.is_empty() {
            tracing::info!(
                "[Helm 2] No release records found in \"{}\" namespace.",
                scope.namespace
            );
            return Ok(());
        }

        for record in &records {
            tracing::info!(
                "[Helm 2] ReleaseVersion \"{}\" will be deleted.",
                object_name(&record.name, record.version)
            );
        }

        if dry_run {
            return Ok(());
        }

        self.kubectl
            .run(&[
                "delete",
                scope.storage.resource(),
                "--namespace",
                scope.namespace,
                "--selector",
                scope.label,
            ])
            .map_err(|e| {
                CleanupError::DeletionError(format!(
                    "failed to delete release records labeled \"{}\": {}",
                    scope.label, e
                ))
            })?;

        for record in &records {
            tracing::info!(
                "[Helm 2] ReleaseVersion \"{}\" deleted.",
                object_name(&record.name, record.version)
            );
        }

        Ok(())
    }

    fn delete_release_versions(
        &self,
        scope: &ReleaseScope<'_>,
        name: &str,
        versions: &BTreeSet<i32>,
        dry_run: bool,
    ) -> Result<()> {
        for &version in versions {
            let object = object_name(name, version);
            tracing::info!("[Helm 2] ReleaseVersion \"{}\" will be deleted.", object);
            if !dry_run {
                self.delete_object(scope, &object)?;
                tracing::info!("[Helm 2] ReleaseVersion \"{}\" deleted.", object);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_VERSIONS: &str = r#"{
        "apiVersion": "v1",
        "kind": "List",
        "items": [
            {"metadata": {"name": "app1.v2", "labels": {"NAME": "app1", "OWNER": "TILLER", "VERSION": "2"}}},
            {"metadata": {"name": "app1.v1", "labels": {"NAME": "app1", "OWNER": "TILLER", "VERSION": "1"}}}
        ]
    }"#;

    #[test]
    fn test_object_name() {
        assert_eq!(object_name("app1", 3), "app1.v3");
    }

    #[test]
    fn test_parse_release_versions_sorted() {
        let versions = parse_release_versions(TWO_VERSIONS).unwrap();
        assert_eq!(
            versions,
            vec![
                ReleaseVersionRef {
                    name: "app1".to_string(),
                    version: 1
                },
                ReleaseVersionRef {
                    name: "app1".to_string(),
                    version: 2
                },
            ]
        );
    }

    #[test]
    fn test_parse_release_versions_empty() {
        assert!(parse_release_versions("").unwrap().is_empty());
        assert!(parse_release_versions(r#"{"items": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_release_versions_rejects_bad_version() {
        let json = r#"{"items": [{"metadata": {"name": "app1.vX", "labels": {"NAME": "app1", "VERSION": "X"}}}]}"#;
        let err = parse_release_versions(json).unwrap_err();
        assert!(err.contains("app1.vX"));
    }

    #[test]
    fn test_parse_release_versions_rejects_garbage() {
        assert!(parse_release_versions("not json").is_err());
    }

    #[cfg(unix)]
    mod with_fake_kubectl {
        use super::*;
        use crate::config::{Settings, StorageType};
        use crate::kube::tests::{fake_kubectl, recorded_calls};
        use serial_test::serial;
        use tempfile::TempDir;

        const SCOPE: ReleaseScope<'static> = ReleaseScope {
            namespace: "kube-system",
            label: "OWNER=TILLER",
            storage: StorageType::Configmaps,
        };

        fn store(dir: &TempDir, stdout: &str, code: i32) -> KubectlReleaseStore {
            let script = fake_kubectl(dir.path(), stdout, code);
            KubectlReleaseStore::new(Kubectl::from_settings(&Settings::default()).with_program(script))
        }

        #[test]
        #[serial]
        fn list_scopes_selector_to_release_name() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, TWO_VERSIONS, 0);

            let versions = store.list_release_versions(&SCOPE, "app1").unwrap();

            assert_eq!(versions.len(), 2);
            assert_eq!(
                recorded_calls(temp_dir.path()),
                vec![
                    "get configmaps --namespace kube-system --selector OWNER=TILLER,NAME=app1 --output json"
                ]
            );
        }

        #[test]
        #[serial]
        fn list_failure_is_lookup_error() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, "", 1);

            let err = store.list_release_versions(&SCOPE, "app1").unwrap_err();

            assert!(matches!(err, CleanupError::LookupError(_)));
        }

        #[test]
        #[serial]
        fn delete_versions_deletes_each_object() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, "", 0);

            store
                .delete_release_versions(&SCOPE, "app1", &BTreeSet::from([1, 3]), false)
                .unwrap();

            assert_eq!(
                recorded_calls(temp_dir.path()),
                vec![
                    "delete configmaps app1.v1 --namespace kube-system",
                    "delete configmaps app1.v3 --namespace kube-system",
                ]
            );
        }

        #[test]
        #[serial]
        fn delete_versions_dry_run_runs_nothing() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, "", 0);

            store
                .delete_release_versions(&SCOPE, "app1", &BTreeSet::from([1, 2]), true)
                .unwrap();

            assert!(recorded_calls(temp_dir.path()).is_empty());
        }

        #[test]
        #[serial]
        fn delete_versions_failure_is_deletion_error() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, "", 1);

            let err = store
                .delete_release_versions(&SCOPE, "app1", &BTreeSet::from([1]), false)
                .unwrap_err();

            assert!(matches!(err, CleanupError::DeletionError(_)));
            assert!(err.to_string().contains("app1.v1"));
        }

        #[test]
        #[serial]
        fn delete_all_lists_then_deletes_by_label() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, TWO_VERSIONS, 0);

            store.delete_all_release_versions(&SCOPE, false).unwrap();

            let calls = recorded_calls(temp_dir.path());
            assert_eq!(calls.len(), 2);
            assert!(calls[0].starts_with("get configmaps"));
            assert_eq!(
                calls[1],
                "delete configmaps --namespace kube-system --selector OWNER=TILLER"
            );
        }

        #[test]
        #[serial]
        fn delete_all_dry_run_only_lists() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, TWO_VERSIONS, 0);

            store.delete_all_release_versions(&SCOPE, true).unwrap();

            let calls = recorded_calls(temp_dir.path());
            assert_eq!(calls.len(), 1);
            assert!(calls[0].starts_with("get configmaps"));
        }

        #[test]
        #[serial]
        fn scope_selects_storage_namespace_and_label() {
            let temp_dir = TempDir::new().unwrap();
            let store = store(&temp_dir, TWO_VERSIONS, 0);
            let scope = ReleaseScope {
                namespace: "tiller-world",
                label: "OWNER=TILLER,team=a",
                storage: StorageType::Secrets,
            };

            store.list_release_versions(&scope, "app1").unwrap();
            store
                .delete_release_versions(&scope, "app1", &BTreeSet::from([2]), false)
                .unwrap();

            assert_eq!(
                recorded_calls(temp_dir.path()),
                vec![
                    "get secrets --namespace tiller-world --selector OWNER=TILLER,team=a,NAME=app1 --output json",
                    "delete secrets app1.v2 --namespace tiller-world",
                ]
            );
        }
    }
}
