//! CLI argument parsing for helm-v2-cleanup.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::commands::cleanup::CleanupRequest;
use crate::config::SettingsOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Decommission a Helm v2 installation.
///
/// Removes Helm v2 configuration, the release data Tiller stored in the
/// cluster, and the Tiller deployment itself. Helm v2 may not be usable
/// afterwards.
#[derive(Parser, Debug)]
#[command(name = "helm-v2-cleanup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cleanup Helm v2 configuration, release data and Tiller deployment.
    ///
    /// Without any cleanup flag, all three are removed.
    Cleanup(CleanupArgs),
}

/// Arguments for the `cleanup` command.
#[derive(Parser, Debug)]
pub struct CleanupArgs {
    /// If set, configuration cleanup performed.
    #[arg(long)]
    pub config_cleanup: bool,

    /// If set, release data cleanup performed.
    #[arg(long)]
    pub release_cleanup: bool,

    /// If set, Tiller cleanup performed.
    #[arg(long)]
    pub tiller_cleanup: bool,

    /// The release name. When it is specified, the named release and its
    /// versions will be removed only. Should not be used with other cleanup
    /// operations.
    #[arg(long)]
    pub name: Option<String>,

    /// If set, skips confirmation message before performing cleanup.
    #[arg(long)]
    pub skip_confirmation: bool,

    /// Simulate the cleanup: describe every action without performing it.
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

impl CleanupArgs {
    /// The cleanup the operator asked for.
    pub fn request(&self) -> CleanupRequest {
        CleanupRequest {
            config_cleanup: self.config_cleanup,
            release_cleanup: self.release_cleanup,
            tiller_cleanup: self.tiller_cleanup,
            release_name: self.name.clone(),
            dry_run: self.dry_run,
            skip_confirmation: self.skip_confirmation,
        }
    }
}

/// Where the Helm v2 installation lives.
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// YAML settings file providing defaults for the options below.
    #[arg(long = "settings", env = "HELM_V2_CLEANUP_SETTINGS", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Namespace of Tiller [default: kube-system].
    #[arg(long = "tiller-ns", env = "TILLER_NAMESPACE", value_name = "NAMESPACE")]
    pub tiller_namespace: Option<String>,

    /// Label to select Tiller resources by [default: OWNER=TILLER].
    #[arg(short = 'l', long)]
    pub label: Option<String>,

    /// Release storage type/object, configmaps or secrets [default: configmaps].
    #[arg(short = 's', long)]
    pub release_storage: Option<String>,

    /// When Tiller is not running in the cluster, e.g. Tillerless.
    #[arg(short = 't', long)]
    pub tiller_out_cluster: bool,

    /// Name of the kubeconfig context to use.
    #[arg(long)]
    pub kube_context: Option<String>,

    /// Path to the kubeconfig file.
    #[arg(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// Helm v2 home folder [default: $HELM_HOME or ~/.helm].
    #[arg(long, env = "HELM_V2_HOME")]
    pub helm_v2_home: Option<PathBuf>,
}

impl SettingsArgs {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            tiller_namespace: self.tiller_namespace.clone(),
            label: self.label.clone(),
            release_storage: self.release_storage.clone(),
            tiller_out_cluster: self.tiller_out_cluster,
            kube_context: self.kube_context.clone(),
            kubeconfig: self.kubeconfig.clone(),
            helm_v2_home: self.helm_v2_home.clone(),
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_cleanup(args: &[&str]) -> CleanupArgs {
        let mut argv = vec!["helm-v2-cleanup", "cleanup"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Cleanup(args) => args,
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_cleanup_defaults() {
        let args = parse_cleanup(&[]);
        let request = args.request();
        assert!(!request.config_cleanup);
        assert!(!request.release_cleanup);
        assert!(!request.tiller_cleanup);
        assert!(request.release_name.is_none());
        assert!(!request.dry_run);
        assert!(!request.skip_confirmation);
    }

    #[test]
    fn parse_cleanup_flags() {
        let args = parse_cleanup(&[
            "--release-cleanup",
            "--name",
            "app1",
            "--skip-confirmation",
            "--dry-run",
        ]);
        let request = args.request();
        assert!(request.release_cleanup);
        assert_eq!(request.release_name.as_deref(), Some("app1"));
        assert!(request.skip_confirmation);
        assert!(request.dry_run);
    }

    #[test]
    fn parse_settings_flags() {
        let args = parse_cleanup(&[
            "--tiller-ns",
            "tiller-world",
            "-l",
            "OWNER=TILLER,team=a",
            "-s",
            "secrets",
            "-t",
            "--kube-context",
            "prod",
        ]);
        let overrides = args.settings.overrides();
        assert_eq!(overrides.tiller_namespace.as_deref(), Some("tiller-world"));
        assert_eq!(overrides.label.as_deref(), Some("OWNER=TILLER,team=a"));
        assert_eq!(overrides.release_storage.as_deref(), Some("secrets"));
        assert!(overrides.tiller_out_cluster);
        assert_eq!(overrides.kube_context.as_deref(), Some("prod"));
    }

    #[test]
    fn cleanup_requires_subcommand() {
        assert!(Cli::try_parse_from(["helm-v2-cleanup"]).is_err());
    }
}
