//! Command implementations for helm-v2-cleanup.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

pub mod cleanup;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Cleanup(args) => cleanup::cmd_cleanup(args),
    }
}
