//! Errors surfaced by the uninstaller.
//!
//! Operations return `anyhow::Result`; these variants travel inside it so the
//! caller can `downcast_ref::<UninstallError>()` to tell them apart.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UninstallError {
    /// No installed spec matched the requested name and version.
    #[error("cannot uninstall {name}: not installed, check `gemrm list {name}`")]
    NotInstalled { name: String },

    /// A menu answer outside the offered range. Reported, never returned.
    #[error("Error: must enter a number [1-{max}]")]
    InvalidSelection { max: usize },

    /// Removal would break a dependent package and the user declined to continue.
    #[error("uninstallation of {full_name} aborted due to dependent package(s)")]
    DependencyConflict { full_name: String },

    /// The spec's files do not live where the configured root says they should.
    #[error("{full_name} is not installed in directory {}", root.display())]
    OwnershipViolation { full_name: String, root: PathBuf },

    /// A directory that must be modified is not writable.
    #[error("permission denied: you don't have write permissions for {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// A registered pre- or post-removal hook failed.
    #[error("removal hook failed for {full_name}")]
    HookFailure {
        full_name: String,
        #[source]
        source: anyhow::Error,
    },
}
