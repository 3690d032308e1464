//! Parameters of one uninstall invocation.

use std::path::PathBuf;

use crate::package::Requirement;

/// Whether to delete a package's executables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutableChoice {
    Yes,
    No,
    /// Prompt the user (default answer: yes).
    #[default]
    Ask,
}

impl ExecutableChoice {
    /// Map a `--executables` / `--no-executables` flag pair; neither means ask.
    pub fn from_flags(executables: bool, no_executables: bool) -> Self {
        match (executables, no_executables) {
            (true, _) => ExecutableChoice::Yes,
            (false, true) => ExecutableChoice::No,
            (false, false) => ExecutableChoice::Ask,
        }
    }
}

/// What to uninstall and how.
#[derive(Debug, Clone, PartialEq)]
pub struct UninstallRequest {
    pub name: String,
    pub requirement: Requirement,
    /// Home install root, searched always.
    pub install_dir: PathBuf,
    /// User install root, searched only when set.
    pub user_root: Option<PathBuf>,
    pub executables: ExecutableChoice,
    /// Remove every matching version without asking which one.
    pub all: bool,
    /// Skip the dependency check.
    pub ignore_dependencies: bool,
    /// Directory executables live in; defaults to `<install_root>/bin`.
    pub bin_dir: Option<PathBuf>,
    /// Apply `exec_format` to executable names before deleting them.
    pub format_executable: bool,
    /// Template where `%s` stands for the executable name, e.g. `%s3.2`.
    pub exec_format: String,
}

impl UninstallRequest {
    pub fn new(name: impl Into<String>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            requirement: Requirement::default(),
            install_dir: install_dir.into(),
            user_root: None,
            executables: ExecutableChoice::default(),
            all: false,
            ignore_dependencies: false,
            bin_dir: None,
            format_executable: false,
            exec_format: "%s".to_string(),
        }
    }

    /// The file name an executable was installed under.
    pub fn formatted_program_filename(&self, name: &str) -> String {
        if self.format_executable {
            self.exec_format.replace("%s", name)
        } else {
            name.to_string()
        }
    }
}
