//! On-disk layout of an install root.

use std::path::{Path, PathBuf};

pub const SPEC_EXTENSION: &str = "gemspec";
pub const PACKAGE_EXTENSION: &str = "gem";

/// Path conventions for a single install root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns: `<root>/gems`
    pub fn gems_dir(&self) -> PathBuf {
        self.root.join("gems")
    }

    /// Returns: `<root>/gems/<dir_name>`
    pub fn gem_dir(&self, dir_name: &str) -> PathBuf {
        self.gems_dir().join(dir_name)
    }

    /// Returns: `<root>/specifications`
    pub fn spec_dir(&self) -> PathBuf {
        self.root.join("specifications")
    }

    /// Returns: `<root>/specifications/<base_name>.gemspec`
    pub fn spec_file(&self, base_name: &str) -> PathBuf {
        self.spec_dir()
            .join(format!("{}.{}", base_name, SPEC_EXTENSION))
    }

    /// Returns: `<root>/cache/<base_name>.gem`
    pub fn cache_file(&self, base_name: &str) -> PathBuf {
        cache_file(&format!("{}.{}", base_name, PACKAGE_EXTENSION), &self.root)
    }

    /// Returns: `<root>/bin`
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Returns: `<root>/doc/<full_name>`
    pub fn doc_dir(&self, full_name: &str) -> PathBuf {
        self.root.join("doc").join(full_name)
    }
}

/// Locate a cached package file by name under an install root.
pub fn cache_file(file_name: &str, install_root: &Path) -> PathBuf {
    install_root.join("cache").join(file_name)
}
