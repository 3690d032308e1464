//! Deletion of a spec's installed files.

use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::error::UninstallError;
use crate::package::{InstallLayout, PackageSpec, layout};
use crate::runtime::{Runtime, UserInteraction, same_path};

use super::pending::PendingSet;
use super::Uninstaller;

/// Removes generated documentation for a package.
#[cfg_attr(test, mockall::automock)]
pub trait DocRemover {
    fn remove_docs(&self, spec: &PackageSpec) -> Result<()>;
}

/// Deletes `<install_root>/doc/<full_name>` when present.
pub struct DocDirRemover<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> DocDirRemover<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }
}

impl<R: Runtime> DocRemover for DocDirRemover<'_, R> {
    fn remove_docs(&self, spec: &PackageSpec) -> Result<()> {
        let doc_dir = InstallLayout::new(spec.install_root()).doc_dir(&spec.full_name());
        if self.runtime.exists(&doc_dir) {
            debug!("Removing documentation {:?}", doc_dir);
            self.runtime.remove_dir_all(&doc_dir)?;
        }
        Ok(())
    }
}

impl<R: Runtime, U: UserInteraction> Uninstaller<'_, R, U> {
    /// The root `spec` must live under to be removable.
    fn owning_root(&self, spec: &PackageSpec) -> &Path {
        match &self.request.user_root {
            Some(user_root) if same_path(spec.install_root(), user_root) => user_root,
            _ => &self.request.install_dir,
        }
    }

    /// Whether `spec`'s gem directory is exactly where `root` would put it.
    fn path_ok(root: &Path, spec: &PackageSpec) -> bool {
        let layout = InstallLayout::new(root);
        same_path(spec.gem_dir(), &layout.gem_dir(&spec.full_name()))
            || same_path(spec.gem_dir(), &layout.gem_dir(&spec.legacy_name()))
    }

    /// Delete the gem directory, metadata file, cached package and docs of
    /// `spec`, then take it out of `pending`.
    pub fn remove(&self, spec: &PackageSpec, pending: &mut PendingSet) -> Result<()> {
        let root = self.owning_root(spec);
        if !Self::path_ok(root, spec) {
            return Err(UninstallError::OwnershipViolation {
                full_name: spec.full_name(),
                root: self.request.install_dir.clone(),
            }
            .into());
        }

        let install_root = spec.install_root();
        if !self.runtime.is_writable(install_root) {
            return Err(UninstallError::PermissionDenied {
                path: install_root.to_path_buf(),
            }
            .into());
        }

        let layout = InstallLayout::new(install_root);

        if self.runtime.exists(spec.gem_dir()) {
            debug!("Removing {:?}", spec.gem_dir());
            self.runtime.remove_dir_all(spec.gem_dir())?;
        }

        let spec_file = layout.spec_file(&spec.full_name());
        let spec_file = if self.runtime.exists(&spec_file) {
            spec_file
        } else {
            layout.spec_file(&spec.legacy_name())
        };
        self.remove_file_if_present(&spec_file)?;

        let cache_file = layout::cache_file(&spec.file_name(), install_root);
        let cache_file = if self.runtime.exists(&cache_file) {
            cache_file
        } else {
            layout.cache_file(&spec.legacy_name())
        };
        self.remove_file_if_present(&cache_file)?;

        self.docs.remove_docs(spec)?;

        self.ui
            .notify(&format!("Successfully uninstalled {}", spec.full_name()));
        pending.remove(spec);
        Ok(())
    }

    fn remove_file_if_present(&self, path: &Path) -> Result<()> {
        if self.runtime.exists(path) {
            debug!("Removing {:?}", path);
            self.runtime.remove_file(path)?;
        }
        Ok(())
    }
}
