use anyhow::Result;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::UninstallError;
use crate::package::{InstallLayout, PackageSpec};
use crate::runtime::{Runtime, UserInteraction};

use super::request::ExecutableChoice;
use super::Uninstaller;

impl<R: Runtime, U: UserInteraction> Uninstaller<'_, R, U> {
    /// Remove the executables `spec` installed that no other installed version
    /// of the same package still provides.
    pub fn remove_executables(&self, spec: &PackageSpec) -> Result<()> {
        if spec.executables().is_empty() {
            return Ok(());
        }

        let provided_elsewhere: BTreeSet<&str> = self
            .home_index
            .specs()
            .filter(|s| s.name() == spec.name() && s.version() != spec.version())
            .flat_map(|s| s.executables())
            .map(String::as_str)
            .collect();

        let retained: Vec<&String> = spec
            .executables()
            .iter()
            .filter(|exe| !provided_elsewhere.contains(exe.as_str()))
            .collect();
        if retained.is_empty() {
            debug!("All executables of {} are provided by other versions", spec);
            return Ok(());
        }

        let remove = match self.request.executables {
            ExecutableChoice::Yes => true,
            ExecutableChoice::No => false,
            ExecutableChoice::Ask => {
                let prompt = format!(
                    "Remove executables:\n\t{}.\n\nIf you remove them, any packages that depend on them will not work.\nContinue with Uninstall?",
                    spec.executables().join(", ")
                );
                self.ui.confirm(&prompt, true)?
            }
        };

        if !remove {
            self.ui
                .notify("Executables and scripts will remain installed.");
            return Ok(());
        }

        let bin_dir = self.bin_dir_for(spec);
        if !self.runtime.is_writable(&bin_dir) {
            return Err(UninstallError::PermissionDenied { path: bin_dir }.into());
        }

        for exe in retained {
            self.ui.notify(&format!("Removing {}", exe));
            let file_name = self.request.formatted_program_filename(exe);
            self.remove_if_present(&bin_dir.join(&file_name));
            self.remove_if_present(&bin_dir.join(format!("{}.bat", file_name)));
        }
        Ok(())
    }

    fn bin_dir_for(&self, spec: &PackageSpec) -> PathBuf {
        match &self.request.bin_dir {
            Some(dir) => dir.clone(),
            None => InstallLayout::new(spec.install_root()).bin_dir(),
        }
    }

    fn remove_if_present(&self, path: &Path) {
        if !self.runtime.exists(path) {
            return;
        }
        if let Err(e) = self.runtime.remove_file(path) {
            warn!("Failed to remove {:?}: {:#}", path, e);
        }
    }
}
