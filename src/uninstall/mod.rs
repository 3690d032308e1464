//! Uninstall use case - decides what to remove and drives each removal.
//!
//! Each package version goes through:
//! dependency check -> pre hooks -> executables -> files -> post hooks.
//! A failure at any step stops that spec and any cascade it belongs to.
//! Nothing already deleted is restored.

mod artifacts;
mod executables;
mod hooks;
mod pending;
mod request;
mod safety;

use anyhow::Result;
use log::{debug, info};

use crate::error::UninstallError;
use crate::package::{PackageIndex, PackageSpec};
use crate::runtime::{Runtime, UserInteraction};

pub use artifacts::{DocDirRemover, DocRemover};
pub use hooks::{Hook, HookRegistry, RemovalContext};
pub use pending::PendingSet;
pub use request::{ExecutableChoice, UninstallRequest};

#[cfg(test)]
pub use artifacts::MockDocRemover;

const ALL_VERSIONS: &str = "All versions";

/// Uninstaller for one request.
///
/// Indexes are loaded once when the uninstaller is built and never refreshed.
pub struct Uninstaller<'a, R: Runtime, U: UserInteraction> {
    runtime: &'a R,
    ui: &'a U,
    hooks: &'a HookRegistry,
    docs: Box<dyn DocRemover + 'a>,
    request: UninstallRequest,
    home_index: PackageIndex,
    user_index: Option<PackageIndex>,
}

impl<'a, R: Runtime, U: UserInteraction> Uninstaller<'a, R, U> {
    /// Load the home index, and the user index if the request enables it.
    pub fn new(
        runtime: &'a R,
        ui: &'a U,
        hooks: &'a HookRegistry,
        request: UninstallRequest,
    ) -> Result<Self> {
        let home_index = PackageIndex::load(runtime, &request.install_dir)?;
        let user_index = match &request.user_root {
            Some(root) => Some(PackageIndex::load(runtime, root)?),
            None => None,
        };
        Ok(Self::with_indexes(
            runtime, ui, hooks, request, home_index, user_index,
        ))
    }

    /// Use already loaded indexes.
    pub fn with_indexes(
        runtime: &'a R,
        ui: &'a U,
        hooks: &'a HookRegistry,
        request: UninstallRequest,
        home_index: PackageIndex,
        user_index: Option<PackageIndex>,
    ) -> Self {
        Self {
            runtime,
            ui,
            hooks,
            docs: Box::new(DocDirRemover::new(runtime)),
            request,
            home_index,
            user_index,
        }
    }

    /// Replace the documentation remover.
    pub fn with_doc_remover(mut self, docs: Box<dyn DocRemover + 'a>) -> Self {
        self.docs = docs;
        self
    }

    /// Every spec visible through the active indexes.
    fn active_specs(&self) -> impl Iterator<Item = &PackageSpec> {
        self.home_index
            .specs()
            .chain(self.user_index.iter().flat_map(|index| index.specs()))
    }

    /// Installed specs matching the request, home root first.
    pub fn resolve(&self) -> Result<Vec<PackageSpec>> {
        let name = &self.request.name;
        let mut list = self.home_index.find_name(name, &self.request.requirement);
        if let Some(user_index) = &self.user_index {
            list.extend(user_index.find_name(name, &self.request.requirement));
        }
        debug!("Resolved {} candidate(s) for {}", list.len(), name);

        if list.is_empty() {
            return Err(UninstallError::NotInstalled { name: name.clone() }.into());
        }
        Ok(list)
    }

    /// Uninstall whatever the request names.
    ///
    /// When several versions match and `all` is not set, the user picks one of
    /// them or "All versions". Any other answer removes nothing and still
    /// returns `Ok`.
    #[tracing::instrument(skip(self), fields(name = %self.request.name))]
    pub fn uninstall(&self) -> Result<()> {
        let list = self.resolve()?;
        let mut pending = PendingSet::new(list.clone());

        if list.len() == 1 {
            return self.uninstall_spec(&list[0], &mut pending);
        }

        if self.request.all {
            return self.remove_all(&mut pending);
        }

        let mut labels: Vec<String> = list.iter().map(|s| s.full_name()).collect();
        labels.push(ALL_VERSIONS.to_string());
        let (_, index) = self
            .ui
            .choose_one("Select package to uninstall:", &labels)?;

        match index {
            Some(i) if i == list.len() => self.remove_all(&mut pending),
            Some(i) if i < list.len() => self.uninstall_spec(&list[i], &mut pending),
            _ => {
                let err = UninstallError::InvalidSelection {
                    max: list.len() + 1,
                };
                self.ui.notify(&err.to_string());
                Ok(())
            }
        }
    }

    /// Remove every spec in `pending`, in order.
    ///
    /// Iterates over a copy; a spec no longer in the live set is skipped.
    pub fn remove_all(&self, pending: &mut PendingSet) -> Result<()> {
        for spec in pending.snapshot() {
            if pending.contains(&spec) {
                self.uninstall_spec(&spec, pending)?;
            }
        }
        Ok(())
    }

    /// Run the full removal pipeline for one spec.
    ///
    /// On success `spec` has been taken out of `pending`.
    pub fn uninstall_spec(&self, spec: &PackageSpec, pending: &mut PendingSet) -> Result<()> {
        info!("Uninstalling {}", spec);

        if !self.dependencies_ok(spec)? {
            return Err(UninstallError::DependencyConflict {
                full_name: spec.full_name(),
            }
            .into());
        }

        let ctx = RemovalContext {
            spec,
            request: &self.request,
        };
        self.hooks.run_pre(&ctx)?;
        self.remove_executables(spec)?;
        self.remove(spec, pending)?;
        self.hooks.run_post(&ctx)?;
        Ok(())
    }
}
