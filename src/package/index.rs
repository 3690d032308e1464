//! Index of the packages installed under one root.

use anyhow::Result;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::layout::{InstallLayout, SPEC_EXTENSION};
use super::spec::{PackageSpec, SpecFile};
use super::version::Requirement;

/// Installed specs under one root, grouped by package name.
///
/// Each group is kept in ascending version order.
#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    root: PathBuf,
    by_name: BTreeMap<String, Vec<PackageSpec>>,
}

impl PackageIndex {
    pub fn from_specs(root: impl Into<PathBuf>, specs: impl IntoIterator<Item = PackageSpec>) -> Self {
        let mut index = Self {
            root: root.into(),
            by_name: BTreeMap::new(),
        };
        for spec in specs {
            index.insert(spec);
        }
        index
    }

    /// Load every metadata file in `<root>/specifications`.
    ///
    /// A missing root yields an empty index. Files that cannot be parsed are
    /// skipped with a warning.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, root: &Path) -> Result<Self> {
        let layout = InstallLayout::new(root);
        let spec_dir = layout.spec_dir();
        let mut index = Self::from_specs(root, []);

        if !runtime.exists(&spec_dir) {
            debug!("No specifications directory at {:?}", spec_dir);
            return Ok(index);
        }

        let pattern = glob::Pattern::new(&format!("*.{}", SPEC_EXTENSION))?;
        for path in runtime.read_dir(&spec_dir)? {
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| pattern.matches(n));
            if !matches || runtime.is_dir(&path) {
                continue;
            }

            match SpecFile::load(runtime, &path)
                .and_then(|file| PackageSpec::from_spec_file(file, root))
            {
                Ok(spec) => {
                    // Older installs named the gem directory after the legacy name
                    let legacy_dir = layout.gem_dir(&spec.legacy_name());
                    let spec = if !runtime.exists(spec.gem_dir()) && runtime.exists(&legacy_dir) {
                        spec.with_gem_dir(legacy_dir)
                    } else {
                        spec
                    };
                    index.insert(spec);
                }
                Err(e) => {
                    warn!("Failed to load package metadata from {:?}: {:#}", path, e);
                }
            }
        }

        debug!("Loaded {} package(s) from {:?}", index.len(), root);
        Ok(index)
    }

    fn insert(&mut self, spec: PackageSpec) {
        let group = self.by_name.entry(spec.name().to_string()).or_default();
        let pos = group.partition_point(|s| s.version() <= spec.version());
        group.insert(pos, spec);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Specs named `name` whose version satisfies `requirement`.
    pub fn find_name(&self, name: &str, requirement: &Requirement) -> Vec<PackageSpec> {
        self.by_name
            .get(name)
            .map(|group| {
                group
                    .iter()
                    .filter(|s| requirement.is_satisfied_by(s.version()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn specs(&self) -> impl Iterator<Item = &PackageSpec> {
        self.by_name.values().flatten()
    }

    /// Package names with their installed versions, in name order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[PackageSpec])> {
        self.by_name.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
