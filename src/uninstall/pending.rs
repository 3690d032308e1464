//! Specs still waiting to be removed in one invocation.

use crate::package::PackageSpec;

/// Ordered set of specs awaiting removal.
///
/// Each completed per-spec removal takes exactly its own entry out, so the set
/// only ever shrinks once a cascade starts.
#[derive(Debug, Clone, Default)]
pub struct PendingSet {
    specs: Vec<PackageSpec>,
}

impl PendingSet {
    /// Build a set from `specs`, keeping the first occurrence of duplicates.
    pub fn new(specs: impl IntoIterator<Item = PackageSpec>) -> Self {
        let mut set = Self::default();
        for spec in specs {
            if !set.contains(&spec) {
                set.specs.push(spec);
            }
        }
        set
    }

    pub fn contains(&self, spec: &PackageSpec) -> bool {
        self.specs.iter().any(|s| s.same_install(spec))
    }

    /// Drop `spec` from the set. Returns whether it was present.
    pub fn remove(&mut self, spec: &PackageSpec) -> bool {
        let before = self.specs.len();
        self.specs.retain(|s| !s.same_install(spec));
        self.specs.len() != before
    }

    /// Copy of the current contents, in order.
    pub fn snapshot(&self) -> Vec<PackageSpec> {
        self.specs.clone()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
