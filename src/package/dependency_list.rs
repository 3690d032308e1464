//! Dependency relationships among installed packages.

use super::spec::{Dependency, PackageSpec};
use super::version::Version;

/// An installed package that depends on another one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependent {
    pub spec: PackageSpec,
    pub dependency: Dependency,
    /// Installed versions of the depended-on package that satisfy `dependency`.
    pub satisfied_by: Vec<Version>,
}

/// Dependency graph over a fixed set of installed specs.
pub struct DependencyList {
    specs: Vec<PackageSpec>,
}

impl DependencyList {
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a PackageSpec>) -> Self {
        Self {
            specs: specs.into_iter().cloned().collect(),
        }
    }

    fn find(&self, full_name: &str) -> Option<&PackageSpec> {
        self.specs.iter().find(|s| s.full_name() == full_name)
    }

    /// Whether removing `full_name` leaves every dependency it currently
    /// satisfies satisfied by some other installed version of the same package.
    ///
    /// Unknown names are always safe to remove.
    pub fn ok_to_remove(&self, full_name: &str) -> bool {
        let Some(target) = self.find(full_name) else {
            return true;
        };

        let siblings: Vec<&PackageSpec> = self
            .specs
            .iter()
            .filter(|s| s.name() == target.name() && s.full_name() != full_name)
            .collect();

        self.specs
            .iter()
            .flat_map(|s| s.dependencies())
            .filter(|dep| target.satisfies(dep))
            .all(|dep| siblings.iter().any(|s| s.satisfies(dep)))
    }

    /// Installed specs with a dependency that `spec` satisfies and no other
    /// installed version does.
    pub fn dependents_of(&self, spec: &PackageSpec) -> Vec<Dependent> {
        let mut dependents = Vec::new();
        for candidate in &self.specs {
            for dep in candidate.dependencies() {
                if !spec.satisfies(dep) {
                    continue;
                }
                let satisfied_by: Vec<Version> = self
                    .specs
                    .iter()
                    .filter(|s| s.satisfies(dep))
                    .map(|s| s.version().clone())
                    .collect();
                if satisfied_by.iter().any(|v| v != spec.version()) {
                    continue;
                }
                dependents.push(Dependent {
                    spec: candidate.clone(),
                    dependency: dep.clone(),
                    satisfied_by,
                });
            }
        }
        dependents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_spec, make_spec_with_deps, test_root};

    #[test]
    fn test_no_dependents_is_ok() {
        let root = test_root();
        let specs = [make_spec(&root, "baz", "1.0", &[]), make_spec(&root, "foo", "1.0", &[])];
        let list = DependencyList::from_specs(&specs);

        assert!(list.ok_to_remove("baz-1.0"));
        assert!(list.dependents_of(&specs[0]).is_empty());
    }

    #[test]
    fn test_dependent_blocks_removal() {
        let root = test_root();
        let specs = [
            make_spec(&root, "baz", "1.0", &[]),
            make_spec_with_deps(&root, "bar", "2.0", &[("baz", ">= 1.0")]),
        ];
        let list = DependencyList::from_specs(&specs);

        assert!(!list.ok_to_remove("baz-1.0"));
        // Nothing depends on bar
        assert!(list.ok_to_remove("bar-2.0"));

        let dependents = list.dependents_of(&specs[0]);
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].spec.full_name(), "bar-2.0");
        assert_eq!(dependents[0].dependency.to_string(), "baz (>= 1.0)");
        assert_eq!(dependents[0].satisfied_by, vec!["1.0".parse::<Version>().unwrap()]);
    }

    #[test]
    fn test_sibling_version_keeps_dependency_satisfied() {
        let root = test_root();
        let specs = [
            make_spec(&root, "baz", "1.0", &[]),
            make_spec(&root, "baz", "1.5", &[]),
            make_spec_with_deps(&root, "bar", "2.0", &[("baz", ">= 1.0")]),
        ];
        let list = DependencyList::from_specs(&specs);

        assert!(list.ok_to_remove("baz-1.0"));
        assert!(list.ok_to_remove("baz-1.5"));
    }

    #[test]
    fn test_sibling_outside_requirement_does_not_help() {
        let root = test_root();
        let specs = [
            make_spec(&root, "baz", "1.0", &[]),
            make_spec(&root, "baz", "2.0", &[]),
            make_spec_with_deps(&root, "bar", "2.0", &[("baz", "~> 1.0")]),
        ];
        let list = DependencyList::from_specs(&specs);

        assert!(!list.ok_to_remove("baz-1.0"));
        assert!(list.ok_to_remove("baz-2.0"));
    }

    #[test]
    fn test_unknown_name_is_ok() {
        let list = DependencyList::from_specs(&Vec::<PackageSpec>::new());
        assert!(list.ok_to_remove("ghost-0.1"));
    }

    #[test]
    fn test_dependents_still_covered_by_sibling_are_not_listed() {
        let root = test_root();
        let specs = [
            make_spec(&root, "baz", "1.0", &[]),
            make_spec(&root, "baz", "2.0", &[]),
            make_spec_with_deps(&root, "bar", "1.0", &[("baz", ">= 1.0")]),
            make_spec_with_deps(&root, "app", "0.3", &[("baz", "~> 2.0")]),
        ];
        let list = DependencyList::from_specs(&specs);

        assert!(!list.ok_to_remove("baz-2.0"));
        let dependents = list.dependents_of(&specs[1]);
        assert_eq!(dependents.len(), 1);
        assert_eq!(dependents[0].spec.full_name(), "app-0.3");
        assert_eq!(dependents[0].dependency.to_string(), "baz (~> 2.0)");
    }
}
