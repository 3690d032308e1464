//! Package management module
//!
//! This module provides the read-only view of installed packages: metadata
//! files, the per-root index, version requirements, and the dependency graph
//! consulted before removal.

mod dependency_list;
mod index;
pub mod layout;
mod spec;
mod version;

pub use dependency_list::{Dependent, DependencyList};
pub use index::PackageIndex;
pub use layout::InstallLayout;
pub use spec::{Dependency, DependencyEntry, GENERIC_PLATFORM, PackageSpec, SpecFile};
pub use version::{Requirement, Version};
