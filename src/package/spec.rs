//! Installed package descriptors.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

use super::layout::InstallLayout;
use super::version::{Requirement, Version};

/// Platform tag of packages that carry no native code.
pub const GENERIC_PLATFORM: &str = "ruby";

fn default_platform() -> String {
    GENERIC_PLATFORM.to_string()
}

/// Metadata file stored under `<root>/specifications` for each installed version.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpecFile {
    pub name: String,
    pub version: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Platform string as originally written, used by legacy file names.
    /// Defaults to `platform`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub executables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DependencyEntry {
    pub name: String,
    #[serde(default)]
    pub requirement: String,
}

impl SpecFile {
    #[tracing::instrument(skip(runtime, path))]
    pub fn load<R: Runtime>(runtime: &R, path: &Path) -> Result<Self> {
        let content = runtime.read_to_string(path)?;
        let spec: SpecFile = serde_json::from_str(&content)
            .with_context(|| format!("Invalid package metadata in {:?}", path))?;
        Ok(spec)
    }
}

/// A declared runtime dependency of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub requirement: Requirement,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.requirement)
    }
}

/// One installed version of a package, loaded from an install root.
///
/// Specs are snapshots: nothing in this crate mutates one after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    name: String,
    version: Version,
    platform: String,
    original_platform: String,
    install_root: PathBuf,
    gem_dir: PathBuf,
    executables: Vec<String>,
    dependencies: Vec<Dependency>,
}

impl PackageSpec {
    /// Build a spec from its metadata file. The gem directory defaults to
    /// `<install_root>/gems/<full_name>`.
    pub fn from_spec_file(file: SpecFile, install_root: &Path) -> Result<Self> {
        let version: Version = file
            .version
            .parse()
            .with_context(|| format!("Invalid version for package {}", file.name))?;

        let dependencies = file
            .dependencies
            .into_iter()
            .map(|d| {
                let requirement = d.requirement.parse().with_context(|| {
                    format!("Invalid requirement for dependency {} of {}", d.name, file.name)
                })?;
                Ok(Dependency {
                    name: d.name,
                    requirement,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let original_platform = file
            .original_platform
            .unwrap_or_else(|| file.platform.clone());

        let mut spec = Self {
            name: file.name,
            version,
            platform: file.platform,
            original_platform,
            install_root: install_root.to_path_buf(),
            gem_dir: PathBuf::new(),
            executables: file.executables,
            dependencies,
        };
        spec.gem_dir = InstallLayout::new(install_root).gem_dir(&spec.full_name());
        Ok(spec)
    }

    /// Replace the directory the package's files live in.
    pub fn with_gem_dir(mut self, gem_dir: impl Into<PathBuf>) -> Self {
        self.gem_dir = gem_dir.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The root this spec was loaded from.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// The directory holding the package's files.
    pub fn gem_dir(&self) -> &Path {
        &self.gem_dir
    }

    pub fn executables(&self) -> &[String] {
        &self.executables
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// `name-version`, with `-platform` appended for non-generic platforms.
    pub fn full_name(&self) -> String {
        if self.platform == GENERIC_PLATFORM || self.platform.is_empty() {
            format!("{}-{}", self.name, self.version)
        } else {
            format!("{}-{}-{}", self.name, self.version, self.platform)
        }
    }

    /// `name-version-original_platform`, always platform-qualified.
    pub fn legacy_name(&self) -> String {
        format!("{}-{}-{}", self.name, self.version, self.original_platform)
    }

    /// Metadata file name: `<full_name>.gemspec`.
    pub fn spec_file_name(&self) -> String {
        format!("{}.{}", self.full_name(), super::layout::SPEC_EXTENSION)
    }

    /// Cached package file name: `<full_name>.gem`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.full_name(), super::layout::PACKAGE_EXTENSION)
    }

    /// Whether `dependency` names this package and accepts its version.
    pub fn satisfies(&self, dependency: &Dependency) -> bool {
        self.name == dependency.name && dependency.requirement.is_satisfied_by(&self.version)
    }

    /// Identity used to tell two loaded specs apart: root plus full name.
    pub fn same_install(&self, other: &PackageSpec) -> bool {
        self.full_name() == other.full_name() && self.install_root == other.install_root
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{spec_file, test_root};
    use mockall::predicate::eq;

    #[test]
    fn test_full_name_generic_platform() {
        let spec = PackageSpec::from_spec_file(spec_file("foo", "1.0"), &test_root()).unwrap();

        assert_eq!(spec.full_name(), "foo-1.0");
        assert_eq!(spec.legacy_name(), "foo-1.0-ruby");
        assert_eq!(spec.spec_file_name(), "foo-1.0.gemspec");
        assert_eq!(spec.file_name(), "foo-1.0.gem");
        assert_eq!(spec.gem_dir(), test_root().join("gems").join("foo-1.0"));
    }

    #[test]
    fn test_full_name_native_platform() {
        let mut file = spec_file("nokogiri", "1.16.0");
        file.platform = "x86_64-linux".into();
        file.original_platform = Some("x86_64-linux-gnu".into());
        let spec = PackageSpec::from_spec_file(file, &test_root()).unwrap();

        assert_eq!(spec.full_name(), "nokogiri-1.16.0-x86_64-linux");
        assert_eq!(spec.legacy_name(), "nokogiri-1.16.0-x86_64-linux-gnu");
    }

    #[test]
    fn test_spec_file_defaults() {
        let json = r#"{"name": "rake", "version": "13.0.6"}"#;
        let file: SpecFile = serde_json::from_str(json).unwrap();

        assert_eq!(file.platform, "ruby");
        assert_eq!(file.original_platform, None);
        assert!(file.executables.is_empty());
        assert!(file.dependencies.is_empty());
    }

    #[test]
    fn test_spec_dependencies_parsed() {
        let json = r#"{
            "name": "bar",
            "version": "1.0",
            "dependencies": [{"name": "baz", "requirement": "~> 2.1"}, {"name": "qux"}]
        }"#;
        let file: SpecFile = serde_json::from_str(json).unwrap();
        let spec = PackageSpec::from_spec_file(file, &test_root()).unwrap();

        assert_eq!(spec.dependencies().len(), 2);
        assert_eq!(spec.dependencies()[0].to_string(), "baz (~> 2.1)");
        assert_eq!(spec.dependencies()[1].to_string(), "qux (>= 0)");
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let result = PackageSpec::from_spec_file(spec_file("foo", "not-a-version"), &test_root());
        assert!(result.is_err());
    }

    #[test]
    fn test_satisfies() {
        let spec = PackageSpec::from_spec_file(spec_file("baz", "2.3"), &test_root()).unwrap();
        let dep = |name: &str, req: &str| Dependency {
            name: name.into(),
            requirement: req.parse().unwrap(),
        };

        assert!(spec.satisfies(&dep("baz", "~> 2.1")));
        assert!(!spec.satisfies(&dep("baz", ">= 3")));
        assert!(!spec.satisfies(&dep("other", ">= 0")));
    }

    #[test]
    fn test_spec_file_load() {
        let mut runtime = MockRuntime::new();
        let path = test_root().join("specifications").join("foo-1.0.gemspec");

        runtime
            .expect_read_to_string()
            .with(eq(path.clone()))
            .returning(|_| Ok(r#"{"name": "foo", "version": "1.0", "executables": ["foo"]}"#.into()));

        let file = SpecFile::load(&runtime, &path).unwrap();
        assert_eq!(file.name, "foo");
        assert_eq!(file.executables, vec!["foo".to_string()]);
    }

    #[test]
    fn test_spec_file_load_invalid_json() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_to_string()
            .returning(|_| Ok("not json".into()));

        let err = SpecFile::load(&runtime, Path::new("/x/specifications/bad.gemspec")).unwrap_err();
        assert!(err.to_string().contains("Invalid package metadata"));
    }
}
