use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::runtime::{Runtime, UserInteraction, absolutize};
use crate::uninstall::{ExecutableChoice, HookRegistry, UninstallRequest, Uninstaller};

use super::config::Config;

/// Command-line options of `gemrm uninstall`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UninstallArgs {
    pub name: String,
    pub version: Option<String>,
    pub all: bool,
    pub ignore_dependencies: bool,
    pub executables: bool,
    pub no_executables: bool,
    pub bin_dir: Option<PathBuf>,
    pub format_executable: bool,
    pub user_install: bool,
}

impl UninstallArgs {
    /// Turn the options into a request against the configured roots.
    pub fn into_request<R: Runtime>(self, runtime: &R, config: &Config) -> Result<UninstallRequest> {
        let mut request = UninstallRequest::new(self.name, &config.home_root);
        if let Some(version) = &self.version {
            request.requirement = version
                .parse()
                .with_context(|| format!("Invalid version requirement: {}", version))?;
        }
        if self.user_install {
            request.user_root = Some(config.user_root.clone());
        }
        request.executables = ExecutableChoice::from_flags(self.executables, self.no_executables);
        request.all = self.all;
        request.ignore_dependencies = self.ignore_dependencies;
        request.bin_dir = match self.bin_dir {
            Some(dir) => Some(absolutize(&runtime.current_dir()?, &dir)),
            None => None,
        };
        request.format_executable = self.format_executable;
        request.exec_format = config.exec_format.clone();
        Ok(request)
    }
}

/// Uninstall a package
#[tracing::instrument(skip(runtime, ui, hooks, config))]
pub fn uninstall<R: Runtime, U: UserInteraction>(
    runtime: &R,
    ui: &U,
    hooks: &HookRegistry,
    args: UninstallArgs,
    config: &Config,
) -> Result<()> {
    let request = args.into_request(runtime, config)?;
    debug!("Uninstall request: {:?}", request);

    let uninstaller = Uninstaller::new(runtime, ui, hooks, request)?;
    uninstaller.uninstall()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UninstallError;
    use crate::runtime::{MockRuntime, RealRuntime};
    use crate::test_utils::{install_fixture, recording_ui, spec_file, test_home, test_root};
    use tempfile::tempdir;

    #[test]
    fn test_into_request_maps_every_option() {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().returning(|| Ok(test_home()));

        let mut config = Config::for_test(test_root());
        config.exec_format = "%s3.2".into();
        let args = UninstallArgs {
            name: "rake".into(),
            version: Some("~> 13.0".into()),
            all: true,
            ignore_dependencies: true,
            executables: false,
            no_executables: true,
            bin_dir: Some(PathBuf::from("bin")),
            format_executable: true,
            user_install: true,
        };

        let request = args.into_request(&runtime, &config).unwrap();

        assert_eq!(request.name, "rake");
        assert_eq!(request.requirement.to_string(), "~> 13.0");
        assert_eq!(request.install_dir, test_root());
        assert_eq!(request.user_root, Some(test_root().join("user")));
        assert_eq!(request.executables, ExecutableChoice::No);
        assert!(request.all);
        assert!(request.ignore_dependencies);
        assert_eq!(request.bin_dir, Some(test_home().join("bin")));
        assert!(request.format_executable);
        assert_eq!(request.exec_format, "%s3.2");
    }

    #[test]
    fn test_into_request_defaults() {
        let runtime = MockRuntime::new();
        let config = Config::for_test(test_root());
        let args = UninstallArgs {
            name: "rake".into(),
            ..Default::default()
        };

        let request = args.into_request(&runtime, &config).unwrap();

        assert_eq!(request.executables, ExecutableChoice::Ask);
        assert_eq!(request.user_root, None);
        assert_eq!(request.bin_dir, None);
        assert_eq!(request.requirement.to_string(), ">= 0");
    }

    #[test]
    fn test_invalid_version_requirement() {
        let runtime = MockRuntime::new();
        let config = Config::for_test(test_root());
        let args = UninstallArgs {
            name: "rake".into(),
            version: Some(">> 1".into()),
            ..Default::default()
        };

        assert!(args.into_request(&runtime, &config).is_err());
    }

    #[test]
    fn test_uninstall_command_end_to_end() {
        let dir = tempdir().unwrap();
        let mut file = spec_file("rake", "13.0.6");
        file.executables = vec!["rake".into()];
        install_fixture(dir.path(), file);

        let (ui, _log) = recording_ui(None);
        let hooks = HookRegistry::new();
        let args = UninstallArgs {
            name: "rake".into(),
            executables: true,
            ..Default::default()
        };

        uninstall(&RealRuntime, &ui, &hooks, args, &Config::for_test(dir.path())).unwrap();

        assert!(!dir.path().join("bin").join("rake").exists());
        assert!(!dir.path().join("gems").join("rake-13.0.6").exists());
    }

    #[test]
    fn test_uninstall_command_not_installed() {
        let dir = tempdir().unwrap();
        let (ui, _log) = recording_ui(None);
        let hooks = HookRegistry::new();
        let args = UninstallArgs {
            name: "rake".into(),
            ..Default::default()
        };

        let err = uninstall(&RealRuntime, &ui, &hooks, args, &Config::for_test(dir.path()))
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<UninstallError>(),
            Some(UninstallError::NotInstalled { .. })
        ));
    }
}
