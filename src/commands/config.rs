use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::runtime::{Runtime, absolutize};

use super::paths::{default_install_root, default_user_root};

/// Resolved install locations and naming settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Home install root, always searched.
    pub home_root: PathBuf,
    /// Per-user root, searched when the user install is enabled.
    pub user_root: PathBuf,
    /// Executable name template; `%s` stands for the plain name.
    pub exec_format: String,
}

impl Config {
    /// Load configuration from environment and defaults.
    ///
    /// `install_root` overrides the home root. Relative roots are resolved
    /// against the current directory.
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, install_root: Option<PathBuf>) -> Result<Self> {
        let cwd = runtime.current_dir()?;

        let home_root = match install_root {
            Some(path) => path,
            None => default_install_root(runtime),
        };
        let user_root = default_user_root(runtime)?;
        let exec_format = runtime
            .env_var("GEMRM_EXEC_FORMAT")
            .ok()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| "%s".to_string());

        let config = Self {
            home_root: absolutize(&cwd, &home_root),
            user_root: absolutize(&cwd, &user_root),
            exec_format,
        };
        debug!("Using install root: {:?}", config.home_root);
        Ok(config)
    }

    #[cfg(test)]
    pub fn for_test(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            home_root: root.to_path_buf(),
            user_root: root.join("user"),
            exec_format: "%s".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use crate::test_utils::test_home;
    use mockall::predicate::eq;
    use std::env::VarError;

    fn runtime_with_env(vars: &'static [(&'static str, &'static str)]) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_home_dir().returning(|| Some(test_home()));
        runtime.expect_env_var().returning(move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
                .ok_or(VarError::NotPresent)
        });
        runtime
    }

    #[test]
    #[cfg(not(windows))]
    fn test_load_with_explicit_root() {
        let runtime = runtime_with_env(&[]);

        let config = Config::load(&runtime, Some(PathBuf::from("/opt/gems"))).unwrap();

        assert_eq!(config.home_root, PathBuf::from("/opt/gems"));
        assert_eq!(config.user_root, test_home().join(".gemrm"));
        assert_eq!(config.exec_format, "%s");
    }

    #[test]
    fn test_load_relative_root_is_absolutized() {
        let runtime = runtime_with_env(&[]);

        let config = Config::load(&runtime, Some(PathBuf::from("./vendor/../gems"))).unwrap();

        assert_eq!(config.home_root, test_home().join("gems"));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_load_from_environment() {
        let runtime = runtime_with_env(&[
            ("GEM_HOME", "/srv/gems"),
            ("GEM_USER_HOME", "/srv/user-gems"),
            ("GEMRM_EXEC_FORMAT", "%s3.2"),
        ]);

        let config = Config::load(&runtime, None).unwrap();

        assert_eq!(config.home_root, PathBuf::from("/srv/gems"));
        assert_eq!(config.user_root, PathBuf::from("/srv/user-gems"));
        assert_eq!(config.exec_format, "%s3.2");
    }

    #[test]
    #[cfg(not(windows))]
    fn test_flag_beats_environment() {
        let mut runtime = MockRuntime::new();
        runtime.expect_current_dir().returning(|| Ok(test_home()));
        runtime.expect_home_dir().returning(|| Some(test_home()));
        runtime
            .expect_env_var()
            .with(eq("GEM_HOME"))
            .never();
        runtime
            .expect_env_var()
            .returning(|_| Err(VarError::NotPresent));

        let config = Config::load(&runtime, Some(PathBuf::from("/flag/root"))).unwrap();
        assert_eq!(config.home_root, PathBuf::from("/flag/root"));
    }
}
