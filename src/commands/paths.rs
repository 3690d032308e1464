use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::runtime::Runtime;

/// Get the default home install root: `GEM_HOME`, else the system root
#[tracing::instrument(skip(runtime))]
pub fn default_install_root<R: Runtime>(runtime: &R) -> PathBuf {
    match runtime.env_var("GEM_HOME") {
        Ok(dir) if !dir.is_empty() => {
            debug!("Using GEM_HOME: {}", dir);
            PathBuf::from(dir)
        }
        _ => system_install_root(),
    }
}

/// Get the per-user install root: `GEM_USER_HOME`, else `~/.gemrm`
#[tracing::instrument(skip(runtime))]
pub fn default_user_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    if let Ok(dir) = runtime.env_var("GEM_USER_HOME") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home_dir = runtime
        .home_dir()
        .context("Could not find home directory")?;
    Ok(home_dir.join(".gemrm"))
}

#[cfg(target_os = "macos")]
fn system_install_root() -> PathBuf {
    PathBuf::from("/Library/gemrm")
}

#[cfg(target_os = "windows")]
fn system_install_root() -> PathBuf {
    PathBuf::from(r"C:\ProgramData\gemrm")
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn system_install_root() -> PathBuf {
    PathBuf::from("/usr/local/lib/gemrm")
}
