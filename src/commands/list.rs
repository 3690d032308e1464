use anyhow::Result;
use log::debug;
use std::collections::BTreeMap;
use std::io::Write;

use crate::package::{PackageIndex, Version};
use crate::runtime::Runtime;

use super::config::Config;

/// List installed packages, optionally only those named `name`
#[tracing::instrument(skip(runtime, config, out))]
pub fn list<R: Runtime, W: Write>(
    runtime: &R,
    name: Option<&str>,
    user_install: bool,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let mut roots = vec![config.home_root.clone()];
    if user_install {
        roots.push(config.user_root.clone());
    }

    let mut versions: BTreeMap<String, Vec<Version>> = BTreeMap::new();
    for root in &roots {
        let index = PackageIndex::load(runtime, root)?;
        debug!("Listing {} package(s) from {:?}", index.len(), index.root());
        for (pkg, specs) in index.groups() {
            if name.is_some_and(|n| n != pkg) {
                continue;
            }
            versions
                .entry(pkg.to_string())
                .or_default()
                .extend(specs.iter().map(|s| s.version().clone()));
        }
    }

    if versions.is_empty() {
        writeln!(out, "No packages installed.")?;
        return Ok(());
    }

    for (pkg, mut list) in versions {
        list.sort_by(|a, b| b.cmp(a));
        list.dedup();
        let list: Vec<String> = list.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{} ({})", pkg, list.join(", "))?;
    }
    Ok(())
}
