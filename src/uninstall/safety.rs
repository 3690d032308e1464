use anyhow::Result;
use log::debug;

use crate::package::{DependencyList, PackageSpec};
use crate::runtime::{Runtime, UserInteraction};

use super::Uninstaller;

impl<R: Runtime, U: UserInteraction> Uninstaller<'_, R, U> {
    /// Whether removing `spec` may proceed as far as dependents are concerned.
    ///
    /// Checked against the indexes loaded at construction, not the current
    /// disk state. When a dependent would be left unsatisfied the user is asked,
    /// defaulting to yes.
    pub fn dependencies_ok(&self, spec: &PackageSpec) -> Result<bool> {
        if self.request.ignore_dependencies {
            return Ok(true);
        }

        let deplist = DependencyList::from_specs(self.active_specs());
        if deplist.ok_to_remove(&spec.full_name()) {
            return Ok(true);
        }

        debug!("{} has unsatisfied dependents", spec);
        self.ask_if_ok(&deplist, spec)
    }

    fn ask_if_ok(&self, deplist: &DependencyList, spec: &PackageSpec) -> Result<bool> {
        let mut msg = vec![
            String::new(),
            "You have requested to uninstall the package:".to_string(),
            format!("\t{}", spec.full_name()),
            String::new(),
        ];
        for dependent in deplist.dependents_of(spec) {
            msg.push(format!(
                "{}-{} depends on [{}]",
                dependent.spec.name(),
                dependent.spec.version(),
                dependent.dependency
            ));
        }
        msg.push("If you remove this package, one or more dependencies will not be met.".into());
        msg.push("Continue with Uninstall?".into());

        self.ui.confirm(&msg.join("\n"), true)
    }
}
