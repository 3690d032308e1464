//! Pre- and post-removal hooks.

use anyhow::Result;
use log::debug;

use crate::error::UninstallError;
use crate::package::PackageSpec;

use super::request::UninstallRequest;

/// What a hook sees while a spec is being removed.
pub struct RemovalContext<'a> {
    pub spec: &'a PackageSpec,
    pub request: &'a UninstallRequest,
}

pub type Hook = Box<dyn Fn(&RemovalContext<'_>) -> Result<()>>;

/// Ordered, append-only lists of removal callbacks.
///
/// Populated once at startup and shared by reference with the uninstaller.
#[derive(Default)]
pub struct HookRegistry {
    pre: Vec<Hook>,
    post: Vec<Hook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` before a spec's executables and files are removed.
    pub fn register_pre<F>(&mut self, hook: F)
    where
        F: Fn(&RemovalContext<'_>) -> Result<()> + 'static,
    {
        self.pre.push(Box::new(hook));
    }

    /// Run `hook` after a spec's executables and files are removed.
    pub fn register_post<F>(&mut self, hook: F)
    where
        F: Fn(&RemovalContext<'_>) -> Result<()> + 'static,
    {
        self.post.push(Box::new(hook));
    }

    pub fn run_pre(&self, ctx: &RemovalContext<'_>) -> Result<()> {
        debug!("Running {} pre-removal hook(s) for {}", self.pre.len(), ctx.spec);
        Self::run(&self.pre, ctx)
    }

    pub fn run_post(&self, ctx: &RemovalContext<'_>) -> Result<()> {
        debug!("Running {} post-removal hook(s) for {}", self.post.len(), ctx.spec);
        Self::run(&self.post, ctx)
    }

    // Stops at the first failing hook
    fn run(hooks: &[Hook], ctx: &RemovalContext<'_>) -> Result<()> {
        for hook in hooks {
            hook(ctx).map_err(|source| UninstallError::HookFailure {
                full_name: ctx.spec.full_name(),
                source,
            })?;
        }
        Ok(())
    }
}
