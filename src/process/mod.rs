//! External interpreter invocation.

use std::future::Future;

use crate::error::Result;
use crate::gies::ScriptArguments;

pub mod r;

pub use r::Rscript;

/// Runs a script template to completion.
///
/// The runner must return only after the script has produced every output file
/// named in `args`. A non-zero exit is an error.
pub trait ScriptRunner {
    fn run(
        &self,
        template: &str,
        args: &ScriptArguments,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fails with `PackageUnavailable` if `package` cannot be loaded.
    fn require_package(&self, package: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Run `template` and, once it has finished, collect its output with `retrieve`.
pub async fn launch_r_script<R, T, F>(
    runner: &R,
    template: &str,
    args: &ScriptArguments,
    retrieve: F,
) -> Result<T>
where
    R: ScriptRunner,
    F: FnOnce() -> Result<T>,
{
    runner.run(template, args).await?;
    retrieve()
}
