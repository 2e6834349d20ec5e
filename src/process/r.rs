//! `Rscript` launcher.

use std::{io::Write, path::PathBuf, process::Stdio};

use tokio::process::Command;

use super::ScriptRunner;
use crate::config::Settings;
use crate::error::{GiesError, Result};
use crate::gies::ScriptArguments;

/// Launches scripts with `Rscript --vanilla`.
#[derive(Debug, Clone)]
pub struct Rscript {
    program: PathBuf,
    verbose: bool,
}

impl Rscript {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            verbose: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.rscript()).with_verbose(settings.verbose())
    }

    /// Stream the interpreter's output to the terminal instead of capturing it.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--vanilla").kill_on_drop(true).stdin(Stdio::null());
        cmd
    }

    async fn execute(&self, mut cmd: Command, verbose: bool) -> Result<()> {
        if verbose {
            let status = cmd
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .await?;
            if !status.success() {
                return Err(GiesError::ScriptFailed {
                    code: status.code(),
                    stderr: String::new(),
                });
            }
            return Ok(());
        }

        let output = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;
        if !output.status.success() {
            return Err(GiesError::ScriptFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

impl ScriptRunner for Rscript {
    async fn run(&self, template: &str, args: &ScriptArguments) -> Result<()> {
        // The rendered script lives next to, not inside, the workspace.
        let mut script = tempfile::Builder::new()
            .prefix("cdt_gies_script")
            .suffix(".R")
            .tempfile()?;
        script.write_all(args.render(template).as_bytes())?;
        script.flush()?;

        let mut cmd = self.command();
        cmd.arg(script.path());
        tracing::debug!(
            program = %self.program.display(),
            script = %script.path().display(),
            score = args.score.function_name(),
            skeleton = args.skeleton,
            verbose = args.verbose,
            "launching R script"
        );
        self.execute(cmd, self.verbose || args.verbose).await
    }

    async fn require_package(&self, package: &str) -> Result<()> {
        let probe = format!(
            "quit(status = if (requireNamespace('{}', quietly = TRUE)) 0 else 1)",
            package
        );
        let mut cmd = self.command();
        cmd.arg("-e").arg(probe);
        let unavailable = || GiesError::PackageUnavailable {
            package: package.to_string(),
        };
        let output = cmd
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "could not launch Rscript");
                unavailable()
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}
