//! The conditional test runner: gate on credentials, install the pinned
//! suite package, run the suite, echo its output, parse the status line.
//!
//! All decisions come back as a [`RunOutcome`]; only `main` turns that into
//! an actual process exit, so the whole flow stays testable in-process.

use anyhow::Context;

use crate::config::credentials::Credentials;
use crate::config::{PASSWORD_VAR, SuiteConfig, USERNAME_VAR};
use crate::runner;
use crate::status::{self, StatusError};

/// Exit code used when the suite ran but its output carried no parseable
/// status token. Distinct from the generic tooling-failure exit (1) so the
/// two are distinguishable in CI logs.
pub const UNPARSEABLE_EXIT: i32 = 2;

/// What a gated run decided or observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Credentials absent; nothing was installed or run.
    Skipped,
    /// The suite ran and reported this status on its first output line.
    /// Zero means the integration tests passed.
    Reported(i32),
    /// The installer exited nonzero before the suite could run; carries the
    /// installer's own exit code.
    InstallFailed(i32),
    /// The suite ran but its output yielded no status token.
    Unparseable(StatusError),
}

impl RunOutcome {
    /// The process exit code this outcome maps to.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Skipped => 0,
            Self::Reported(code) | Self::InstallFailed(code) => *code,
            Self::Unparseable(_) => UNPARSEABLE_EXIT,
        }
    }
}

/// Flags from the CLI surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub verbose: bool,
    /// Skip the pinned install step (suite already present).
    pub no_install: bool,
}

/// Run the credential-gated suite.
///
/// With the gate closed this emits the skip notice on stderr and returns
/// [`RunOutcome::Skipped`]. With the gate open it installs the pinned
/// package (unless `no_install`), runs the suite command with no arguments,
/// echoes the suite's combined output verbatim to stdout, and parses the
/// first line for the reported status. The suite inherits the environment,
/// credentials included.
///
/// # Errors
///
/// Returns an error when the installer or suite cannot be launched at all;
/// a launched child that exits nonzero is reported through the outcome
/// instead.
pub fn run(
    config: &SuiteConfig,
    credentials: &Credentials,
    opts: RunOptions,
) -> anyhow::Result<RunOutcome> {
    if !credentials.configured() {
        eprintln!("[swift-smoke] {USERNAME_VAR} is not set; skipping integration tests");
        eprintln!("[swift-smoke] set {USERNAME_VAR} and {PASSWORD_VAR} to run them");
        return Ok(RunOutcome::Skipped);
    }

    if opts.no_install {
        if opts.verbose {
            eprintln!(
                "[swift-smoke] --no-install: assuming {} is present",
                config.requirement()
            );
        }
    } else if let Some(code) = install(config, opts.verbose)? {
        return Ok(RunOutcome::InstallFailed(code));
    }

    if opts.verbose {
        eprintln!("[swift-smoke] running {}", config.command);
    }
    let capture = runner::run_command(&config.command, &[])
        .with_context(|| format!("failed to run suite command `{}`", config.command))?;

    // CI logs rely on seeing the suite output verbatim, whatever the
    // status line turns out to hold.
    if !capture.combined.is_empty() {
        println!("{}", capture.combined);
    }
    if opts.verbose {
        eprintln!("[swift-smoke] suite process exited {}", capture.exit_code);
    }

    match status::parse_reported_status(&capture.combined) {
        Ok(code) => Ok(RunOutcome::Reported(code)),
        Err(err) => {
            eprintln!("[swift-smoke] {err}");
            Ok(RunOutcome::Unparseable(err))
        }
    }
}

/// Install the pinned suite package. Returns `Ok(None)` on success and
/// `Ok(Some(code))` when the installer exits nonzero. The installer's
/// captured output is replayed on stderr on failure, and under `verbose`
/// on success, so install chatter never disappears from the CI log.
fn install(config: &SuiteConfig, verbose: bool) -> anyhow::Result<Option<i32>> {
    let requirement = config.requirement();
    if verbose {
        eprintln!("[swift-smoke] installing {requirement}");
    }

    let capture = runner::run_command(&config.installer, &[requirement.clone()])
        .with_context(|| format!("failed to run installer `{}`", config.installer))?;

    if capture.exit_code != 0 {
        eprintln!(
            "[swift-smoke] install of {requirement} failed (exit {})",
            capture.exit_code
        );
        if !capture.combined.is_empty() {
            eprintln!("{}", capture.combined);
        }
        return Ok(Some(capture.exit_code));
    }

    if verbose && !capture.combined.is_empty() {
        eprintln!("{}", capture.combined);
    }
    Ok(None)
}
