//! Suite configuration: pinned defaults plus optional TOML overrides.
//!
//! With no config file present the runner behaves exactly like the CI
//! pipeline it serves: install `hpc-smoketest==1.0.0` with `--no-deps`,
//! then run `test-swift`. A config file swaps out the pinned pieces
//! field-by-field, which is also what makes the runner exercisable in
//! tests without the real suite.

pub mod credentials;

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Environment variable whose *presence* (any value, including empty)
/// enables the integration run.
pub const USERNAME_VAR: &str = "SWIFT_TEST_USERNAME";

/// Companion credential variable. Never validated here; the suite reads it
/// from the inherited environment itself.
pub const PASSWORD_VAR: &str = "SWIFT_TEST_PASSWORD";

const DEFAULT_PACKAGE: &str = "hpc-smoketest";
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_INSTALLER: &str = "pip install --no-deps";
const DEFAULT_COMMAND: &str = "test-swift";

/// Settings for one gated run. Every field defaults to the pinned value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Test package installed before the run.
    #[serde(default = "default_package")]
    pub package: String,
    /// Exact version pin for `package`. Installed without transitive
    /// dependency resolution to keep the CI environment reproducible.
    #[serde(default = "default_version")]
    pub version: String,
    /// Installer command; the `package==version` requirement is appended
    /// as its final argument.
    #[serde(default = "default_installer")]
    pub installer: String,
    /// Suite entry point, invoked with no arguments.
    #[serde(default = "default_command")]
    pub command: String,
}

fn default_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_installer() -> String {
    DEFAULT_INSTALLER.to_string()
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            version: default_version(),
            installer: default_installer(),
            command: default_command(),
        }
    }
}

impl SuiteConfig {
    /// The `package==version` requirement string handed to the installer.
    pub fn requirement(&self) -> String {
        format!("{}=={}", self.package, self.version)
    }
}

/// Config search paths in priority order:
/// 1. `.swift-smoke.toml` (repo-local, resolved from CWD)
/// 2. `{config_dir}/swift-smoke/config.toml` (user-level, platform-native)
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".swift-smoke.toml"));
    }
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join("swift-smoke/config.toml"));
    }

    paths
}

/// Try to load a config from `path`. Returns `Ok(Some(config))` on success
/// or `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or contains
/// invalid TOML.
pub fn try_load(path: &Path) -> anyhow::Result<Option<SuiteConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read config file: {}", path.display())));
        }
    };
    let config: SuiteConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(Some(config))
}

/// Resolve the effective config: an explicit path when given (missing file
/// is then an error), otherwise the first hit among
/// [`default_search_paths`], otherwise the pinned defaults.
///
/// # Errors
///
/// Returns an error if an explicit path does not exist, or if any
/// candidate file is unreadable or invalid.
pub fn resolve(explicit: Option<&Path>, verbose: bool) -> anyhow::Result<SuiteConfig> {
    if let Some(path) = explicit {
        return try_load(path)?
            .ok_or_else(|| anyhow::anyhow!("config file not found: {}", path.display()));
    }

    for path in default_search_paths() {
        if let Some(config) = try_load(&path)? {
            if verbose {
                eprintln!("[swift-smoke] config loaded from {}", path.display());
            }
            return Ok(config);
        }
    }

    if verbose {
        eprintln!("[swift-smoke] no config file found, using pinned defaults");
    }
    Ok(SuiteConfig::default())
}
