//! Process-environment boundary for the credential gate.
//!
//! The environment is read exactly once, at startup; the rest of the crate
//! works against the resulting [`Credentials`] value. A variable that is
//! set to the empty string still counts as present — being set is the
//! trigger, not the value.

use super::{PASSWORD_VAR, USERNAME_VAR};

/// Credential state lifted out of the process environment.
///
/// Values are carried for diagnostics only and are never validated: the
/// suite child process consumes both variables from its inherited
/// environment itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Capture the gate variables from the current environment.
    pub fn from_env() -> Self {
        Self {
            username: read(USERNAME_VAR),
            password: read(PASSWORD_VAR),
        }
    }

    /// Whether the gate is open: the username variable is set, value
    /// irrelevant.
    pub const fn configured(&self) -> bool {
        self.username.is_some()
    }
}

fn read(var: &str) -> Option<String> {
    std::env::var_os(var).map(|v| v.to_string_lossy().into_owned())
}
