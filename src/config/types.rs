//! Configuration data types for the ALM defect client.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::gateway::Credentials;

/// Protocol used when no layer sets one.
pub const DEFAULT_PROTOCOL: &str = "https";

/// ALM web root used when no layer sets one.
pub const DEFAULT_CONTEXT: &str = "/qcbin";

/// Effective configuration for one ALM instance.
///
/// The same type doubles as a partial configuration layer: a field counts as
/// set when it is non-empty (strings) or non-zero (`port`). Layers are
/// combined by [`resolve`](super::resolve), where the first set value wins.
///
/// Configuration file keys are the lower-cased field names used by
/// `~/.alm.yaml`, so `from_status` is spelt `fromstatus` on disk.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AlmConfig {
    /// URL scheme, usually `https`.
    pub protocol: String,

    /// Host name or IP address of the ALM server.
    pub server: String,

    /// TCP port of the ALM server; `0` means the scheme default.
    pub port: u16,

    /// Web root of the ALM application, e.g. `/qcbin`.
    pub context: String,

    /// ALM user name.
    pub username: String,

    /// ALM password.
    pub password: String,

    /// ALM domain holding the project.
    pub domain: String,

    /// ALM project holding the defects.
    pub project: String,

    /// Only defects whose status starts with this prefix are changed.
    #[serde(rename = "fromstatus", alias = "from_status")]
    pub from_status: String,

    /// Status defects are changed into.
    #[serde(rename = "intostatus", alias = "into_status")]
    pub into_status: String,
}

impl AlmConfig {
    /// Returns the built-in defaults layer.
    ///
    /// This layer is always resolved last, so it only fills fields that no
    /// flag, environment variable, or configuration file set.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            protocol: String::from(DEFAULT_PROTOCOL),
            context: String::from(DEFAULT_CONTEXT),
            ..Self::default()
        }
    }

    /// Combines two layers field by field, keeping values already set in
    /// `self` and taking the rest from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self {
            protocol: first_set(self.protocol, fallback.protocol),
            server: first_set(self.server, fallback.server),
            port: if self.port == 0 {
                fallback.port
            } else {
                self.port
            },
            context: first_set(self.context, fallback.context),
            username: first_set(self.username, fallback.username),
            password: first_set(self.password, fallback.password),
            domain: first_set(self.domain, fallback.domain),
            project: first_set(self.project, fallback.project),
            from_status: first_set(self.from_status, fallback.from_status),
            into_status: first_set(self.into_status, fallback.into_status),
        }
    }

    /// Validates the fields needed to reach and sign in to the server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` listing every empty field among
    /// `server` and `username`.
    pub fn validate_endpoint(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.server.is_empty() {
            missing.push("server");
        }
        if self.username.is_empty() {
            missing.push("username");
        }
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: missing.join(", "),
            }
            .into());
        }
        Ok(())
    }

    /// Returns the sign-in credentials held by this configuration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }
}

fn first_set(preferred: String, fallback: String) -> String {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

impl fmt::Debug for AlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() {
            ""
        } else {
            "<redacted>"
        };
        f.debug_struct("AlmConfig")
            .field("protocol", &self.protocol)
            .field("server", &self.server)
            .field("port", &self.port)
            .field("context", &self.context)
            .field("username", &self.username)
            .field("password", &password)
            .field("domain", &self.domain)
            .field("project", &self.project)
            .field("from_status", &self.from_status)
            .field("into_status", &self.into_status)
            .finish()
    }
}
