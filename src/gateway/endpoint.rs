//! ALM REST URL construction.

use crate::config::AlmConfig;

use super::ProjectScope;

/// Sign-in resource according to the ALM REST documentation.
pub const SIGN_IN_PATH: &str = "/api/authentication/sign-in";

/// Sign-out resource according to the ALM REST documentation.
pub const SIGN_OUT_PATH: &str = "/api/authentication/sign-out";

/// Domain collection resource.
pub const DOMAINS_PATH: &str = "/api/domains";

/// Base address of one ALM instance: `protocol://server[:port]context`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    /// Builds the endpoint from its parts.
    ///
    /// A port of `0` leaves the port out so the scheme default applies. The
    /// context is normalised to start with `/` and carry no trailing `/`.
    #[must_use]
    pub fn new(protocol: &str, server: &str, port: u16, context: &str) -> Self {
        let authority = if port == 0 {
            String::from(server)
        } else {
            format!("{server}:{port}")
        };
        let trimmed = context.trim_end_matches('/');
        let separator = if trimmed.is_empty() || trimmed.starts_with('/') {
            ""
        } else {
            "/"
        };
        Self {
            base: format!("{protocol}://{authority}{separator}{trimmed}"),
        }
    }

    /// Builds the endpoint from a resolved configuration.
    #[must_use]
    pub fn from_config(config: &AlmConfig) -> Self {
        Self::new(
            &config.protocol,
            &config.server,
            config.port,
            &config.context,
        )
    }

    /// Returns the absolute URL of a resource path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Returns the base address without a resource path.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

/// Defect collection of a project.
#[must_use]
pub fn defects_path(scope: &ProjectScope) -> String {
    format!(
        "/api/domains/{}/projects/{}/defects",
        scope.domain(),
        scope.project()
    )
}

/// A single defect of a project.
#[must_use]
pub fn defect_path(scope: &ProjectScope, id: u64) -> String {
    format!("{}/{id}", defects_path(scope))
}

/// Release collection of a project.
#[must_use]
pub fn releases_path(scope: &ProjectScope) -> String {
    format!(
        "/api/domains/{}/projects/{}/releases",
        scope.domain(),
        scope.project()
    )
}
