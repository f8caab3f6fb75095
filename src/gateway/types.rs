//! Wire types exchanged with the ALM REST API.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GatewayError};

/// A subset of an ALM defect record.
///
/// Every field defaults when absent so that degraded responses still decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Defect {
    /// Numeric defect identifier.
    pub id: u64,

    /// Subject (folder) reference; its shape varies between ALM versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<serde_json::Value>,

    /// Current status, e.g. `Open` or `Closed/Verified`.
    pub status: String,

    /// Defect type.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl Defect {
    /// Returns the minimal update record carrying only `id` and `status`.
    ///
    /// Unset fields are left out of the serialised body. ALM replaces the
    /// whole record on `PUT`, so they are cleared server-side.
    #[must_use]
    pub fn status_update(id: u64, status: &str) -> Self {
        Self {
            id,
            status: String::from(status),
            ..Self::default()
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.status)?;
        if !self.kind.is_empty() {
            write!(f, "\t{}", self.kind)?;
        }
        Ok(())
    }
}

/// An ALM domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Domain {
    /// Domain name.
    pub name: String,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An ALM release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Release {
    /// Numeric release identifier.
    pub id: u32,

    /// Release name.
    pub name: String,

    /// Planned start date as reported by ALM.
    #[serde(rename = "start-date")]
    pub start_date: String,

    /// Planned end date as reported by ALM.
    #[serde(rename = "end-date")]
    pub end_date: String,
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.name)?;
        if !self.start_date.is_empty() || !self.end_date.is_empty() {
            write!(f, "\t{}..{}", self.start_date, self.end_date)?;
        }
        Ok(())
    }
}

/// The domain and project that scope every defect and release request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    domain: String,
    project: String,
}

impl ProjectScope {
    /// Creates a scope after checking both identifiers are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRequired` naming `domain` or `project`
    /// when either is empty.
    pub fn new(domain: &str, project: &str) -> Result<Self, ConfigError> {
        if domain.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: String::from("domain"),
            });
        }
        if project.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: String::from("project"),
            });
        }
        Ok(Self {
            domain: String::from(domain),
            project: String::from(project),
        })
    }

    /// Returns the ALM domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the ALM project.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }
}

/// HTTP Basic credentials exchanged once at sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials from a user name and password.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: String::from(username),
            password: String::from(password),
        }
    }

    /// Returns the user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Collection responses wrap their items in a `results` array.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct ResultsEnvelope<T> {
    #[serde(default)]
    results: Vec<T>,
}

/// Decode a single defect from a response body.
///
/// # Errors
///
/// Returns `GatewayError::Decode` if the body is not a JSON defect object.
pub fn decode_defect(body: &[u8]) -> Result<Defect, GatewayError> {
    decode(body)
}

/// Decode the items of a `results` wrapper from a response body.
///
/// # Errors
///
/// Returns `GatewayError::Decode` if the body is not a JSON object whose
/// `results` entries match `T`.
pub fn decode_results<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, GatewayError> {
    decode::<ResultsEnvelope<T>>(body).map(|envelope| envelope.results)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::Decode {
        message: e.to_string(),
    })
}
