//! Delivery manifest parsing.
//!
//! A delivery manifest is a YAML document with a single `tmt` root section:
//!
//! ```yaml
//! tmt:
//!   domain: TMT_DOMAIN
//!   project: TMT_PROJECT
//!   defects:
//!     - 4711
//!     - 4712
//! ```
//!
//! Parsing records which sections were actually present in the input rather
//! than comparing against a default value, then validates them in a fixed
//! order: root, body, domain, project. The first failing check is reported.
//! An empty or absent `defects` list is valid.

use std::io::Read;
use std::str::FromStr;

use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, ManifestError};
use crate::gateway::ProjectScope;

/// Name of the manifest's root section.
const ROOT_KEY: &str = "tmt";

/// A parsed and validated delivery manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryManifest {
    domain: String,
    project: String,
    defects: Vec<String>,
}

impl DeliveryManifest {
    /// Reads and validates a manifest from `reader`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::Read` if the input cannot be read as UTF-8,
    /// `ManifestError::Malformed` if it is not YAML of the expected shape, and
    /// the structural variants (`MissingRoot`, `EmptySection`, `MissingDomain`,
    /// `MissingProject`) for the first failed presence check.
    pub fn parse<R: Read>(mut reader: R) -> Result<Self, ManifestError> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| ManifestError::Read {
                message: e.to_string(),
            })?;
        Self::parse_str(&input)
    }

    /// Validates a manifest held in memory.
    ///
    /// # Errors
    ///
    /// As for [`DeliveryManifest::parse`], minus the read failure.
    pub fn parse_str(input: &str) -> Result<Self, ManifestError> {
        let document: Value = serde_yaml::from_str(input).map_err(|e| ManifestError::Malformed {
            message: e.to_string(),
        })?;
        let section = root_section(&document)?;

        let domain = required_text(section, "domain", ManifestError::MissingDomain)?;
        let project = required_text(section, "project", ManifestError::MissingProject)?;
        let defects = defect_ids(section)?;

        Ok(Self {
            domain,
            project,
            defects,
        })
    }

    /// Returns the ALM domain the defects live in.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the ALM project the defects live in.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the defect IDs in document order.
    #[must_use]
    pub fn defects(&self) -> &[String] {
        &self.defects
    }

    /// Returns the project scope named by the manifest.
    ///
    /// # Errors
    ///
    /// Cannot fail for a parsed manifest, since parsing already rejects an
    /// empty domain or project; the signature follows [`ProjectScope::new`].
    pub fn scope(&self) -> Result<ProjectScope, ConfigError> {
        ProjectScope::new(&self.domain, &self.project)
    }
}

impl FromStr for DeliveryManifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Locates the `tmt` mapping, distinguishing an absent root from an empty one.
fn root_section(document: &Value) -> Result<&Mapping, ManifestError> {
    let Value::Mapping(root) = document else {
        return Err(ManifestError::MissingRoot);
    };
    match root.get(ROOT_KEY) {
        None => Err(ManifestError::MissingRoot),
        Some(Value::Null) => Err(ManifestError::EmptySection),
        Some(Value::Mapping(section)) if section.is_empty() => Err(ManifestError::EmptySection),
        Some(Value::Mapping(section)) => Ok(section),
        Some(_) => Err(ManifestError::Malformed {
            message: String::from("/tmt must be a mapping"),
        }),
    }
}

/// Reads a scalar field, reporting `missing` when it is absent or empty.
fn required_text(
    section: &Mapping,
    key: &str,
    missing: ManifestError,
) -> Result<String, ManifestError> {
    let Some(value) = section.get(key) else {
        return Err(missing);
    };
    match scalar_text(value) {
        Some(text) if text.is_empty() => Err(missing),
        Some(text) => Ok(text),
        None if value.is_null() => Err(missing),
        None => Err(ManifestError::Malformed {
            message: format!("/tmt/{key} must be a scalar"),
        }),
    }
}

fn defect_ids(section: &Mapping) -> Result<Vec<String>, ManifestError> {
    match section.get("defects") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| {
                scalar_text(item).ok_or_else(|| ManifestError::Malformed {
                    message: String::from("/tmt/defects entries must be scalars"),
                })
            })
            .collect(),
        Some(_) => Err(ManifestError::Malformed {
            message: String::from("/tmt/defects must be a sequence"),
        }),
    }
}

/// Renders a YAML scalar as text. Defect IDs are usually written unquoted and
/// therefore arrive as numbers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
