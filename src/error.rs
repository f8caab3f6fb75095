//! Semantic error types for the ALM defect client.
//!
//! This module defines the error hierarchy for `alm-defect`, following the
//! principle of using semantic error enums (via `thiserror`) for conditions the
//! caller might inspect or map to an exit code, while reserving opaque errors
//! (`eyre::Report`) for the application boundary.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// The path where the configuration file was expected.
        path: PathBuf,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to parse configuration file: {message}")]
    ParseError {
        /// A description of the parse error.
        message: String,
    },

    /// A required configuration value is missing.
    #[error("missing required configuration: {field}")]
    MissingRequired {
        /// The name of the missing field.
        field: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The name of the invalid field.
        field: String,
        /// The reason the value is invalid.
        reason: String,
    },
}

/// Errors that can occur while parsing a delivery manifest.
///
/// The structural variants are checked in a fixed order (root, body,
/// domain, project) and the first failing check is reported.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest input could not be read.
    #[error("failed to read delivery manifest: {message}")]
    Read {
        /// A description of the read failure.
        message: String,
    },

    /// The manifest input is not a structured document.
    #[error("malformed delivery manifest: {message}")]
    Malformed {
        /// A description of the syntax error.
        message: String,
    },

    /// The `tmt` root section is absent.
    #[error("missing required element tmt")]
    MissingRoot,

    /// The `tmt` root section is present but has no content.
    #[error("empty tmt:, missing required elements")]
    EmptySection,

    /// The `tmt/domain` element is absent or empty.
    #[error("missing required element /tmt/domain")]
    MissingDomain,

    /// The `tmt/project` element is absent or empty.
    #[error("missing required element /tmt/project")]
    MissingProject,
}

/// Errors reported by the remote defect gateway.
///
/// A non-2xx HTTP status on its own is not an error: it is logged and the
/// body is still decoded.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP client could not be constructed.
    #[error("failed to set up ALM client: {message}")]
    ClientSetup {
        /// A description of the setup failure.
        message: String,
    },

    /// The server rejected the sign-in request.
    #[error("error signing in: {message}")]
    Auth {
        /// A description of the rejection, usually the HTTP status line.
        message: String,
    },

    /// A network-level failure occurred.
    #[error("ALM request failed: {message}")]
    Transport {
        /// A description of the transport failure.
        message: String,
    },

    /// The response body did not have the expected structure.
    #[error("failed to decode ALM response: {message}")]
    Decode {
        /// A description of the decoding failure.
        message: String,
    },
}

/// Errors raised by the reconciliation engine itself.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A requested defect ID is not an integer.
    #[error("invalid defect id '{value}': {source}")]
    InvalidDefectId {
        /// The raw value that failed to parse.
        value: String,
        /// The underlying integer parse failure.
        source: ParseIntError,
    },
}

/// Top-level error type for the ALM defect client.
///
/// This enum aggregates all domain-specific errors into a single type that can
/// be used throughout the library. At the application boundary (`main.rs`),
/// these errors are converted to `eyre::Report` for human-readable reporting.
#[derive(Debug, Error)]
pub enum AlmError {
    /// An error occurred during configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The delivery manifest could not be parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The remote gateway reported a failure.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The reconciliation run was aborted.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// A specialised `Result` type for `alm-defect` operations.
pub type Result<T> = std::result::Result<T, AlmError>;
