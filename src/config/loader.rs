//! Configuration loading with first-wins layered precedence.
//!
//! Configuration is assembled from four layers, highest precedence first:
//! command-line flags, environment variables, the configuration file, and the
//! built-in defaults. For every field the first layer that sets it wins; later
//! layers never override an earlier value.
//!
//! # Environment Variable Handling
//!
//! Environment variables are bound through [`ENV_VAR_SPECS`], a fixed table of
//! field setters. The variable name is the configured prefix (default `ALM_`)
//! followed by the upper-cased field name, e.g. `ALM_SERVER` or
//! `ALM_FROMSTATUS`. Empty values are treated as unset.
//!
//! String fields are always accepted. `<prefix>PORT` must hold a valid port
//! number or loading fails with `ConfigError::InvalidValue`.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::config::{AlmConfig, Cli};
use crate::error::{ConfigError, Result};

/// Default prefix for configuration environment variables.
pub const DEFAULT_ENV_PREFIX: &str = "ALM_";

/// File name of the configuration file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".alm.yaml";

// ============================================================================
// Environment Variable Specification Table
// ============================================================================

/// Where an environment variable value is written.
#[derive(Clone, Copy)]
enum EnvVarTarget {
    /// String field (always accepted).
    Text(fn(&mut AlmConfig) -> &mut String),
    /// Port number. Invalid values return an error.
    Port,
}

/// Specification for a single environment variable mapping.
struct EnvVarSpec {
    /// Suffix appended to the prefix (e.g., `SERVER` for `ALM_SERVER`).
    suffix: &'static str,
    /// The field receiving the value.
    target: EnvVarTarget,
}

/// Table of all environment variables and the fields they set.
const ENV_VAR_SPECS: &[EnvVarSpec] = &[
    EnvVarSpec {
        suffix: "PROTOCOL",
        target: EnvVarTarget::Text(|config| &mut config.protocol),
    },
    EnvVarSpec {
        suffix: "SERVER",
        target: EnvVarTarget::Text(|config| &mut config.server),
    },
    EnvVarSpec {
        suffix: "PORT",
        target: EnvVarTarget::Port,
    },
    EnvVarSpec {
        suffix: "CONTEXT",
        target: EnvVarTarget::Text(|config| &mut config.context),
    },
    EnvVarSpec {
        suffix: "USERNAME",
        target: EnvVarTarget::Text(|config| &mut config.username),
    },
    EnvVarSpec {
        suffix: "PASSWORD",
        target: EnvVarTarget::Text(|config| &mut config.password),
    },
    EnvVarSpec {
        suffix: "DOMAIN",
        target: EnvVarTarget::Text(|config| &mut config.domain),
    },
    EnvVarSpec {
        suffix: "PROJECT",
        target: EnvVarTarget::Text(|config| &mut config.project),
    },
    EnvVarSpec {
        suffix: "FROMSTATUS",
        target: EnvVarTarget::Text(|config| &mut config.from_status),
    },
    EnvVarSpec {
        suffix: "INTOSTATUS",
        target: EnvVarTarget::Text(|config| &mut config.into_status),
    },
];

/// Returns the environment variable names recognised for `prefix`.
///
/// Useful for tests that need to stub every variable the loader reads.
#[must_use]
pub fn env_var_names(prefix: &str) -> Vec<String> {
    ENV_VAR_SPECS
        .iter()
        .map(|spec| format!("{prefix}{}", spec.suffix))
        .collect()
}

/// Resolve an ordered sequence of configuration layers into one.
///
/// Earlier layers take precedence: a field set by an earlier layer is never
/// overridden by a later one.
///
/// # Example
///
/// ```
/// use alm_defect::config::{AlmConfig, resolve};
///
/// let first = AlmConfig { server: String::from("A"), ..AlmConfig::default() };
/// let second = AlmConfig { server: String::from("B"), port: 8080, ..AlmConfig::default() };
/// let merged = resolve([first, second]);
/// assert_eq!(merged.server, "A");
/// assert_eq!(merged.port, 8080);
/// ```
#[must_use]
pub fn resolve<I>(layers: I) -> AlmConfig
where
    I: IntoIterator<Item = AlmConfig>,
{
    layers
        .into_iter()
        .fold(AlmConfig::default(), |merged, layer| merged.or(layer))
}

/// Load configuration with full layer precedence.
///
/// Layers, highest precedence first:
/// 1. Command-line arguments (from the provided `Cli`)
/// 2. Environment variables named `<prefix><FIELD>`
/// 3. Configuration file (`--config`, otherwise `~/.alm.yaml` when present)
/// 4. Built-in defaults
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - an explicitly requested configuration file does not exist
/// - the configuration file cannot be read or parsed
/// - `<prefix>PORT` holds an invalid port number
pub fn load_config<E: mockable::Env>(cli: &Cli, env: &E) -> Result<AlmConfig> {
    let file_layer = match cli.config {
        Some(ref path) => load_required_config_file(path)?,
        None => load_default_config_file()?,
    };
    let env_layer = collect_env_vars(env, &cli.prefix)?;

    Ok(resolve([
        cli.config_layer(),
        env_layer,
        file_layer,
        AlmConfig::defaults(),
    ]))
}

/// Returns the default configuration file path, `~/.alm.yaml`.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    dirs::home_dir()
        .and_then(|home| Utf8PathBuf::try_from(home).ok())
        .map(|home| home.join(CONFIG_FILE_NAME))
}

/// Collect environment variables with the given prefix into a layer.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `<prefix>PORT` is not a valid port
/// number.
pub fn collect_env_vars<E: mockable::Env>(env: &E, prefix: &str) -> Result<AlmConfig> {
    let mut layer = AlmConfig::default();

    for spec in ENV_VAR_SPECS {
        let key = format!("{prefix}{}", spec.suffix);
        let Some(raw_value) = env.string(&key).filter(|value| !value.is_empty()) else {
            continue;
        };

        match spec.target {
            EnvVarTarget::Text(field) => *field(&mut layer) = raw_value,
            EnvVarTarget::Port => {
                layer.port = raw_value
                    .parse::<u16>()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: key,
                        reason: format!("expected port number, got '{raw_value}'"),
                    })?;
            }
        }
    }

    Ok(layer)
}

/// Load a configuration file the user named explicitly.
fn load_required_config_file(path: &Utf8Path) -> Result<AlmConfig> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.as_std_path().to_path_buf(),
        }
        .into());
    }
    load_config_file(path)
}

/// Load `~/.alm.yaml` if it exists; its absence yields an empty layer.
fn load_default_config_file() -> Result<AlmConfig> {
    match default_config_path().filter(|path| path.exists()) {
        Some(path) => load_config_file(&path),
        None => Ok(AlmConfig::default()),
    }
}

/// Read and parse a YAML configuration file.
///
/// Uses `cap_std::fs_utf8` for capability-oriented filesystem access: the
/// parent directory is opened with ambient authority and the file is read
/// from there.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the file cannot be read or is not
/// valid YAML for [`AlmConfig`].
pub fn load_config_file(path: &Utf8Path) -> Result<AlmConfig> {
    let parent = path
        .parent()
        .filter(|p| !p.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().unwrap_or(path.as_str());

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to open directory {parent}: {e}"),
        }
    })?;

    let content = dir
        .read_to_string(file_name)
        .map_err(|e| ConfigError::ParseError {
            message: format!("failed to read {path}: {e}"),
        })?;

    parse_config(&content).map_err(|e| {
        ConfigError::ParseError {
            message: format!("failed to parse {path}: {e}"),
        }
        .into()
    })
}

/// Parse configuration file content; a blank file is an empty layer.
fn parse_config(content: &str) -> std::result::Result<AlmConfig, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(AlmConfig::default());
    }
    serde_yaml::from_str(content)
}
