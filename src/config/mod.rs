//! Configuration system for the ALM defect client.
//!
//! This module provides the configuration structure, the CLI definitions, and
//! the resolver that merges command-line flags, environment variables, and the
//! configuration file. Precedence runs left to right: flags win over
//! environment variables, which win over the configuration file, which wins
//! over the built-in defaults. The first layer that sets a field wins.
//!
//! The configuration file is expected at `~/.alm.yaml` by default.
//!
//! # Example Configuration
//!
//! ```yaml
//! protocol: https
//! server: alm.example.com
//! port: 443
//! context: /qcbin
//! username: jdoe
//! domain: TMT_DOMAIN
//! project: TMT_PROJECT
//! fromstatus: Open
//! intostatus: Closed
//! ```

mod cli;
mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Cli, Commands, ReleasesArgs, UpdateArgs};
pub use loader::{
    CONFIG_FILE_NAME, DEFAULT_ENV_PREFIX, collect_env_vars, default_config_path, env_var_names,
    load_config, load_config_file, resolve,
};
pub use types::{AlmConfig, DEFAULT_CONTEXT, DEFAULT_PROTOCOL};
