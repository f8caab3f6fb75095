//! Command-line argument definitions for the ALM defect client.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

use super::AlmConfig;
use super::loader::DEFAULT_ENV_PREFIX;

/// Command-line interface for the ALM defect client.
#[derive(Debug, Parser)]
#[command(name = "alm")]
#[command(
    author,
    version,
    about = "Reconcile delivery manifests against an ALM defect tracker"
)]
pub struct Cli {
    /// Subcommand to execute; shows releases when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file (defaults to `~/.alm.yaml`).
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Prefix for environment variables.
    #[arg(long, global = true, default_value = DEFAULT_ENV_PREFIX)]
    pub prefix: String,

    /// ALM server protocol.
    #[arg(long, global = true)]
    pub protocol: Option<String>,

    /// Host name or IP address of the ALM server.
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// ALM server port.
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// ALM server web root.
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// ALM user name.
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// ALM password.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// ALM domain.
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// ALM project.
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Only defects whose status starts with this value are changed.
    #[arg(long, global = true, alias = "fromstatus")]
    pub from_status: Option<String>,

    /// Status defects are changed into.
    #[arg(long, global = true, alias = "intostatus")]
    pub into_status: Option<String>,

    /// Disable TLS certificate verification (not suggested).
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Returns the configuration layer set by command-line flags.
    #[must_use]
    pub fn config_layer(&self) -> AlmConfig {
        AlmConfig {
            protocol: self.protocol.clone().unwrap_or_default(),
            server: self.server.clone().unwrap_or_default(),
            port: self.port.unwrap_or_default(),
            context: self.context.clone().unwrap_or_default(),
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
            domain: self.domain.clone().unwrap_or_default(),
            project: self.project.clone().unwrap_or_default(),
            from_status: self.from_status.clone().unwrap_or_default(),
            into_status: self.into_status.clone().unwrap_or_default(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the defects of the configured project.
    Defects,

    /// Update the defects of a delivery manifest read from standard input.
    Delivery,

    /// List the available ALM domains.
    Domains,

    /// Update the given defects.
    Update(UpdateArgs),

    /// Show releases of the configured project.
    #[command(alias = "release")]
    Releases(ReleasesArgs),
}

/// Arguments for the `update` subcommand.
#[derive(Debug, Parser)]
pub struct UpdateArgs {
    /// Defect IDs to update, processed in order.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the `releases` subcommand.
#[derive(Debug, Default, Parser)]
pub struct ReleasesArgs {
    /// Release IDs to show; shows every release when empty.
    pub ids: Vec<String>,
}
