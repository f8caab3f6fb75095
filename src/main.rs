//! `alm` application entry point.
//!
//! This binary reconciles delivery manifests against an ALM defect tracker
//! and lists domains, defects, and releases. It uses `eyre` for opaque error
//! handling at the application boundary, converting domain-specific errors
//! into human-readable reports.
//!
//! Configuration is resolved with first-wins precedence:
//! 1. Command-line arguments
//! 2. Environment variables (`ALM_*`, prefix configurable with `--prefix`)
//! 3. Configuration file (`~/.alm.yaml` or the path given by `--config`)
//! 4. Built-in defaults
//!
//! Exit codes: 0 on success, 1 on any failure reported through `eyre`, 2 for
//! usage errors (raised by clap), and 3 when the delivery manifest cannot be
//! parsed.

use std::fmt::Display;
use std::io;
use std::process::ExitCode;

use alm_defect::api::{self, project_scope};
use alm_defect::config::{AlmConfig, Cli, Commands, load_config};
use alm_defect::error::{ManifestError, Result as AlmResult};
use alm_defect::gateway::{AlmClient, Endpoint};
use alm_defect::logging::init_tracing;
use alm_defect::manifest::DeliveryManifest;
use alm_defect::reconcile::StatusTransition;
use alm_defect::session::Session;
use clap::Parser;
use eyre::{Report, Result as EyreResult};
use mockable::DefaultEnv;
use tracing::debug;

/// Exit code reported when the delivery manifest cannot be parsed.
const EXIT_MANIFEST_ERROR: u8 = 3;

/// The command to run, with any input it needs already read.
enum Action<'a> {
    Defects,
    Delivery(DeliveryManifest),
    Domains,
    Update(&'a [String]),
    Releases(&'a [String]),
}

/// Application entry point.
///
/// Uses `eyre::Result` as the return type to provide human-readable error
/// reports; a manifest parse failure is reported separately so it can carry
/// its own exit code.
#[tokio::main(flavor = "current_thread")]
async fn main() -> EyreResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = load_config(&cli, &DefaultEnv::new()).map_err(Report::from)?;
    debug!(?config, "resolved configuration");

    // Read stdin before signing in so malformed input never opens a session.
    let action = match plan(&cli) {
        Ok(action) => action,
        Err(e) => {
            report_manifest_error(&e);
            return Ok(ExitCode::from(EXIT_MANIFEST_ERROR));
        }
    };

    run(&cli, &config, action).await.map_err(Report::from)?;
    Ok(ExitCode::SUCCESS)
}

fn plan(cli: &Cli) -> Result<Action<'_>, ManifestError> {
    let action = match cli.command {
        Some(Commands::Defects) => Action::Defects,
        Some(Commands::Delivery) => Action::Delivery(DeliveryManifest::parse(io::stdin().lock())?),
        Some(Commands::Domains) => Action::Domains,
        Some(Commands::Update(ref args)) => Action::Update(&args.ids),
        Some(Commands::Releases(ref args)) => Action::Releases(&args.ids),
        None => Action::Releases(Default::default()),
    };
    Ok(action)
}

/// Execute the planned command, returning domain-specific errors.
///
/// Keeps semantic errors inside the run loop so the CLI boundary owns
/// conversion to `eyre::Report`.
async fn run(cli: &Cli, config: &AlmConfig, action: Action<'_>) -> AlmResult<()> {
    config.validate_endpoint()?;
    let client = AlmClient::new(Endpoint::from_config(config), cli.insecure)?;
    let credentials = config.credentials();
    let session = Session::new(&client, &credentials);

    match action {
        Action::Defects => {
            let scope = project_scope(config)?;
            print_lines(&api::list_defects(&session, &scope).await?);
        }
        Action::Delivery(manifest) => {
            let transition = StatusTransition::from_config(config)?;
            print_lines(&api::deliver(&session, &manifest, &transition).await?);
        }
        Action::Domains => print_lines(&api::list_domains(&session).await?),
        Action::Update(ids) => {
            let scope = project_scope(config)?;
            let transition = StatusTransition::from_config(config)?;
            print_lines(&api::update_defects(&session, &scope, ids, &transition).await?);
        }
        Action::Releases(ids) => {
            let scope = project_scope(config)?;
            print_lines(&api::show_releases(&session, &scope, ids).await?);
        }
    }
    Ok(())
}

/// Print one result per line.
#[expect(clippy::print_stdout, reason = "CLI output is the intended behaviour")]
fn print_lines<T: Display>(items: &[T]) {
    for item in items {
        println!("{item}");
    }
}

#[expect(
    clippy::print_stderr,
    reason = "manifest errors bypass eyre to carry their own exit code"
)]
fn report_manifest_error(error: &ManifestError) {
    eprintln!("error parsing stdin: {error}");
}
