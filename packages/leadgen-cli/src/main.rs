//! `leadgen` - import organization lists and submit them for lead generation.
//!
//! Records and payloads are written to stdout as JSON; logs go to stderr.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use leadgen_client::LeadGenClient;
use org_import::{
    import_file, validate_entry, write_csv, DesignationSelection, GroupingPolicy,
    OrganizationRecord, Session, SubmissionOptions, SAMPLE_CSV, SAMPLE_FILE_NAME,
};

#[derive(Parser)]
#[command(name = "leadgen")]
#[command(about = "Import organization lists and submit them for lead generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a CSV/XLSX file and print the organizations as JSON
    Import {
        file: PathBuf,
        /// Fold rows that share a name into one organization
        #[arg(long)]
        merge: bool,
    },

    /// Write the sample import file
    Sample {
        #[arg(long, short, default_value = SAMPLE_FILE_NAME)]
        output: PathBuf,
    },

    /// Import files and write them back out in the sample CSV format
    Export {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        merge: bool,
        /// Destination file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Validate organizations and submit them to the scrape-and-send service
    Submit(SubmitArgs),
}

#[derive(clap::Args)]
struct SubmitArgs {
    /// Where the results are emailed
    #[arg(long)]
    email: String,

    /// CSV/XLSX files to import
    files: Vec<PathBuf>,

    /// Extra organization as NAME=URL (repeatable)
    #[arg(long = "org", value_parser = parse_org)]
    orgs: Vec<OrganizationRecord>,

    #[arg(long)]
    merge: bool,

    /// Designation to search for (repeatable; default: all)
    #[arg(long = "designation")]
    designations: Vec<String>,

    /// Comma-separated custom designations
    #[arg(long)]
    custom_designations: Option<String>,

    /// Leave out role-based contacts such as info@
    #[arg(long)]
    no_generic: bool,

    /// Ask the service to look up postal addresses
    #[arg(long)]
    find_address: bool,

    /// Omit the findAddress field for services that do not accept it
    #[arg(long, conflicts_with = "find_address")]
    omit_find_address: bool,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Service base URL (overrides LEADGEN_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

impl SubmitArgs {
    fn designation_selection(&self) -> DesignationSelection {
        if self.designations.is_empty() && self.custom_designations.is_none() {
            DesignationSelection::All
        } else {
            DesignationSelection::selected(
                self.designations.iter().cloned(),
                self.custom_designations.clone().unwrap_or_default(),
            )
        }
    }

    fn options(&self) -> SubmissionOptions {
        SubmissionOptions {
            email: self.email.clone(),
            include_generic: !self.no_generic,
            find_address: self.find_address,
            designations: self.designation_selection(),
        }
    }
}

/// Parse `NAME=URL` into a single-link organization.
fn parse_org(value: &str) -> std::result::Result<OrganizationRecord, String> {
    let (name, link) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=URL, got {value:?}"))?;
    validate_entry(name, link).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr; stdout carries command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,leadgen_client=debug,org_import=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { file, merge } => cmd_import(&file, merge),
        Commands::Sample { output } => cmd_sample(&output),
        Commands::Export {
            files,
            merge,
            output,
        } => cmd_export(&files, merge, output.as_deref()),
        Commands::Submit(args) => cmd_submit(args).await,
    }
}

fn import_into(session: &mut Session, path: &Path, merge: bool) -> Result<usize> {
    let records = import_file(path, GroupingPolicy::from_merge_flag(merge))
        .with_context(|| format!("Failed to import {}", path.display()))?;
    session
        .import(records)
        .with_context(|| format!("Nothing to import from {}", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_import(file: &Path, merge: bool) -> Result<()> {
    let mut session = Session::new();
    let count = import_into(&mut session, file, merge)?;
    tracing::info!(count, "{} organizations imported successfully.", count);
    print_json(&session.organizations())
}

fn cmd_sample(output: &Path) -> Result<()> {
    std::fs::write(output, SAMPLE_CSV)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(path = %output.display(), "Sample file written");
    Ok(())
}

fn cmd_export(files: &[PathBuf], merge: bool, output: Option<&Path>) -> Result<()> {
    let mut session = Session::new();
    for file in files {
        import_into(&mut session, file, merge)?;
    }

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(session.organizations(), file)?;
            tracing::info!(path = %path.display(), count = session.len(), "Organizations exported");
        }
        None => write_csv(session.organizations(), io::stdout().lock())?,
    }
    Ok(())
}

async fn cmd_submit(args: SubmitArgs) -> Result<()> {
    let mut session = Session::new().with_options(args.options());
    for file in &args.files {
        import_into(&mut session, file, args.merge)?;
    }
    for org in &args.orgs {
        session.add(org.clone());
    }

    let mut submission = session.prepare_submission()?;
    if args.omit_find_address {
        submission = submission.without_find_address();
    }

    if args.dry_run {
        return print_json(&submission);
    }

    let config = Config::from_env();
    let api_url = config.api_url(args.api_url.as_deref())?;
    let client = LeadGenClient::new(api_url)?
        .with_app_id(config.app_id.clone())
        .with_token(config.api_token.expose_secret());

    tracing::info!("Submitting request and processing organizations...");
    let accepted = match client.scrape_and_send(&submission).await {
        Ok(accepted) => accepted,
        Err(e) => bail!("Failed to process request: {e}"),
    };

    println!("{}", accepted.message);
    Ok(())
}
