use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use groupie_catalog::app::Catalog;
use groupie_catalog::config::{ConfigLoader, ConfigOverrides};
use groupie_catalog::error::CatalogError;
use groupie_catalog::output::{JsonOutput, OutputMode, TextOutput};
use groupie_catalog::present::group_by_location;
use groupie_catalog::source::HttpCatalogSource;

#[derive(Parser)]
#[command(name = "groupie")]
#[command(about = "Browse and search the Groupie Trackers artist catalog")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List artists, optionally filtered by a search query")]
    List(ListArgs),
    #[command(about = "Show one artist with concerts grouped by location")]
    Show(IdArgs),
    #[command(about = "Show concerts of one artist grouped by location")]
    Locations(IdArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(short, long, default_value = "")]
    query: String,
}

#[derive(Args)]
struct IdArgs {
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    id: i64,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<CatalogError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &CatalogError) -> u8 {
    match error {
        CatalogError::ArtistNotFound(_) => 2,
        err if err.is_retryable() => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let config = ConfigLoader::resolve(
        cli.config.as_deref(),
        ConfigOverrides {
            base_url: cli.base_url,
            timeout_secs: cli.timeout_secs,
        },
    )?;
    let source = HttpCatalogSource::new(config)?;
    let catalog = Catalog::new(source)?;

    match cli.command {
        Commands::List(args) => {
            let listing = catalog.listing(&args.query);
            match output_mode {
                OutputMode::Json => JsonOutput::print_listing(&listing),
                OutputMode::Text => TextOutput::print_listing(&listing),
            }
            .into_diagnostic()
        }
        Commands::Show(args) => {
            let detail = catalog
                .detail(args.id)
                .ok_or(CatalogError::ArtistNotFound(args.id))?;
            match output_mode {
                OutputMode::Json => JsonOutput::print_detail(&detail),
                OutputMode::Text => TextOutput::print_detail(&detail),
            }
            .into_diagnostic()
        }
        Commands::Locations(args) => {
            let artist = catalog
                .lookup(args.id)
                .ok_or(CatalogError::ArtistNotFound(args.id))?;
            let groups = group_by_location(&artist.dates_locations);
            match output_mode {
                OutputMode::Json => JsonOutput::print_groups(&groups),
                OutputMode::Text => TextOutput::print_groups(&groups),
            }
            .into_diagnostic()
        }
    }
}
