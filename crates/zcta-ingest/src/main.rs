//! zcta - ZIP code to county lookup table builder

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use zcta_common::logging::{init_logging, LogConfig, LogLevel};
use zcta_ingest::output::ZIP_STATE_COUNTY_FILE;
use zcta_ingest::{IngestConfig, Pipeline, Query, ZipLookup};

#[derive(Parser, Debug)]
#[command(name = "zcta")]
#[command(author, version, about = "Build ZIP code to county lookup tables from census data")]
struct Cli {
    /// Defaults to `build`
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch sources (once), join them and write the JSON tables
    Build(BuildArgs),

    /// Query a written zip_state_county.json
    Lookup(LookupArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Download cache directory
    #[arg(long, default_value = zcta_ingest::config::DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = zcta_ingest::config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Only use the census sources; skip nearest-county matching
    #[arg(long)]
    skip_zip_codes: bool,

    /// Write JSON without indentation
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Table to query (defaults to out/zip_state_county.json)
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(short, long)]
    state: Option<String>,

    #[arg(short, long)]
    county: Option<String>,

    #[arg(short, long)]
    zip: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("zcta")
        .build()
        .merge_env()?;

    init_logging(&log_config)?;

    match cli.command {
        Some(Command::Build(args)) => build(args).await,
        None => build(BuildArgs {
            cache_dir: PathBuf::from(zcta_ingest::config::DEFAULT_CACHE_DIR),
            output_dir: PathBuf::from(zcta_ingest::config::DEFAULT_OUTPUT_DIR),
            skip_zip_codes: false,
            compact: false,
        })
        .await,
        Some(Command::Lookup(args)) => lookup(args),
    }
}

async fn build(args: BuildArgs) -> Result<()> {
    let mut builder = IngestConfig::builder()
        .cache_dir(args.cache_dir)
        .output_dir(args.output_dir)
        .pretty(!args.compact);
    if args.skip_zip_codes {
        builder = builder.without_zip_codes();
    }

    let stats = Pipeline::new(builder.build())?.run().await?;

    for path in &stats.files_written {
        info!(path = %path.display(), "Output written");
    }
    Ok(())
}

fn lookup(args: LookupArgs) -> Result<()> {
    let input = args.input.unwrap_or_else(|| {
        PathBuf::from(zcta_ingest::config::DEFAULT_OUTPUT_DIR).join(ZIP_STATE_COUNTY_FILE)
    });
    let lookup = ZipLookup::from_path(&input)?;

    let query = Query {
        state: args.state,
        county: args.county,
        zip: args.zip,
    };

    match lookup.find(&query) {
        Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        None => println!("null"),
    }
    Ok(())
}
