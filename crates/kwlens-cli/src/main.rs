mod analyze;
mod trend;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kwlens_core::{DocumentVertical, TimeUnit};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kwlens")]
#[command(about = "Naver keyword research: related keywords, document counts, search trends")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch related keywords for seed keywords, rank them, and export CSV
    Analyze {
        /// Comma- or newline-separated seed keywords (defaults to "chatgpt")
        #[arg(long, conflicts_with = "seed_file")]
        keywords: Option<String>,
        /// YAML file with a `keywords:` list
        #[arg(long)]
        seed_file: Option<PathBuf>,
        /// Minimum monthly volume on both PC and mobile
        #[arg(long)]
        min_volume: Option<u64>,
        /// Search vertical used for document counts (webkr or blog)
        #[arg(long)]
        vertical: Option<DocumentVertical>,
        /// Maximum concurrent document-count lookups
        #[arg(long)]
        concurrency: Option<usize>,
        /// CSV output path
        #[arg(long, default_value = "keyword_analysis.csv")]
        output: PathBuf,
        /// Rows shown in each ranked view
        #[arg(long, default_value = "10")]
        top: usize,
    },
    /// Show the relative search-volume trend for one keyword
    Trend {
        #[arg(long)]
        keyword: String,
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Bucket size: date, week, or month
        #[arg(long, default_value = "month")]
        unit: TimeUnit,
    },
    /// Print the effective configuration with secrets redacted
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("kwlens: no command given; run `kwlens --help`");
        return Ok(());
    };

    // Fails before any network call if credentials are missing.
    let mut config = kwlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Analyze {
            keywords,
            seed_file,
            min_volume,
            vertical,
            concurrency,
            output,
            top,
        } => {
            analyze::apply_overrides(&mut config, min_volume, vertical, concurrency);
            let seeds = analyze::resolve_seeds(keywords.as_deref(), seed_file.as_deref())?;
            analyze::run_analyze(&config, &seeds, &output, top).await?;
        }
        Commands::Trend {
            keyword,
            start,
            end,
            unit,
        } => trend::run_trend(&config, &keyword, start, end, unit).await?,
        Commands::Config => println!("{config:#?}"),
    }

    Ok(())
}
