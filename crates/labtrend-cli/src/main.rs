mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "LABTREND_LOG";

#[derive(Parser)]
#[command(
    name = "labtrend",
    version,
    about = "Trends, range checks and scores over a user's lab reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build per-parameter time series from a JSON array of reports
    Series {
        /// Path to a JSON file holding the user's reports
        reports: PathBuf,

        /// Custom reference-range catalog (default: built-in catalog)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show direction and percent change for one parameter
    Trend {
        /// Path to a JSON file holding the user's reports
        reports: PathBuf,

        /// Exact parameter name as it appears in the reports
        #[arg(short, long)]
        parameter: String,

        /// Custom reference-range catalog (default: built-in catalog)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Average the health scores supplied with the reports
    Score {
        /// Path to a JSON file holding the user's reports
        reports: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Dashboard overview: archive, scores, trends and next checkup
    Overview {
        /// Path to a JSON file holding the user's reports
        reports: PathBuf,

        /// Custom reference-range catalog (default: built-in catalog)
        #[arg(short, long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also list values that could not be read as numbers
        #[arg(long)]
        verbose: bool,
    },
    /// Calculate BMI and look up stored records
    Bmi {
        #[command(subcommand)]
        action: BmiAction,
    },
    /// Inspect and validate reference-range catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum BmiAction {
    /// Calculate BMI from height and weight
    Calc {
        /// Height in centimetres
        #[arg(long)]
        height: String,

        /// Weight in kilograms
        #[arg(long)]
        weight: String,

        /// Append the result to this JSON record file
        #[arg(long, value_name = "FILE", requires = "user")]
        store: Option<PathBuf>,

        /// User the stored record belongs to
        #[arg(long)]
        user: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show a user's most recent stored BMI record
    Latest {
        /// JSON record file written by `bmi calc --store`
        #[arg(long, value_name = "FILE")]
        store: PathBuf,

        /// User to look up
        #[arg(long)]
        user: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List the built-in reference ranges
    List,
    /// Print the catalog JSON schema with an example
    Schema,
    /// Validate a custom catalog file
    Validate {
        /// Path to JSON catalog file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Series {
            reports,
            catalog,
            output,
        } => commands::series::run(reports, catalog, &output),
        Commands::Trend {
            reports,
            parameter,
            catalog,
            output,
        } => commands::series::trend(reports, &parameter, catalog, &output),
        Commands::Score { reports, output } => commands::score::run(reports, &output),
        Commands::Overview {
            reports,
            catalog,
            output,
            verbose,
        } => commands::overview::run(reports, catalog, &output, verbose),
        Commands::Bmi { action } => match action {
            BmiAction::Calc {
                height,
                weight,
                store,
                user,
                output,
            } => commands::bmi::calc(&height, &weight, store, user, &output),
            BmiAction::Latest {
                store,
                user,
                output,
            } => commands::bmi::latest(store, &user, &output),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Schema => commands::catalog::schema(),
            CatalogAction::Validate { file } => commands::catalog::validate(&file),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
