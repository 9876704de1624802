use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use examcost::analysis;
use examcost::catalog::list_catalog;
use examcost::config::{self, Config};
use examcost::history::{self, HistoryCommands, JsonFileStore};

#[derive(Parser)]
#[command(name = "examcost")]
#[command(
    about = "AWS cost estimation for online exam hosting",
    long_about = "examcost estimates the AWS footprint of hosting an online exam.\n\nGiven a university, subject, and student count (typed in or imported from\na CSV roster), it sizes CPU and memory demand with a 20% safety margin,\nrecommends the cheapest instance type that covers it, and keeps a local\nhistory of past analyses.\n\nThe instance table and history location can be overridden in a config file;\nrun 'examcost init' to create one."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    output: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the hosting cost for one exam
    ///
    /// Examples:
    ///   examcost estimate --university MIT --subject Physics --students 250
    ///   examcost estimate --csv roster.csv
    ///   examcost estimate --csv roster.csv --students 300 --no-save
    Estimate {
        /// University name
        #[arg(long)]
        university: Option<String>,
        /// Exam subject
        #[arg(long)]
        subject: Option<String>,
        /// Number of students sitting the exam
        #[arg(short, long)]
        students: Option<u32>,
        /// CSV file to import exam details from
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Do not record this analysis in the history
        #[arg(long)]
        no_save: bool,
    },
    /// Review and manage past analyses
    History {
        #[command(subcommand)]
        subcommand: HistoryCommands,
    },
    /// Show the instance type catalog
    Catalog,
    /// Initialize a configuration file
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".examcost.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging - suppress INFO by default, only show warnings and errors
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load config
    let config = Config::load(cli.config.as_deref())?;

    // Execute command
    match cli.command {
        Commands::Estimate {
            university,
            subject,
            students,
            csv,
            no_save,
        } => {
            let catalog = config.catalog()?;
            let store = JsonFileStore::new(&config.history.file);
            analysis::run_estimate(
                university,
                subject,
                students,
                csv.as_deref(),
                no_save,
                &catalog,
                &store,
                &cli.output,
            )?;
        }
        Commands::History { subcommand } => {
            let store = JsonFileStore::new(&config.history.file);
            history::handle_command(subcommand, &store, &cli.output)?;
        }
        Commands::Catalog => {
            let catalog = config.catalog()?;
            list_catalog(&catalog, &cli.output)?;
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
        }
    }

    Ok(())
}
