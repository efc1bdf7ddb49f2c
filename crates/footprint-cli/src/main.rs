mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::{CalculateArgs, SeverityArgs};
use commands::catalog::{FactorsArgs, StrategiesArgs};

/// Carbon footprint calculations for clinical-trial activities
#[derive(Parser)]
#[command(
    name = "cfp",
    version,
    about = "Carbon footprint calculations with decimal precision",
    long_about = "Computes an estimated carbon-emissions footprint for a set of \
                  activities, ranks the contributing activities by severity, and \
                  suggests mitigation strategies for the worst offenders."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a footprint calculation over a set of activities
    Calculate(CalculateArgs),
    /// Classify a percentage share into a severity band
    Severity(SeverityArgs),
    /// List emission factors from a catalog file
    Factors(FactorsArgs),
    /// List or query mitigation strategies from a catalog file
    Strategies(StrategiesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::calculate::run_calculate(args),
        Commands::Severity(args) => commands::calculate::run_severity(args),
        Commands::Factors(args) => commands::catalog::run_factors(args),
        Commands::Strategies(args) => commands::catalog::run_strategies(args),
        Commands::Version => {
            println!("cfp {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
