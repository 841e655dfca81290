mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::advise::{AnalyzeArgs, ChatArgs, CompareArgs};
use commands::simulate::SimulateArgs;

/// Consumer loan simulation and advisory toolkit
#[derive(Parser)]
#[command(
    name = "lga",
    version,
    about = "Consumer loan simulation and AI-assisted contract review",
    long_about = "A CLI for projecting loan overpayment savings with decimal precision \
                  and for reviewing credit agreements with an AI advisor. Supports \
                  amortisation simulation, contract analysis, multi-offer comparison, \
                  and free-form consultation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable verbose debug logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project savings from a fixed monthly overpayment
    Simulate(SimulateArgs),
    /// Analyze a credit agreement for risks and hidden costs
    Analyze(AnalyzeArgs),
    /// Compare credit offers and pick the cheapest
    Compare(CompareArgs),
    /// One conversational exchange with the advisor
    Chat(ChatArgs),
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
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Analyze(args) => commands::advise::run_analyze(args),
        Commands::Compare(args) => commands::advise::run_compare(args),
        Commands::Chat(args) => commands::advise::run_chat(args),
        Commands::Version => {
            println!("lga {}", env!("CARGO_PKG_VERSION"));
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

/// Logs go to stderr so stdout stays clean for the formatted result.
/// `RUST_LOG` overrides the default level; `--verbose` forces debug.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}
