mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{LoanArgs, PageArgs};

/// Mortgage repayment schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "mcalc",
    version,
    about = "Mortgage repayment schedules with decimal precision",
    long_about = "A CLI for computing month-by-month mortgage repayment schedules. \
                  Supports bullet (maturity), equal principal and level payment \
                  amortization, with summaries, paged tables and chart series."
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
    /// Compute the full month-by-month repayment schedule
    Schedule(LoanArgs),
    /// Summary figures: totals, first and last payment, interest ratios
    Summary(LoanArgs),
    /// One page of the schedule table
    Page(PageArgs),
    /// Remaining balance series, sampled yearly for long terms
    Chart(LoanArgs),
    /// Summary, schedule page and chart series in one result
    Report(PageArgs),
    /// Show the prompt the advisory model would receive
    AdvicePrompt(LoanArgs),
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
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Page(args) => commands::loan::run_page(args),
        Commands::Chart(args) => commands::loan::run_chart(args),
        Commands::Report(args) => commands::loan::run_report(args),
        Commands::AdvicePrompt(args) => commands::advice::run_advice_prompt(args),
        Commands::Version => {
            println!("mcalc {}", env!("CARGO_PKG_VERSION"));
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
