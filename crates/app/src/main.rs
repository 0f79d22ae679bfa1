use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabula_core::Bank;
use tracing_subscriber::EnvFilter;

mod convert;
mod prompt;

#[derive(Parser, Debug)]
#[command(
    name = "tabula",
    version,
    about = "Convert bank statement exports into a categorized ledger"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a statement export, assigning categories interactively.
    /// End input (Ctrl-D) at a prompt to stop early; converted rows and
    /// learned categories are kept.
    Convert {
        /// Path to the statement CSV
        statement: PathBuf,

        /// Bank that produced the export (anz or natwest)
        #[arg(long)]
        bank: String,

        /// Category store, read at start and rewritten at the end
        #[arg(long, default_value = "categories")]
        categories: PathBuf,

        /// Amendments file applied after conversion
        #[arg(long, default_value = "amendments")]
        amendments: PathBuf,

        /// Output CSV path
        #[arg(long, default_value = "out.csv")]
        out: PathBuf,

        /// Absolute amount above which a transaction is flagged excluded
        #[arg(long, default_value = "20000")]
        ceiling: Decimal,
    },
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            statement,
            bank,
            categories,
            amendments,
            out,
            ceiling,
        } => {
            let bank: Bank = bank.parse()?;
            convert::run(&statement, bank, &categories, &amendments, &out, ceiling)
        }
    }
}

/// Logs go to stderr so stdout stays free for the category prompt.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
