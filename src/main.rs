use clap::{Parser, Subcommand};

mod cmd;
mod input;
mod tax;
mod utils;

use cmd::bulk::BulkCommand;
use cmd::income::IncomeCommand;
use cmd::schema::SchemaCommand;
use cmd::slabs::SlabsCommand;
use cmd::vat::VatCommand;

/// Bangladesh tax calculator for VAT and income tax
#[derive(Parser, Debug)]
#[command(name = "bdtax", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate VAT for a single amount
    Vat(VatCommand),
    /// Calculate an income tax return
    Income(IncomeCommand),
    /// Show the tax slabs for a year and category
    Slabs(SlabsCommand),
    /// Calculate VAT over a CSV of amounts
    Bulk(BulkCommand),
    /// Print expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Vat(cmd) => cmd.exec(),
        Command::Income(cmd) => cmd.exec(),
        Command::Slabs(cmd) => cmd.exec(),
        Command::Bulk(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
