pub mod bulk;
pub mod income;
pub mod schema;
pub mod slabs;
pub mod vat;

use crate::input::{self, BulkRow, ReturnInput};
use crate::tax::{AssessmentYear, TaxpayerCategory};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Taxpayer category CLI argument
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CategoryArg {
    #[default]
    Individual,
    Female,
    Senior,
}

impl From<CategoryArg> for TaxpayerCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Individual => TaxpayerCategory::Individual,
            CategoryArg::Female => TaxpayerCategory::Female,
            CategoryArg::Senior => TaxpayerCategory::Senior,
        }
    }
}

/// Assessment year to use when none is given. Falls back to the latest
/// configured year when the current fiscal year has no slab table yet.
pub fn default_year() -> AssessmentYear {
    let current = AssessmentYear::current();
    if current.slabs(TaxpayerCategory::Individual).is_some() {
        current
    } else {
        let latest = AssessmentYear::latest();
        log::debug!("no slab table for {current}, defaulting to {latest}");
        latest
    }
}

/// Read a tax return (JSON) from a file, or stdin with "-"
pub fn read_return(path: &Path) -> anyhow::Result<ReturnInput> {
    if path.as_os_str() == "-" {
        input::read_return_json(io::Cursor::new(read_stdin()?))
    } else {
        let file = File::open(path)?;
        input::read_return_json(BufReader::new(file))
    }
}

/// Read bulk VAT rows (CSV) from a file, or stdin with "-"
pub fn read_bulk_rows(path: &Path) -> anyhow::Result<Vec<BulkRow>> {
    if path.as_os_str() == "-" {
        input::read_bulk_csv(io::Cursor::new(read_stdin()?))
    } else {
        let file = File::open(path)?;
        input::read_bulk_csv(BufReader::new(file))
    }
}

fn read_stdin() -> anyhow::Result<Vec<u8>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(buffer)
}
