//! Bulk command - VAT over a CSV of amounts

use crate::cmd::read_bulk_rows;
use crate::tax::vat::{calculate_vat, VatDirection, VatReport, STANDARD_RATE};
use crate::utils::{self, format_bdt};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BulkCommand {
    /// CSV file with amount and optional rate columns ("-" for stdin)
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct BulkTableRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "VAT")]
    vat: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// CSV output record
#[derive(Debug, Serialize)]
struct BulkCsvRow {
    amount: Decimal,
    rate: Decimal,
    vat: Decimal,
    total: Decimal,
}

#[derive(Debug, Serialize)]
struct BulkData {
    row_count: usize,
    rows: Vec<BulkJsonRow>,
    total_base: String,
    total_vat: String,
    total_amount: String,
}

#[derive(Debug, Serialize)]
struct BulkJsonRow {
    amount: String,
    rate_pct: String,
    vat: String,
    total: String,
}

impl BulkCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let rows = read_bulk_rows(&self.file)?;
        if rows.is_empty() {
            anyhow::bail!("no rows found in input");
        }

        // Bulk amounts are always VAT-exclusive
        let reports: Vec<VatReport> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                calculate_vat(
                    row.amount,
                    row.rate.unwrap_or(STANDARD_RATE),
                    VatDirection::Exclusive,
                )
                .with_context(|| format!("row {}", i + 1))
            })
            .collect::<anyhow::Result<_>>()?;

        if self.csv {
            self.print_csv(&reports)
        } else if self.json {
            self.print_json(&reports)
        } else {
            self.print_table(&reports);
            Ok(())
        }
    }

    fn print_table(&self, reports: &[VatReport]) {
        println!();
        println!("BULK VAT ({} rows)", reports.len());
        println!();

        let rows: Vec<BulkTableRow> = reports
            .iter()
            .enumerate()
            .map(|(i, r)| BulkTableRow {
                row: i + 1,
                amount: format_bdt(r.base_amount),
                rate: format!("{}%", r.rate.normalize()),
                vat: format_bdt(r.vat_amount),
                total: format_bdt(r.total_amount),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();

        let (base, vat, total) = totals(reports);
        println!(
            "TOTAL: {} + {} VAT = {}",
            format_bdt(base),
            format_bdt(vat),
            format_bdt(total)
        );
        println!();
    }

    fn print_csv(&self, reports: &[VatReport]) -> anyhow::Result<()> {
        let records = reports.iter().map(|r| BulkCsvRow {
            amount: r.base_amount.normalize(),
            rate: r.rate.normalize(),
            vat: r.vat_amount.normalize(),
            total: r.total_amount.normalize(),
        });
        utils::write_csv(records, std::io::stdout())
    }

    fn print_json(&self, reports: &[VatReport]) -> anyhow::Result<()> {
        let (base, vat, total) = totals(reports);
        let data = BulkData {
            row_count: reports.len(),
            rows: reports
                .iter()
                .map(|r| BulkJsonRow {
                    amount: format!("{:.2}", r.base_amount),
                    rate_pct: format!("{}", r.rate.normalize()),
                    vat: format!("{:.2}", r.vat_amount),
                    total: format!("{:.2}", r.total_amount),
                })
                .collect(),
            total_base: format!("{:.2}", base),
            total_vat: format!("{:.2}", vat),
            total_amount: format!("{:.2}", total),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

fn totals(reports: &[VatReport]) -> (Decimal, Decimal, Decimal) {
    reports.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(base, vat, total), r| {
            (
                base + r.base_amount,
                vat + r.vat_amount,
                total + r.total_amount,
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn totals_sum_all_rows() {
        let reports = vec![
            calculate_vat(dec!(1000), dec!(15), VatDirection::Exclusive).unwrap(),
            calculate_vat(dec!(2000), dec!(7.5), VatDirection::Exclusive).unwrap(),
            calculate_vat(dec!(500), dec!(5), VatDirection::Exclusive).unwrap(),
        ];
        let (base, vat, total) = totals(&reports);
        assert_eq!(base, dec!(3500));
        assert_eq!(vat, dec!(325));
        assert_eq!(total, dec!(3825));
    }
}
