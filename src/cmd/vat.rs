//! Vat command - VAT calculation for a single amount

use crate::tax::vat::{calculate_vat, VatDirection, VatReport, STANDARD_RATE};
use crate::utils::format_bdt;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VatCommand {
    /// Amount in taka
    amount: Decimal,

    /// VAT rate percentage (standard 15, reduced 7.5, special 5, exempt 0)
    #[arg(short, long, default_value_t = STANDARD_RATE)]
    rate: Decimal,

    /// Treat the amount as VAT-inclusive and extract the base
    #[arg(short, long)]
    inclusive: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// VAT data for JSON output
#[derive(Debug, Serialize)]
struct VatData {
    direction: String,
    rate: String,
    base_amount: String,
    vat_amount: String,
    total_amount: String,
}

impl VatCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let direction = if self.inclusive {
            VatDirection::Inclusive
        } else {
            VatDirection::Exclusive
        };
        let report = calculate_vat(self.amount, self.rate, direction)?;

        if self.json {
            self.print_json(&report)
        } else {
            self.print_text(&report);
            Ok(())
        }
    }

    fn print_text(&self, report: &VatReport) {
        println!();
        println!(
            "VAT CALCULATION ({} @ {}%)",
            report.direction,
            report.rate.normalize()
        );
        println!();
        for line in breakdown_lines(report) {
            println!("  {}", line);
        }
        println!();
    }

    fn print_json(&self, report: &VatReport) -> anyhow::Result<()> {
        let data = VatData {
            direction: report.direction.to_string(),
            rate: format!("{}", report.rate.normalize()),
            base_amount: format!("{:.2}", report.base_amount),
            vat_amount: format!("{:.2}", report.vat_amount),
            total_amount: format!("{:.2}", report.total_amount),
        };
        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

/// Step-by-step explanation of how the figures were derived
pub fn breakdown_lines(report: &VatReport) -> Vec<String> {
    let rate = report.rate.normalize();
    let base = format_bdt(report.base_amount);
    let vat = format_bdt(report.vat_amount);
    let total = format_bdt(report.total_amount);

    match report.direction {
        VatDirection::Exclusive => vec![
            format!("Base amount: {}", base),
            format!("VAT amount: {} × {}% = {}", base, rate, vat),
            format!("Total amount: {} + {} = {}", base, vat, total),
        ],
        VatDirection::Inclusive => vec![
            format!("Total amount (VAT inclusive): {}", total),
            format!("Base amount: {} ÷ (1 + {}/100) = {}", total, rate, base),
            format!("VAT amount: {} - {} = {}", total, base, vat),
        ],
    }
}
