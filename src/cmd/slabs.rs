//! Slabs command - show the slab table for a year and category

use crate::cmd::{default_year, CategoryArg};
use crate::tax::bd::TaxSlab;
use crate::tax::{AssessmentYear, TaxError, TaxpayerCategory};
use crate::utils::format_bdt;
use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct SlabsCommand {
    /// Assessment year end (e.g., 2025 for 2024-25)
    #[arg(short, long)]
    year: Option<i32>,

    /// Taxpayer category
    #[arg(short, long, value_enum, default_value_t = CategoryArg::Individual)]
    category: CategoryArg,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct SlabTableRow {
    #[tabled(rename = "Income Range")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Description")]
    description: String,
}

#[derive(Debug, Serialize)]
struct SlabsOutput {
    assessment_year: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tax_free_threshold: Option<String>,
    slabs: Vec<SlabJsonRow>,
}

#[derive(Debug, Serialize)]
struct SlabJsonRow {
    range: String,
    rate_pct: String,
    description: String,
}

impl SlabsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self.year.map_or_else(default_year, AssessmentYear);
        let category: TaxpayerCategory = self.category.into();
        let slabs = year
            .slabs(category)
            .ok_or(TaxError::UnknownSlabTable { year, category })?;

        if self.json {
            self.print_json(year, category, slabs)
        } else {
            self.print_table(year, category, slabs);
            Ok(())
        }
    }

    fn print_table(&self, year: AssessmentYear, category: TaxpayerCategory, slabs: &[TaxSlab]) {
        println!();
        println!("TAX SLABS ({}, {})", year, category.label());
        println!(
            "Fiscal year {} to {}",
            year.start_date().format("%-d %B %Y"),
            year.end_date().format("%-d %B %Y")
        );
        if let Some(threshold) = year.tax_free_threshold(category) {
            println!("Tax-free threshold: {}", format_bdt(threshold));
        }
        println!();

        let rows: Vec<SlabTableRow> = slabs
            .iter()
            .map(|slab| SlabTableRow {
                range: range_text(slab),
                rate: format!("{}%", slab.rate.normalize()),
                description: slab.label.to_string(),
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
    }

    fn print_json(
        &self,
        year: AssessmentYear,
        category: TaxpayerCategory,
        slabs: &[TaxSlab],
    ) -> anyhow::Result<()> {
        let output = SlabsOutput {
            assessment_year: year.display(),
            category: category.to_string(),
            tax_free_threshold: year
                .tax_free_threshold(category)
                .map(|t| format!("{:.2}", t)),
            slabs: slabs
                .iter()
                .map(|slab| SlabJsonRow {
                    range: range_text(slab),
                    rate_pct: format!("{}", slab.rate.normalize()),
                    description: slab.label.to_string(),
                })
                .collect(),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn range_text(slab: &TaxSlab) -> String {
    match slab.upper {
        Some(upper) => format!("{} - {}", format_bdt(slab.lower), format_bdt(upper)),
        None => format!("Above {}", format_bdt(slab.lower)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_text_for_bounded_and_unbounded_slabs() {
        let slabs = AssessmentYear(2025)
            .slabs(TaxpayerCategory::Individual)
            .unwrap();
        assert_eq!(range_text(&slabs[0]), "৳0 - ৳3,50,000");
        assert_eq!(range_text(&slabs[1]), "৳3,50,000 - ৳4,50,000");
        assert_eq!(range_text(&slabs[5]), "Above ৳16,50,000");
    }
}
