//! Income command - full income tax return calculation

use crate::cmd::{default_year, read_return, CategoryArg};
use crate::input::ReturnInput;
use crate::tax::income::{
    allowable_deductions, calculate_income_tax, tax_saving_tips, AllowedDeductions, Deductions,
    IncomeSources, IncomeTaxReport, SavingTip, TipPriority,
};
use crate::tax::{AssessmentYear, TaxpayerCategory};
use crate::utils::format_bdt;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct IncomeCommand {
    /// JSON tax return file ("-" for stdin). Flags override file values.
    #[arg(short = 'f', long)]
    input: Option<PathBuf>,

    /// Salary income
    #[arg(long)]
    salary: Option<Decimal>,

    /// Business income
    #[arg(long)]
    business: Option<Decimal>,

    /// Rental income
    #[arg(long)]
    rental: Option<Decimal>,

    /// Any other income
    #[arg(long)]
    other_income: Option<Decimal>,

    /// Investment in approved instruments
    #[arg(long)]
    investment: Option<Decimal>,

    /// Zakat paid
    #[arg(long)]
    zakat: Option<Decimal>,

    /// Charitable donations
    #[arg(long)]
    donation: Option<Decimal>,

    /// Any other allowable deduction
    #[arg(long)]
    other_deduction: Option<Decimal>,

    /// Assessment year end (e.g., 2025 for 2024-25)
    #[arg(short, long)]
    year: Option<i32>,

    /// Taxpayer category
    #[arg(short, long, value_enum)]
    category: Option<CategoryArg>,

    /// Show tax saving tips after the report
    #[arg(long)]
    tips: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Return data for JSON output
#[derive(Debug, Serialize)]
struct ReturnData {
    assessment_year: String,
    category: String,
    income: IncomeView,
    deductions: DeductionsView,
    taxable_income: String,
    slabs: Vec<SlabView>,
    total_tax: String,
    monthly_tax: String,
    effective_rate_pct: String,
    marginal_rate_pct: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tips: Vec<TipView>,
}

#[derive(Debug, Serialize)]
struct IncomeView {
    salary: String,
    business: String,
    rental: String,
    other: String,
    total: String,
}

#[derive(Debug, Serialize)]
struct DeductionsView {
    investment: String,
    zakat: String,
    donation: String,
    other: String,
    total: String,
}

#[derive(Debug, Serialize)]
struct SlabView {
    slab: String,
    taxable_amount: String,
    rate_pct: String,
    tax: String,
}

#[derive(Debug, Serialize)]
struct TipView {
    priority: String,
    message: String,
}

impl IncomeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = match &self.input {
            Some(path) => read_return(path)?,
            None => ReturnInput::default(),
        };
        let year = self.resolve_year(&input)?;
        let category = self.resolve_category(&input)?;

        let mut income: IncomeSources = input.income.into();
        if let Some(salary) = self.salary {
            income.salary = salary;
        }
        if let Some(business) = self.business {
            income.business = business;
        }
        if let Some(rental) = self.rental {
            income.rental = rental;
        }
        if let Some(other) = self.other_income {
            income.other = other;
        }

        let mut claimed: Deductions = input.deductions.into();
        if let Some(investment) = self.investment {
            claimed.investment = investment;
        }
        if let Some(zakat) = self.zakat {
            claimed.zakat = zakat;
        }
        if let Some(donation) = self.donation {
            claimed.donation = donation;
        }
        if let Some(other) = self.other_deduction {
            claimed.other = other;
        }

        ensure_non_negative(&[
            ("salary", income.salary),
            ("business", income.business),
            ("rental", income.rental),
            ("other income", income.other),
            ("investment", claimed.investment),
            ("zakat", claimed.zakat),
            ("donation", claimed.donation),
            ("other deduction", claimed.other),
        ])?;

        let total_income = income.total();
        if total_income.is_zero() && !self.json {
            println!("No income entered. Provide figures with --salary and friends, or --input.");
            return Ok(());
        }
        let allowed = allowable_deductions(total_income, &claimed)?;
        let taxable = (total_income - allowed.total()).max(Decimal::ZERO);
        log::debug!(
            "total income {total_income}, deductions {}, taxable {taxable}",
            allowed.total()
        );
        let report = calculate_income_tax(taxable, category, year)?;

        let tips = if self.tips {
            tax_saving_tips(total_income, &allowed, &report)
        } else {
            Vec::new()
        };

        if self.json {
            self.print_json(year, category, &income, &allowed, &report, &tips)
        } else {
            self.print_text(year, category, &income, &claimed, &allowed, &report, &tips);
            Ok(())
        }
    }

    fn resolve_year(&self, input: &ReturnInput) -> anyhow::Result<AssessmentYear> {
        if let Some(year) = self.year {
            return Ok(AssessmentYear(year));
        }
        if let Some(ref s) = input.assessment_year {
            return AssessmentYear::parse(s).ok_or_else(|| {
                anyhow::anyhow!("invalid assessment year '{}', expected the 2024-25 form", s)
            });
        }
        Ok(default_year())
    }

    fn resolve_category(&self, input: &ReturnInput) -> anyhow::Result<TaxpayerCategory> {
        if let Some(arg) = self.category {
            return Ok(arg.into());
        }
        if let Some(ref s) = input.category {
            return TaxpayerCategory::from_str(s).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown taxpayer category '{}', expected individual, female or senior",
                    s
                )
            });
        }
        Ok(TaxpayerCategory::default())
    }

    #[allow(clippy::too_many_arguments)]
    fn print_text(
        &self,
        year: AssessmentYear,
        category: TaxpayerCategory,
        income: &IncomeSources,
        claimed: &Deductions,
        allowed: &AllowedDeductions,
        report: &IncomeTaxReport,
        tips: &[SavingTip],
    ) {
        println!();
        println!("INCOME TAX RETURN ({}, {})", year, category.label());
        println!();

        println!("INCOME");
        println!("  Salary: {}", format_bdt(income.salary));
        println!("  Business: {}", format_bdt(income.business));
        println!("  Rental: {}", format_bdt(income.rental));
        println!("  Other: {}", format_bdt(income.other));
        println!("  Total income: {}", format_bdt(income.total()));
        println!();

        println!("DEDUCTIONS");
        println!(
            "  Investment: {}{}",
            format_bdt(allowed.investment),
            capped_note(claimed.investment, allowed.investment)
        );
        println!("  Zakat: {}", format_bdt(allowed.zakat));
        println!(
            "  Donation: {}{}",
            format_bdt(allowed.donation),
            capped_note(claimed.donation, allowed.donation)
        );
        println!("  Other: {}", format_bdt(allowed.other));
        println!("  Total deductions: {}", format_bdt(allowed.total()));
        println!();

        println!("TAXABLE INCOME: {}", format_bdt(report.taxable_income));
        println!();

        if !report.slabs.is_empty() {
            let rows: Vec<SlabRow> = report
                .slabs
                .iter()
                .map(|s| SlabRow {
                    slab: s.label.to_string(),
                    taxable_amount: format_bdt(s.taxable_amount),
                    rate: format!("{}%", s.rate.normalize()),
                    tax: format_bdt(s.tax),
                })
                .collect();

            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
            println!();
        }

        println!("TOTAL TAX: {}", format_bdt(report.total_tax));
        println!(
            "Monthly: {} | Effective rate: {:.2}% | Marginal rate: {:.0}%",
            format_bdt(report.monthly_tax()),
            report.effective_rate,
            report.marginal_rate
        );
        println!();

        if !tips.is_empty() {
            println!("TAX SAVING TIPS");
            println!();
            for (i, tip) in tips.iter().enumerate() {
                println!("  {}. [{}] {}", i + 1, tip_priority_name(tip), tip_message(tip));
            }
            println!();
        }
    }

    fn print_json(
        &self,
        year: AssessmentYear,
        category: TaxpayerCategory,
        income: &IncomeSources,
        allowed: &AllowedDeductions,
        report: &IncomeTaxReport,
        tips: &[SavingTip],
    ) -> anyhow::Result<()> {
        let data = ReturnData {
            assessment_year: year.display(),
            category: category.to_string(),
            income: IncomeView {
                salary: format!("{:.2}", income.salary),
                business: format!("{:.2}", income.business),
                rental: format!("{:.2}", income.rental),
                other: format!("{:.2}", income.other),
                total: format!("{:.2}", income.total()),
            },
            deductions: DeductionsView {
                investment: format!("{:.2}", allowed.investment),
                zakat: format!("{:.2}", allowed.zakat),
                donation: format!("{:.2}", allowed.donation),
                other: format!("{:.2}", allowed.other),
                total: format!("{:.2}", allowed.total()),
            },
            taxable_income: format!("{:.2}", report.taxable_income),
            slabs: report
                .slabs
                .iter()
                .map(|s| SlabView {
                    slab: s.label.to_string(),
                    taxable_amount: format!("{:.2}", s.taxable_amount),
                    rate_pct: format!("{}", s.rate.normalize()),
                    tax: format!("{:.2}", s.tax),
                })
                .collect(),
            total_tax: format!("{:.2}", report.total_tax),
            monthly_tax: format!("{:.2}", report.monthly_tax()),
            effective_rate_pct: format!("{:.2}", report.effective_rate),
            marginal_rate_pct: format!("{:.0}", report.marginal_rate),
            tips: tips
                .iter()
                .map(|tip| TipView {
                    priority: tip_priority_name(tip),
                    message: tip_message(tip),
                })
                .collect(),
        };

        println!("{}", serde_json::to_string_pretty(&data)?);
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "Slab")]
    slab: String,
    #[tabled(rename = "Taxable Amount")]
    taxable_amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

fn ensure_non_negative(figures: &[(&str, Decimal)]) -> anyhow::Result<()> {
    for (name, figure) in figures {
        if *figure < Decimal::ZERO {
            anyhow::bail!("{} must not be negative, got {}", name, figure);
        }
    }
    Ok(())
}

fn capped_note(claimed: Decimal, allowed: Decimal) -> String {
    if claimed > allowed {
        format!(" (claimed {}, capped)", format_bdt(claimed))
    } else {
        String::new()
    }
}

fn tip_priority_name(tip: &SavingTip) -> String {
    match tip.priority() {
        TipPriority::High => "HIGH",
        TipPriority::Medium => "MEDIUM",
    }
    .to_string()
}

fn tip_message(tip: &SavingTip) -> String {
    match tip {
        SavingTip::InvestmentAllowance { headroom, saving } => format!(
            "Invest {} more in approved instruments to save up to {} in tax",
            format_bdt(*headroom),
            format_bdt(*saving)
        ),
        SavingTip::DonationAllowance { headroom, saving } => format!(
            "Donate up to {} more to approved charities to save up to {} in tax",
            format_bdt(*headroom),
            format_bdt(*saving)
        ),
        SavingTip::AdvanceInstalments => {
            "Liability exceeds ৳5,000. Pay advance tax in quarterly instalments to avoid interest."
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn investment_tip_message() {
        let tip = SavingTip::InvestmentAllowance {
            headroom: dec!(150000),
            saving: dec!(22500),
        };
        assert_eq!(
            tip_message(&tip),
            "Invest ৳1,50,000 more in approved instruments to save up to ৳22,500 in tax"
        );
        assert_eq!(tip_priority_name(&tip), "HIGH");
    }

    #[test]
    fn donation_tip_message() {
        let tip = SavingTip::DonationAllowance {
            headroom: dec!(100000),
            saving: dec!(15000),
        };
        assert_eq!(
            tip_message(&tip),
            "Donate up to ৳1,00,000 more to approved charities to save up to ৳15,000 in tax"
        );
        assert_eq!(tip_priority_name(&tip), "MEDIUM");
    }

    #[test]
    fn capped_note_only_when_reduced() {
        assert_eq!(
            capped_note(dec!(500000), dec!(250000)),
            " (claimed ৳5,00,000, capped)"
        );
        assert_eq!(capped_note(dec!(100000), dec!(100000)), "");
    }

    #[test]
    fn negative_figures_rejected() {
        assert!(ensure_non_negative(&[("salary", dec!(-1))]).is_err());
        assert!(ensure_non_negative(&[("salary", dec!(0)), ("zakat", dec!(10))]).is_ok());
    }
}
