use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::bd::{AssessmentYear, TaxSlab, TaxpayerCategory};
use super::TaxError;

// Deduction caps: investment allowance at 25% of total income up to
// ৳15,00,000, charitable donations at 10% of total income.
const INVESTMENT_CAP_RATE: Decimal = dec!(0.25);
const INVESTMENT_CAP_ABSOLUTE: Decimal = dec!(1500000);
const DONATION_CAP_RATE: Decimal = dec!(0.10);

// Liability above this warrants quarterly advance payments
const ADVANCE_TAX_THRESHOLD: Decimal = dec!(5000);

/// Income by source
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IncomeSources {
    pub salary: Decimal,
    pub business: Decimal,
    pub rental: Decimal,
    pub other: Decimal,
}

impl IncomeSources {
    pub fn total(&self) -> Decimal {
        self.salary + self.business + self.rental + self.other
    }
}

/// Deductions as claimed, before any caps. All figures are expected to be
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Deductions {
    pub investment: Decimal,
    pub zakat: Decimal,
    pub donation: Decimal,
    pub other: Decimal,
}

/// Deductions after the statutory caps have been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllowedDeductions {
    pub investment: Decimal,
    pub zakat: Decimal,
    pub donation: Decimal,
    pub other: Decimal,
}

impl AllowedDeductions {
    pub fn total(&self) -> Decimal {
        self.investment + self.zakat + self.donation + self.other
    }
}

/// Apply the deduction caps. Caps are computed against the pre-deduction
/// total income, not taxable income. Zakat and other deductions pass
/// through uncapped.
pub fn allowable_deductions(
    total_income: Decimal,
    claimed: &Deductions,
) -> Result<AllowedDeductions, TaxError> {
    if total_income < Decimal::ZERO {
        return Err(TaxError::InvalidIncome(total_income));
    }
    let investment = claimed
        .investment
        .min(total_income * INVESTMENT_CAP_RATE)
        .min(INVESTMENT_CAP_ABSOLUTE);
    let donation = claimed.donation.min(total_income * DONATION_CAP_RATE);
    Ok(AllowedDeductions {
        investment,
        zakat: claimed.zakat,
        donation,
        other: claimed.other,
    })
}

/// Tax charged within a single slab
#[derive(Debug, Clone, PartialEq)]
pub struct SlabTax {
    pub label: &'static str,
    /// Income falling in this slab
    pub taxable_amount: Decimal,
    /// Marginal rate as a percentage
    pub rate: Decimal,
    /// Tax charged in this slab, unrounded
    pub tax: Decimal,
}

/// Income tax report
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeTaxReport {
    pub taxable_income: Decimal,
    /// Total liability, rounded to the nearest taka
    pub total_tax: Decimal,
    /// Total tax as an unrounded percentage of taxable income
    pub effective_rate: Decimal,
    /// Rate of the slab containing the top of the income
    pub marginal_rate: Decimal,
    pub slabs: Vec<SlabTax>,
}

impl IncomeTaxReport {
    /// Tax payable per month, rounded to the nearest taka
    pub fn monthly_tax(&self) -> Decimal {
        (self.total_tax / dec!(12))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Calculate income tax by walking the progressive slabs.
///
/// Each slab taxes the portion of income falling within it at its own
/// rate. Only the final total is rounded (to the nearest taka, half away
/// from zero); the per-slab figures and both rates are left unrounded.
pub fn calculate_income_tax(
    taxable_income: Decimal,
    category: TaxpayerCategory,
    year: AssessmentYear,
) -> Result<IncomeTaxReport, TaxError> {
    if taxable_income < Decimal::ZERO {
        return Err(TaxError::InvalidIncome(taxable_income));
    }
    let slabs = year
        .slabs(category)
        .ok_or(TaxError::UnknownSlabTable { year, category })?;

    let mut remaining = taxable_income;
    let mut exact_total = Decimal::ZERO;
    let mut rows = Vec::new();

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }
        let portion = match slab.span() {
            Some(span) => remaining.min(span),
            None => remaining,
        };
        if portion > Decimal::ZERO {
            let tax = portion * slab.rate / dec!(100);
            rows.push(SlabTax {
                label: slab.label,
                taxable_amount: portion,
                rate: slab.rate,
                tax,
            });
            exact_total += tax;
            remaining -= portion;
        }
        // The slab containing the top of the income has been processed
        if slab.upper.is_none_or(|upper| taxable_income <= upper) {
            break;
        }
    }

    let effective_rate = if taxable_income > Decimal::ZERO {
        exact_total / taxable_income * dec!(100)
    } else {
        Decimal::ZERO
    };

    Ok(IncomeTaxReport {
        taxable_income,
        total_tax: exact_total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        effective_rate,
        marginal_rate: marginal_rate(taxable_income, slabs),
        slabs: rows,
    })
}

/// Rate of the first slab whose upper bound covers the income
fn marginal_rate(taxable_income: Decimal, slabs: &[TaxSlab]) -> Decimal {
    slabs
        .iter()
        .find(|slab| slab.upper.is_none_or(|upper| taxable_income <= upper))
        .map(|slab| slab.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Priority of a saving tip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipPriority {
    High,
    Medium,
}

/// Saving opportunity derived from a computed return
#[derive(Debug, Clone, PartialEq)]
pub enum SavingTip {
    /// Unused investment allowance headroom
    InvestmentAllowance { headroom: Decimal, saving: Decimal },
    /// Unused donation allowance headroom
    DonationAllowance { headroom: Decimal, saving: Decimal },
    /// Liability is large enough that quarterly advance payments apply
    AdvanceInstalments,
}

impl SavingTip {
    pub fn priority(&self) -> TipPriority {
        match self {
            SavingTip::InvestmentAllowance { .. } => TipPriority::High,
            SavingTip::DonationAllowance { .. } | SavingTip::AdvanceInstalments => {
                TipPriority::Medium
            }
        }
    }
}

/// Saving opportunities for a computed return: remaining allowance headroom
/// valued at the marginal rate, plus an advance-payment note for larger
/// liabilities.
pub fn tax_saving_tips(
    total_income: Decimal,
    allowed: &AllowedDeductions,
    report: &IncomeTaxReport,
) -> Vec<SavingTip> {
    let mut tips = Vec::new();

    let investment_cap = (total_income * INVESTMENT_CAP_RATE).min(INVESTMENT_CAP_ABSOLUTE);
    let headroom = investment_cap - allowed.investment;
    if headroom > Decimal::ZERO {
        tips.push(SavingTip::InvestmentAllowance {
            headroom,
            saving: headroom * report.marginal_rate / dec!(100),
        });
    }

    let headroom = total_income * DONATION_CAP_RATE - allowed.donation;
    if headroom > Decimal::ZERO {
        tips.push(SavingTip::DonationAllowance {
            headroom,
            saving: headroom * report.marginal_rate / dec!(100),
        });
    }

    if report.total_tax > ADVANCE_TAX_THRESHOLD {
        tips.push(SavingTip::AdvanceInstalments);
    }

    tips
}
