use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::TaxError;

/// Standard VAT rate in Bangladesh, as a percentage
pub const STANDARD_RATE: Decimal = dec!(15);

/// Whether the supplied amount already contains VAT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VatDirection {
    /// Amount is the pre-tax base; VAT is added on top
    #[default]
    Exclusive,
    /// Amount is the tax-inclusive total; the base is backed out
    Inclusive,
}

impl std::fmt::Display for VatDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VatDirection::Exclusive => "exclusive",
            VatDirection::Inclusive => "inclusive",
        };
        write!(f, "{}", name)
    }
}

/// Result of a single VAT calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VatReport {
    pub direction: VatDirection,
    /// Rate as a percentage
    pub rate: Decimal,
    pub base_amount: Decimal,
    pub vat_amount: Decimal,
    pub total_amount: Decimal,
}

/// Convert between base and tax-inclusive amounts at a percentage rate.
///
/// Values are returned at full precision with no rounding, so
/// `base_amount + vat_amount == total_amount` holds exactly in both
/// directions and repeated conversions round-trip. Display rounding is
/// left to the caller.
pub fn calculate_vat(
    amount: Decimal,
    rate: Decimal,
    direction: VatDirection,
) -> Result<VatReport, TaxError> {
    if amount <= Decimal::ZERO {
        return Err(TaxError::InvalidAmount(amount));
    }
    if rate < Decimal::ZERO {
        return Err(TaxError::InvalidRate(rate));
    }

    let report = match direction {
        VatDirection::Exclusive => {
            let vat_amount = amount * rate / dec!(100);
            VatReport {
                direction,
                rate,
                base_amount: amount,
                vat_amount,
                total_amount: amount + vat_amount,
            }
        }
        VatDirection::Inclusive => {
            let base_amount = amount / (Decimal::ONE + rate / dec!(100));
            VatReport {
                direction,
                rate,
                base_amount,
                vat_amount: amount - base_amount,
                total_amount: amount,
            }
        }
    };
    Ok(report)
}
