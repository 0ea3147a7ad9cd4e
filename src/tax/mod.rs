use rust_decimal::Decimal;

pub mod bd;
pub mod income;
pub mod vat;

pub use bd::{AssessmentYear, TaxpayerCategory};
pub use income::{allowable_deductions, calculate_income_tax, IncomeTaxReport};
pub use vat::{calculate_vat, VatDirection, VatReport};

/// Errors from the tax engines
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid amount: must be greater than zero, got {0}")]
    InvalidAmount(Decimal),
    #[error("invalid rate: must not be negative, got {0}")]
    InvalidRate(Decimal),
    #[error("invalid income: must not be negative, got {0}")]
    InvalidIncome(Decimal),
    #[error("no tax slabs configured for category '{category}' in {year}")]
    UnknownSlabTable {
        year: AssessmentYear,
        category: TaxpayerCategory,
    },
}
