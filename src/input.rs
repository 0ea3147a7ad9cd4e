use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::tax::income::{Deductions, IncomeSources};

/// Tax return JSON input format
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReturnInput {
    /// Assessment year in "2024-25" form, the latest configured year when omitted
    #[serde(default)]
    pub assessment_year: Option<String>,
    /// Taxpayer category: individual, female or senior
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub income: IncomeRecord,
    #[serde(default)]
    pub deductions: DeductionRecord,
}

/// Annual income figures by source
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct IncomeRecord {
    /// Salary income
    #[serde(default)]
    #[schemars(with = "f64")]
    pub salary: Decimal,
    /// Business income
    #[serde(default)]
    #[schemars(with = "f64")]
    pub business: Decimal,
    /// Rental income
    #[serde(default)]
    #[schemars(with = "f64")]
    pub rental: Decimal,
    /// Any other income
    #[serde(default)]
    #[schemars(with = "f64")]
    pub other: Decimal,
}

/// Claimed deduction figures, before caps
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct DeductionRecord {
    /// Investment in approved instruments (capped at 25% of income, ৳15,00,000)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub investment: Decimal,
    /// Zakat paid
    #[serde(default)]
    #[schemars(with = "f64")]
    pub zakat: Decimal,
    /// Charitable donations (capped at 10% of income)
    #[serde(default)]
    #[schemars(with = "f64")]
    pub donation: Decimal,
    /// Any other allowable deduction
    #[serde(default)]
    #[schemars(with = "f64")]
    pub other: Decimal,
}

impl From<IncomeRecord> for IncomeSources {
    fn from(record: IncomeRecord) -> Self {
        IncomeSources {
            salary: record.salary,
            business: record.business,
            rental: record.rental,
            other: record.other,
        }
    }
}

impl From<DeductionRecord> for Deductions {
    fn from(record: DeductionRecord) -> Self {
        Deductions {
            investment: record.investment,
            zakat: record.zakat,
            donation: record.donation,
            other: record.other,
        }
    }
}

/// CSV record format for bulk VAT calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulkRow {
    pub amount: Decimal,
    /// Standard rate applies when the column or cell is empty
    #[serde(default)]
    pub rate: Option<Decimal>,
}

/// Read a tax return from JSON
pub fn read_return_json<R: Read>(reader: R) -> anyhow::Result<ReturnInput> {
    let input: ReturnInput = serde_json::from_reader(reader)?;
    Ok(input)
}

/// Read bulk VAT rows from CSV
pub fn read_bulk_csv<R: Read>(reader: R) -> anyhow::Result<Vec<BulkRow>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let rows: Result<Vec<BulkRow>, _> = rdr.deserialize::<BulkRow>().collect();
    Ok(rows?)
}
