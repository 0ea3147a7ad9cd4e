use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Taxpayer category selecting the slab table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaxpayerCategory {
    #[default]
    Individual,
    Female,
    Senior,
}

impl TaxpayerCategory {
    pub fn from_str(s: &str) -> Option<TaxpayerCategory> {
        match s.to_lowercase().as_str() {
            "individual" => Some(TaxpayerCategory::Individual),
            "female" => Some(TaxpayerCategory::Female),
            "senior" => Some(TaxpayerCategory::Senior),
            _ => None,
        }
    }

    /// Human-readable label for report headers
    pub fn label(&self) -> &'static str {
        match self {
            TaxpayerCategory::Individual => "Individual",
            TaxpayerCategory::Female => "Female",
            TaxpayerCategory::Senior => "Senior Citizen",
        }
    }
}

impl std::fmt::Display for TaxpayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TaxpayerCategory::Individual => "individual",
            TaxpayerCategory::Female => "female",
            TaxpayerCategory::Senior => "senior",
        };
        write!(f, "{}", name)
    }
}

/// Bangladesh assessment year (fiscal year runs 1 July to 30 June)
/// The year value represents the end year (e.g., 2025 = assessment year 2024-25)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssessmentYear(pub i32);

impl AssessmentYear {
    /// Create an assessment year from a date
    pub fn from_date(date: NaiveDate) -> Self {
        // Fiscal year starts 1 July
        // July onwards belongs to the year ending next June
        if date.month() >= 7 {
            AssessmentYear(date.year() + 1)
        } else {
            AssessmentYear(date.year())
        }
    }

    /// Assessment year containing today's date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// Most recent assessment year with slab data configured
    pub fn latest() -> Self {
        AssessmentYear(2025)
    }

    /// Parse the "2024-25" form used in input files (also accepts "2024-2025")
    pub fn parse(s: &str) -> Option<AssessmentYear> {
        let (start, end) = s.split_once('-')?;
        let start: i32 = start.parse().ok()?;
        let end: i32 = end.parse().ok()?;
        if end == start + 1 || end == (start + 1).rem_euclid(100) {
            Some(AssessmentYear(start + 1))
        } else {
            None
        }
    }

    /// Start date of the fiscal year (1 July of previous year)
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0 - 1, 7, 1).unwrap()
    }

    /// End date of the fiscal year (30 June)
    pub fn end_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.0, 6, 30).unwrap()
    }

    /// Display as "2024-25" format
    pub fn display(&self) -> String {
        format!("{}-{:02}", self.0 - 1, self.0 % 100)
    }

    /// Tax slabs for a taxpayer category in this assessment year.
    /// Returns `None` when no table is configured for the year.
    pub fn slabs(&self, category: TaxpayerCategory) -> Option<&'static [TaxSlab]> {
        match self.0 {
            // 2024-25
            2025 => Some(match category {
                TaxpayerCategory::Individual => &SLABS_2025_INDIVIDUAL,
                TaxpayerCategory::Female => &SLABS_2025_FEMALE,
                TaxpayerCategory::Senior => &SLABS_2025_SENIOR,
            }),
            // 2023-24
            2024 => Some(match category {
                TaxpayerCategory::Individual => &SLABS_2024_INDIVIDUAL,
                TaxpayerCategory::Female => &SLABS_2024_FEMALE,
                TaxpayerCategory::Senior => &SLABS_2024_SENIOR,
            }),
            _ => None,
        }
    }

    /// Tax-free threshold (upper bound of the zero-rate slab)
    pub fn tax_free_threshold(&self, category: TaxpayerCategory) -> Option<Decimal> {
        self.slabs(category).and_then(|slabs| slabs.first()?.upper)
    }
}

impl std::fmt::Display for AssessmentYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A single progressive tax slab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSlab {
    pub lower: Decimal,
    /// Upper bound of the slab, `None` for the unbounded top slab
    pub upper: Option<Decimal>,
    /// Marginal rate as a percentage
    pub rate: Decimal,
    pub label: &'static str,
}

impl TaxSlab {
    /// Width of the slab, `None` when unbounded
    pub fn span(&self) -> Option<Decimal> {
        self.upper.map(|upper| upper - self.lower)
    }
}

// Slab widths above the tax-free threshold are identical across categories
// and years (1, 3, 4, 5 lakh, then unbounded), so the labels are shared.
const TAX_FREE: &str = "Tax Free";
const NEXT_1L: &str = "5% on next ৳1,00,000";
const NEXT_3L: &str = "10% on next ৳3,00,000";
const NEXT_4L: &str = "15% on next ৳4,00,000";
const NEXT_5L: &str = "20% on next ৳5,00,000";
const REMAINDER: &str = "25% on remaining amount";

static SLABS_2025_INDIVIDUAL: [TaxSlab; 6] = [
    TaxSlab { lower: dec!(0), upper: Some(dec!(350000)), rate: dec!(0), label: TAX_FREE },
    TaxSlab { lower: dec!(350000), upper: Some(dec!(450000)), rate: dec!(5), label: NEXT_1L },
    TaxSlab { lower: dec!(450000), upper: Some(dec!(750000)), rate: dec!(10), label: NEXT_3L },
    TaxSlab { lower: dec!(750000), upper: Some(dec!(1150000)), rate: dec!(15), label: NEXT_4L },
    TaxSlab { lower: dec!(1150000), upper: Some(dec!(1650000)), rate: dec!(20), label: NEXT_5L },
    TaxSlab { lower: dec!(1650000), upper: None, rate: dec!(25), label: REMAINDER },
];

static SLABS_2025_FEMALE: [TaxSlab; 6] = [
    TaxSlab { lower: dec!(0), upper: Some(dec!(400000)), rate: dec!(0), label: TAX_FREE },
    TaxSlab { lower: dec!(400000), upper: Some(dec!(500000)), rate: dec!(5), label: NEXT_1L },
    TaxSlab { lower: dec!(500000), upper: Some(dec!(800000)), rate: dec!(10), label: NEXT_3L },
    TaxSlab { lower: dec!(800000), upper: Some(dec!(1200000)), rate: dec!(15), label: NEXT_4L },
    TaxSlab { lower: dec!(1200000), upper: Some(dec!(1700000)), rate: dec!(20), label: NEXT_5L },
    TaxSlab { lower: dec!(1700000), upper: None, rate: dec!(25), label: REMAINDER },
];

static SLABS_2025_SENIOR: [TaxSlab; 6] = [
    TaxSlab { lower: dec!(0), upper: Some(dec!(450000)), rate: dec!(0), label: TAX_FREE },
    TaxSlab { lower: dec!(450000), upper: Some(dec!(550000)), rate: dec!(5), label: NEXT_1L },
    TaxSlab { lower: dec!(550000), upper: Some(dec!(850000)), rate: dec!(10), label: NEXT_3L },
    TaxSlab { lower: dec!(850000), upper: Some(dec!(1250000)), rate: dec!(15), label: NEXT_4L },
    TaxSlab { lower: dec!(1250000), upper: Some(dec!(1750000)), rate: dec!(20), label: NEXT_5L },
    TaxSlab { lower: dec!(1750000), upper: None, rate: dec!(25), label: REMAINDER },
];

static SLABS_2024_INDIVIDUAL: [TaxSlab; 6] = [
    TaxSlab { lower: dec!(0), upper: Some(dec!(300000)), rate: dec!(0), label: TAX_FREE },
    TaxSlab { lower: dec!(300000), upper: Some(dec!(400000)), rate: dec!(5), label: NEXT_1L },
    TaxSlab { lower: dec!(400000), upper: Some(dec!(700000)), rate: dec!(10), label: NEXT_3L },
    TaxSlab { lower: dec!(700000), upper: Some(dec!(1100000)), rate: dec!(15), label: NEXT_4L },
    TaxSlab { lower: dec!(1100000), upper: Some(dec!(1600000)), rate: dec!(20), label: NEXT_5L },
    TaxSlab { lower: dec!(1600000), upper: None, rate: dec!(25), label: REMAINDER },
];

static SLABS_2024_FEMALE: [TaxSlab; 6] = [
    TaxSlab { lower: dec!(0), upper: Some(dec!(350000)), rate: dec!(0), label: TAX_FREE },
    TaxSlab { lower: dec!(350000), upper: Some(dec!(450000)), rate: dec!(5), label: NEXT_1L },
    TaxSlab { lower: dec!(450000), upper: Some(dec!(750000)), rate: dec!(10), label: NEXT_3L },
    TaxSlab { lower: dec!(750000), upper: Some(dec!(1150000)), rate: dec!(15), label: NEXT_4L },
    TaxSlab { lower: dec!(1150000), upper: Some(dec!(1650000)), rate: dec!(20), label: NEXT_5L },
    TaxSlab { lower: dec!(1650000), upper: None, rate: dec!(25), label: REMAINDER },
];

static SLABS_2024_SENIOR: [TaxSlab; 6] = [
    TaxSlab { lower: dec!(0), upper: Some(dec!(400000)), rate: dec!(0), label: TAX_FREE },
    TaxSlab { lower: dec!(400000), upper: Some(dec!(500000)), rate: dec!(5), label: NEXT_1L },
    TaxSlab { lower: dec!(500000), upper: Some(dec!(800000)), rate: dec!(10), label: NEXT_3L },
    TaxSlab { lower: dec!(800000), upper: Some(dec!(1200000)), rate: dec!(15), label: NEXT_4L },
    TaxSlab { lower: dec!(1200000), upper: Some(dec!(1700000)), rate: dec!(20), label: NEXT_5L },
    TaxSlab { lower: dec!(1700000), upper: None, rate: dec!(25), label: REMAINDER },
];
