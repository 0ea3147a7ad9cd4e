//! E2E tests for the vat, income, slabs, bulk and schema commands

use std::process::Command;

/// Test VAT calculation on an exclusive amount
#[test]
fn vat_exclusive() {
    let output = Command::new("cargo")
        .args(["run", "--", "vat", "1000"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    // Verify the command succeeded
    assert!(output.status.success(), "Command failed: {:?}", output);

    // Verify the calculation steps are shown
    assert!(stdout.contains("VAT CALCULATION (exclusive @ 15%)"));
    assert!(stdout.contains("VAT amount: ৳1,000 × 15% = ৳150"));
    assert!(stdout.contains("Total amount: ৳1,000 + ৳150 = ৳1,150"));
}

/// Test extracting the base from a VAT-inclusive amount
#[test]
fn vat_inclusive_extracts_base() {
    let output = Command::new("cargo")
        .args(["run", "--", "vat", "1150", "--inclusive"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("VAT CALCULATION (inclusive @ 15%)"));
    assert!(stdout.contains("Base amount: ৳1,150 ÷ (1 + 15/100) = ৳1,000"));
    assert!(stdout.contains("VAT amount: ৳1,150 - ৳1,000 = ৳150"));
}

/// Test VAT JSON output with a reduced rate
#[test]
fn vat_json_output() {
    let output = Command::new("cargo")
        .args(["run", "--", "vat", "200", "-r", "7.5", "--json"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"direction\": \"exclusive\""));
    assert!(stdout.contains("\"rate\": \"7.5\""));
    assert!(stdout.contains("\"vat_amount\": \"15.00\""));
    assert!(stdout.contains("\"total_amount\": \"215.00\""));
}

/// Test that a zero amount is rejected
#[test]
fn vat_rejects_zero_amount() {
    let output = Command::new("cargo")
        .args(["run", "--", "vat", "0"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("invalid amount"));
}

/// Test income tax calculation from flags
#[test]
fn income_from_flags() {
    let output = Command::new("cargo")
        .args(["run", "--", "income", "--salary", "500000", "--year", "2025"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("INCOME TAX RETURN (2024-25, Individual)"));
    assert!(stdout.contains("Salary: ৳5,00,000"));
    assert!(stdout.contains("TAXABLE INCOME: ৳5,00,000"));
    assert!(stdout.contains("Tax Free"));
    assert!(stdout.contains("5% on next ৳1,00,000"));
    assert!(stdout.contains("TOTAL TAX: ৳10,000"));
    assert!(stdout.contains("Monthly: ৳833 | Effective rate: 2.00% | Marginal rate: 10%"));
}

/// Test income tax calculation without an explicit year
#[test]
fn income_defaults_to_configured_year() {
    let output = Command::new("cargo")
        .args(["run", "--", "income", "--salary", "500000"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("INCOME TAX RETURN ("));
    assert!(stdout.contains("TOTAL TAX:"));
}

/// Test JSON input format for the income command
#[test]
fn income_json_input() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "income",
            "-f",
            "tests/data/return_basic.json",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // Verify JSON structure
    assert!(stdout.contains("\"assessment_year\": \"2024-25\""));
    assert!(stdout.contains("\"taxable_income\": \"500000.00\""));
    assert!(stdout.contains("\"total_tax\": \"10000.00\""));
    assert!(stdout.contains("\"monthly_tax\": \"833.00\""));
    assert!(stdout.contains("\"effective_rate_pct\": \"2.00\""));
    assert!(stdout.contains("\"marginal_rate_pct\": \"10\""));
}

/// Test that flags override figures from the input file
#[test]
fn income_flags_override_file() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "income",
            "-f",
            "tests/data/return_basic.json",
            "--salary",
            "600000",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // 600000 in 2024-25: 100000 at 5% plus 150000 at 10%
    assert!(stdout.contains("TOTAL TAX: ৳20,000"));
}

/// Test deduction caps and saving tips
#[test]
fn income_with_deductions_and_tips() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "income",
            "--salary",
            "1000000",
            "--investment",
            "100000",
            "--year",
            "2025",
            "--tips",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("TAXABLE INCOME: ৳9,00,000"));
    assert!(stdout.contains("TOTAL TAX: ৳57,500"));
    assert!(stdout.contains("TAX SAVING TIPS"));
    assert!(stdout.contains("[HIGH] Invest ৳1,50,000 more in approved instruments"));
    assert!(stdout.contains("[MEDIUM] Donate up to ৳1,00,000 more"));
    assert!(stdout.contains("quarterly instalments"));
}

/// Test that an unconfigured year fails rather than falling back
#[test]
fn income_unknown_year_fails() {
    let output = Command::new("cargo")
        .args(["run", "--", "income", "--salary", "500000", "--year", "2020"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no tax slabs configured"));
}

/// Test that negative figures are rejected
#[test]
fn income_rejects_negative_figures() {
    let output = Command::new("cargo")
        .args(["run", "--", "income", "--salary=-100"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("salary must not be negative"));
}

/// Test the female category thresholds
#[test]
fn income_female_category() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "income",
            "--salary",
            "500000",
            "--year",
            "2025",
            "--category",
            "female",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("INCOME TAX RETURN (2024-25, Female)"));
    assert!(stdout.contains("TOTAL TAX: ৳5,000"));
}

/// Test the slabs table output
#[test]
fn slabs_table() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "slabs",
            "--year",
            "2025",
            "--category",
            "senior",
        ])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("TAX SLABS (2024-25, Senior Citizen)"));
    assert!(stdout.contains("৳0 - ৳4,50,000"));
    assert!(stdout.contains("25% on remaining amount"));
}

/// Test bulk VAT table output and totals
#[test]
fn bulk_table() {
    let output = Command::new("cargo")
        .args(["run", "--", "bulk", "tests/data/bulk.csv"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("BULK VAT (3 rows)"));
    assert!(stdout.contains("7.5%"));
    assert!(stdout.contains("TOTAL: ৳3,500 + ৳325 VAT = ৳3,825"));
}

/// Test bulk VAT CSV output
#[test]
fn bulk_csv_output() {
    let output = Command::new("cargo")
        .args(["run", "--", "bulk", "tests/data/bulk.csv", "--csv"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    // Verify CSV header and rows
    assert!(stdout.contains("amount,rate,vat,total"));
    assert!(stdout.contains("1000,15,150,1150"));
    assert!(stdout.contains("2000,7.5,150,2150"));
    assert!(stdout.contains("500,5,25,525"));
}

/// Test that rows without a rate use the standard rate
#[test]
fn bulk_default_rate() {
    let output = Command::new("cargo")
        .args(["run", "--", "bulk", "tests/data/bulk_default_rate.csv"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("15%"));
    assert!(stdout.contains("৳1,150"));
}

/// Test the JSON schema output
#[test]
fn schema_json() {
    let output = Command::new("cargo")
        .args(["run", "--", "schema"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("\"assessment_year\""));
    assert!(stdout.contains("\"deductions\""));
    assert!(stdout.contains("\"investment\""));
}

/// Test the bulk CSV header output
#[test]
fn schema_csv_header() {
    let output = Command::new("cargo")
        .args(["run", "--", "schema", "csv-header"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.trim_end().ends_with("amount,rate"));
}
