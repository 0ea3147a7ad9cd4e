//! Schema command - print expected input formats

use crate::input::ReturnInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the tax return input
    JsonSchema,
    /// Bulk VAT CSV header row with column names
    CsvHeader,
    /// Bulk VAT CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ReturnInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Bulk VAT CSV Input Format");
        println!("=========================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", name, req, description);
        }
        println!();
        println!("Amounts are treated as VAT-exclusive");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &["amount", "rate"];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("amount", true, "VAT-exclusive amount in taka"),
    (
        "rate",
        false,
        "VAT rate percentage (defaults to the standard 15)",
    ),
];
