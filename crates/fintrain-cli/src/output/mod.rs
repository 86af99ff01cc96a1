pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::str::FromStr;

/// Decimal places shown in human-readable formats. JSON and CSV keep full
/// precision.
const DISPLAY_DP: u32 = 2;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Decimals arrive as strings (serde-with-str); round those for display and
/// leave every other string untouched.
pub(crate) fn display_string(s: &str) -> String {
    match Decimal::from_str(s) {
        Ok(d) => d
            .round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        Err(_) => s.to_string(),
    }
}
