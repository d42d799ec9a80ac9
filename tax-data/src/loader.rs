//! CSV loader for batch PAYE calculation requests.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Whitespace
//! around values is trimmed.
//!
//! | Column    | Required | Notes |
//! |-----------|----------|-------|
//! | `label`   | no       | Free text carried through to the output |
//! | `gross`   | yes      | Gross income for the period; `₦1,200,000` style text is accepted |
//! | `rent`    | no       | Rent paid for the period; empty means 0 |
//! | `period`  | yes      | `monthly` or `annual` |
//! | `status`  | yes      | `salary` or `freelance` |
//! | `pension` | no       | `yes`/`no` (or `true`/`false`, `1`/`0`); empty means yes |
//!
//! Amounts are sanitized the same way as interactive entry: non-digits are
//! dropped and a cell with no digits is zero. Salaried rows always contribute
//! to a pension regardless of the `pension` column.
//!
//! ```csv
//! label,gross,rent,period,status,pension
//! Ada,500000,,monthly,salary,
//! Tunde,"1,000,000",200000,annual,freelance,no
//! ```

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tax_core::currency::parse_currency_input;
use tax_core::{FilerStatus, PayPeriod, TaxInput};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while loading batch requests.
#[derive(Debug, Error)]
pub enum BatchLoadError {
    /// The file could not be read.
    #[error("cannot read batch file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV is structurally invalid or a required column is missing.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A `status` cell is not a recognised filer status. `row` is 1-based,
    /// counting data rows only.
    #[error("unrecognised filer status '{value}' on row {row}")]
    InvalidStatus { value: String, row: usize },

    /// A `period` cell is not a recognised pay period.
    #[error("unrecognised pay period '{value}' on row {row}")]
    InvalidPeriod { value: String, row: usize },

    /// A `pension` cell is not a yes/no value.
    #[error("unrecognised pension election '{value}' on row {row}")]
    InvalidPension { value: String, row: usize },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    gross: String,
    rent: Option<String>,
    period: String,
    status: String,
    pension: Option<String>,
}

/// One parsed request, ready for calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// 1-based data row number.
    pub row: usize,
    pub label: Option<String>,
    pub status: FilerStatus,
    pub input: TaxInput,
}

fn parse_election(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchRequest, BatchLoadError> {
    let status = FilerStatus::parse(&row.status).ok_or_else(|| BatchLoadError::InvalidStatus {
        value: row.status.clone(),
        row: row_number,
    })?;
    let period = PayPeriod::parse(&row.period).ok_or_else(|| BatchLoadError::InvalidPeriod {
        value: row.period.clone(),
        row: row_number,
    })?;

    let pension_requested = match row.pension.as_deref() {
        None => true,
        Some(cell) => parse_election(cell).ok_or_else(|| BatchLoadError::InvalidPension {
            value: cell.to_string(),
            row: row_number,
        })?,
    };
    if !pension_requested && status.pension_mandatory() {
        warn!(row = row_number, "pension opt-out ignored for salaried filer");
    }

    let gross = parse_currency_input(&row.gross);
    let rent = row
        .rent
        .as_deref()
        .map(parse_currency_input)
        .unwrap_or_default();

    Ok(BatchRequest {
        row: row_number,
        label: row.label.filter(|l| !l.is_empty()),
        status,
        input: TaxInput::for_filer(status, gross, rent, period, pension_requested),
    })
}

/// Parses batch requests from any reader. Rows are returned in file order.
///
/// # Errors
///
/// * [`BatchLoadError::Parse`] if the CSV is malformed or lacks a required
///   column.
/// * [`BatchLoadError::InvalidStatus`], [`BatchLoadError::InvalidPeriod`] or
///   [`BatchLoadError::InvalidPension`] for the first row with an
///   unrecognised value.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<BatchRequest>, BatchLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Parses batch requests from CSV text.
pub fn load_from_str(input: &str) -> Result<Vec<BatchRequest>, BatchLoadError> {
    load_from_reader(input.as_bytes())
}

/// Reads a CSV file from disk and delegates to [`load_from_reader`].
pub fn load_from_file(path: &Path) -> Result<Vec<BatchRequest>, BatchLoadError> {
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
gross,period,status
500000,monthly,salary
";

    const FULL_CSV: &str = "\
label,gross,rent,period,status,pension
Ada,500000,,monthly,salary,
Tunde,\"1,000,000\",200000,annual,freelance,no
Chioma,\u{20a6}750000,50000,monthly,freelance,yes
";

    // -----------------------------------------------------------------------
    // Well-formed input
    // -----------------------------------------------------------------------

    #[test]
    fn minimal_csv_uses_defaults() {
        let requests = load_from_str(MINIMAL_CSV).expect("should parse minimal CSV");

        assert_eq!(requests.len(), 1);
        let r = &requests[0];
        assert_eq!(r.row, 1);
        assert_eq!(r.label, None);
        assert_eq!(r.status, FilerStatus::Salary);
        assert_eq!(r.input.gross, dec!(500000));
        assert_eq!(r.input.rent, Decimal::ZERO);
        assert_eq!(r.input.period, PayPeriod::Monthly);
        assert!(r.input.has_pension);
    }

    #[test]
    fn full_csv_rows_in_file_order() {
        let requests = load_from_str(FULL_CSV).expect("should parse full CSV");

        let labels: Vec<_> = requests.iter().map(|r| r.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("Ada"), Some("Tunde"), Some("Chioma")]);
    }

    #[test]
    fn amounts_are_sanitized() {
        let requests = load_from_str(FULL_CSV).unwrap();

        assert_eq!(requests[1].input.gross, dec!(1000000));
        assert_eq!(requests[2].input.gross, dec!(750000));
    }

    #[test]
    fn freelance_opt_out_is_honoured() {
        let requests = load_from_str(FULL_CSV).unwrap();

        assert!(!requests[1].input.has_pension);
        assert!(requests[2].input.has_pension);
    }

    #[test]
    fn salaried_opt_out_is_overridden() {
        let csv = "gross,period,status,pension\n300000,monthly,salary,no\n";
        let requests = load_from_str(csv).unwrap();

        assert!(requests[0].input.has_pension);
    }

    #[test]
    fn non_numeric_amount_becomes_zero() {
        let csv = "gross,rent,period,status\nunknown,n/a,annual,freelance\n";
        let requests = load_from_str(csv).unwrap();

        assert_eq!(requests[0].input.gross, Decimal::ZERO);
        assert_eq!(requests[0].input.rent, Decimal::ZERO);
    }

    #[test]
    fn column_order_does_not_matter() {
        let csv = "status,period,gross\nfreelance,annual,2000000\n";
        let requests = load_from_str(csv).unwrap();

        assert_eq!(requests[0].status, FilerStatus::Freelance);
        assert_eq!(requests[0].input.period, PayPeriod::Annual);
        assert_eq!(requests[0].input.gross, dec!(2000000));
    }

    #[test]
    fn whitespace_around_values_is_trimmed() {
        let csv = "gross , period , status\n 100000 , Monthly , Salary \n";
        let requests = load_from_str(csv).unwrap();

        assert_eq!(requests[0].input.gross, dec!(100000));
        assert_eq!(requests[0].input.period, PayPeriod::Monthly);
    }

    #[test]
    fn header_only_csv_is_empty() {
        let requests = load_from_str("gross,period,status\n").unwrap();

        assert!(requests.is_empty());
    }

    // -----------------------------------------------------------------------
    // Errors
    // -----------------------------------------------------------------------

    #[test]
    fn invalid_status_reports_row() {
        let csv = "gross,period,status\n1,monthly,salary\n2,monthly,retired\n";

        match load_from_str(csv).unwrap_err() {
            BatchLoadError::InvalidStatus { value, row } => {
                assert_eq!(value, "retired");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidStatus, got {:?}", other),
        }
    }

    #[test]
    fn invalid_period_reports_row() {
        let csv = "gross,period,status\n1,weekly,salary\n";

        match load_from_str(csv).unwrap_err() {
            BatchLoadError::InvalidPeriod { value, row } => {
                assert_eq!(value, "weekly");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidPeriod, got {:?}", other),
        }
    }

    #[test]
    fn invalid_pension_reports_row() {
        let csv = "gross,period,status,pension\n1,annual,freelance,maybe\n";

        match load_from_str(csv).unwrap_err() {
            BatchLoadError::InvalidPension { value, row } => {
                assert_eq!(value, "maybe");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidPension, got {:?}", other),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "gross,status\n1,salary\n";

        match load_from_str(csv).unwrap_err() {
            BatchLoadError::Parse(_) => {}
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn ragged_row_is_parse_error() {
        let csv = "gross,period,status\n1,monthly\n";

        assert!(matches!(load_from_str(csv), Err(BatchLoadError::Parse(_))));
    }
}
