//! Runs batch requests through the calculator and writes results as CSV.
//!
//! Money columns are rounded to kobo (two decimal places, half-up) and the
//! effective rate to two decimal places.

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::calculations::common::round_half_up;
use tax_core::{FilerStatus, PayPeriod, PayeCalculator};
use thiserror::Error;
use tracing::debug;

use crate::loader::BatchRequest;

#[derive(Debug, Error)]
pub enum BatchWriteError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One output line: the request echoed back alongside its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResultRow {
    pub row: usize,
    pub label: Option<String>,
    pub status: FilerStatus,
    pub period: PayPeriod,
    pub gross: Decimal,
    pub rent: Decimal,
    pub pension: bool,
    pub annual_gross: Decimal,
    pub rent_relief: Decimal,
    pub pension_deduction: Decimal,
    pub chargeable_income: Decimal,
    pub total_annual_tax: Decimal,
    pub total_monthly_tax: Decimal,
    pub net_monthly_pay: Decimal,
    pub effective_rate: Decimal,
}

fn to_kobo(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded
}

/// Calculates every request in order.
pub fn evaluate(
    calculator: &PayeCalculator<'_>,
    requests: &[BatchRequest],
) -> Vec<BatchResultRow> {
    requests
        .iter()
        .map(|request| {
            let result = calculator.calculate(&request.input);
            debug!(row = request.row, total_annual_tax = %result.total_annual_tax, "evaluated batch row");

            BatchResultRow {
                row: request.row,
                label: request.label.clone(),
                status: request.status,
                period: request.input.period,
                gross: request.input.gross,
                rent: request.input.rent,
                pension: request.input.has_pension,
                annual_gross: to_kobo(result.annual_gross),
                rent_relief: to_kobo(result.rent_relief),
                pension_deduction: to_kobo(result.pension_deduction),
                chargeable_income: to_kobo(result.chargeable_income),
                total_annual_tax: to_kobo(result.total_annual_tax),
                total_monthly_tax: to_kobo(result.total_monthly_tax),
                net_monthly_pay: to_kobo(result.net_monthly_pay()),
                effective_rate: to_kobo(result.effective_rate),
            }
        })
        .collect()
}

/// Writes result rows, with a header line, to `writer`.
pub fn write_results<W: Write>(
    writer: W,
    rows: &[BatchResultRow],
) -> Result<(), BatchWriteError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Sum of annual tax across all rows.
pub fn total_tax(rows: &[BatchResultRow]) -> Decimal {
    rows.iter()
        .fold(Decimal::ZERO, |total, row| total.saturating_add(row.total_annual_tax))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::loader::load_from_str;

    const CSV: &str = "\
label,gross,rent,period,status,pension
Ada,500000,,monthly,salary,
Tunde,1000000,200000,annual,freelance,no
";

    fn rows() -> Vec<BatchResultRow> {
        let requests = load_from_str(CSV).unwrap();
        evaluate(&PayeCalculator::default(), &requests)
    }

    #[test]
    fn evaluate_computes_each_row() {
        let rows = rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].total_annual_tax, dec!(783600));
        assert_eq!(rows[0].total_monthly_tax, dec!(65300));
        assert_eq!(rows[0].net_monthly_pay, dec!(434700));
        assert_eq!(rows[0].effective_rate, dec!(13.06));
        assert_eq!(rows[1].rent_relief, dec!(40000));
        assert_eq!(rows[1].total_annual_tax, dec!(24000));
        assert_eq!(rows[1].effective_rate, dec!(2.4));
    }

    #[test]
    fn money_columns_have_two_decimal_places() {
        let rows = rows();

        assert_eq!(rows[0].total_annual_tax.to_string(), "783600.00");
        assert_eq!(rows[1].effective_rate.to_string(), "2.40");
    }

    #[test]
    fn repeating_monthly_tax_is_rounded_half_up() {
        // 1,000,010 annual: tax 30,001.50, monthly 2,500.125
        let requests = load_from_str("gross,period,status,pension\n1000010,annual,freelance,no\n").unwrap();
        let rows = evaluate(&PayeCalculator::default(), &requests);

        assert_eq!(rows[0].total_annual_tax.to_string(), "30001.50");
        assert_eq!(rows[0].total_monthly_tax.to_string(), "2500.13");
    }

    #[test]
    fn write_results_emits_header_and_rows() {
        let mut out = Vec::new();
        write_results(&mut out, &rows()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some(
                "row,label,status,period,gross,rent,pension,annual_gross,rent_relief,\
pension_deduction,chargeable_income,total_annual_tax,total_monthly_tax,net_monthly_pay,effective_rate"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "1,Ada,salary,monthly,500000,0,true,6000000.00,0.00,480000.00,5520000.00,\
783600.00,65300.00,434700.00,13.06"
            )
        );
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn total_tax_sums_rows() {
        assert_eq!(total_tax(&rows()), dec!(807600));
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let mut out = Vec::new();
        write_results(&mut out, &[]).unwrap();

        assert!(out.is_empty());
    }
}
