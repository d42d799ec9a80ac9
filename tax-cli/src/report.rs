//! Rendering of calculation results for the terminal.

use std::fmt::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use tax_core::{
    BandTax, FilerStatus, TAX_BANDS, TaxBand, TaxInput, TaxResult, format_naira, format_rate,
    tax_free_allowance,
};

const LABEL_WIDTH: usize = 24;

/// Everything printed for a single calculation.
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub status: FilerStatus,
    pub input: &'a TaxInput,
    pub result: &'a TaxResult,
    pub net_monthly_pay: Decimal,
    pub net_annual_pay: Decimal,
}

impl<'a> Report<'a> {
    pub fn new(
        status: FilerStatus,
        input: &'a TaxInput,
        result: &'a TaxResult,
    ) -> Self {
        Self {
            status,
            input,
            result,
            net_monthly_pay: result.net_monthly_pay().normalize(),
            net_annual_pay: result.net_annual_pay().normalize(),
        }
    }

    /// Human-readable summary; the band table is appended when `breakdown`
    /// is set.
    pub fn to_text(
        &self,
        breakdown: bool,
    ) -> String {
        let r = self.result;
        let mut out = String::new();

        push_line(&mut out, "Total Annual Tax", &format_naira(r.total_annual_tax));
        push_line(&mut out, "Effective Rate", &format_rate(r.effective_rate));
        out.push('\n');
        push_line(&mut out, "Monthly Tax Deduction", &format_naira(r.total_monthly_tax));
        push_line(&mut out, "Net Monthly Pay", &format_naira(self.net_monthly_pay));
        out.push('\n');
        out.push_str("Analysis\n");
        out.push_str(&analysis(r));
        out.push('\n');

        if breakdown {
            out.push('\n');
            out.push_str(&band_breakdown(&r.bands));
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn push_line(
    out: &mut String,
    label: &str,
    value: &str,
) {
    let _ = writeln!(out, "{label:<width$}{value}", width = LABEL_WIDTH);
}

/// The plain-language explanation of how the figure was reached.
pub fn analysis(result: &TaxResult) -> String {
    let mut text = format!(
        "Based on a gross income of {}, we deducted {} for rent relief",
        format_naira(result.annual_gross),
        format_naira(result.rent_relief),
    );
    if result.pension_deduction > Decimal::ZERO {
        let _ = write!(
            text,
            " and {} for pension",
            format_naira(result.pension_deduction)
        );
    }
    let _ = write!(
        text,
        ". Your first {} was tax-free. The remaining {} was taxed progressively.",
        format_naira(tax_free_allowance(&TAX_BANDS)),
        format_naira(result.chargeable_income),
    );
    text
}

fn band_range(
    lower: Decimal,
    upper: Option<Decimal>,
) -> String {
    match upper {
        Some(upper) => format!("{} - {}", format_naira(lower), format_naira(upper)),
        None => format!("above {}", format_naira(lower)),
    }
}

#[derive(Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxed")]
    taxed: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

#[derive(Tabled)]
struct StatutoryBandRow {
    #[tabled(rename = "Chargeable income")]
    range: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

fn render<R: Tabled>(rows: &[R]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    // Everything after the range column is a figure
    table.modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Table of the bands that received income.
pub fn band_breakdown(bands: &[BandTax]) -> String {
    let rows: Vec<BandRow> = bands
        .iter()
        .map(|band| BandRow {
            range: band_range(band.lower, band.upper),
            rate: format_rate(band.rate * Decimal::ONE_HUNDRED),
            taxed: format_naira(band.taxed),
            tax: format_naira(band.tax),
        })
        .collect();
    render(&rows)
}

/// Table of the statutory bands themselves.
pub fn band_table(bands: &[TaxBand]) -> String {
    let mut lower = Decimal::ZERO;
    let rows: Vec<StatutoryBandRow> = bands
        .iter()
        .map(|band| {
            let upper = band.width.map(|width| lower + width);
            let row = StatutoryBandRow {
                range: band_range(lower, upper),
                rate: format_rate(band.rate * Decimal::ONE_HUNDRED),
            };
            lower = upper.unwrap_or(lower);
            row
        })
        .collect();
    render(&rows)
}
