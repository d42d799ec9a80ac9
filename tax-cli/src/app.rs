//! Glue between command-line input, the calculator and the renderers.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tax_core::currency::parse_currency_input;
use tax_core::{FilerStatus, PayPeriod, PayeCalculator, TaxInput};
use tracing::{debug, info, warn};

use crate::config::{AppConfig, OutputFormat};
use crate::report::{Report, band_table};

/// Raw form entry for one calculation, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcForm {
    pub gross: String,
    pub rent: String,
    pub period: PayPeriod,
    pub status: FilerStatus,
    /// The filer's own pension election; ignored for salaried filers.
    pub pension: bool,
}

impl Default for CalcForm {
    fn default() -> Self {
        Self {
            gross: String::new(),
            rent: String::new(),
            period: PayPeriod::Monthly,
            status: FilerStatus::Salary,
            pension: true,
        }
    }
}

impl CalcForm {
    /// A form for the given amounts, with period and status taken from
    /// `config`.
    pub fn from_config(
        gross: impl Into<String>,
        rent: impl Into<String>,
        pension: bool,
        config: &AppConfig,
    ) -> Self {
        Self {
            gross: gross.into(),
            rent: rent.into(),
            period: config.period,
            status: config.status,
            pension,
        }
    }

    /// Sanitizes the amounts and applies the pension rule.
    pub fn to_input(&self) -> TaxInput {
        if !self.pension && self.status.pension_mandatory() {
            warn!("pension is mandatory for salaried filers; opt-out ignored");
        }
        TaxInput::for_filer(
            self.status,
            parse_currency_input(&self.gross),
            parse_currency_input(&self.rent),
            self.period,
            self.pension,
        )
    }
}

/// Runs one calculation and renders it in the requested format.
pub fn run_calc(
    form: &CalcForm,
    format: OutputFormat,
    breakdown: bool,
) -> Result<String> {
    let input = form.to_input();
    let result = PayeCalculator::default().calculate(&input);
    debug!(
        status = %form.status,
        period = %input.period,
        total_annual_tax = %result.total_annual_tax,
        "calculated tax"
    );

    let report = Report::new(form.status, &input, &result);
    match format {
        OutputFormat::Text => Ok(report.to_text(breakdown)),
        OutputFormat::Json => report.to_json().context("failed to serialize report"),
    }
}

/// The statutory band table used by every calculation.
pub fn run_bands() -> String {
    band_table(PayeCalculator::default().bands())
}

/// Calculates every row of a batch CSV and writes the results to `out`.
/// Returns the number of rows processed.
pub fn run_batch<W: Write>(
    input: &Path,
    out: W,
) -> Result<usize> {
    let requests = tax_data::load_from_file(input)
        .with_context(|| format!("failed to load batch file: {}", input.display()))?;
    let rows = tax_data::evaluate(&PayeCalculator::default(), &requests);
    tax_data::write_results(out, &rows).context("failed to write batch results")?;

    info!(
        rows = rows.len(),
        total_annual_tax = %tax_data::total_tax(&rows),
        "batch complete"
    );
    Ok(rows.len())
}
