//! Personal income tax (PAYE) calculation under the 2025 Nigerian bands.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annual gross and annual rent (monthly figures × 12) |
//! | 2    | Rent relief: 20% of annual rent, capped at ₦500,000 |
//! | 3    | Pension deduction: 8% of annual gross, if contributing |
//! | 4    | Chargeable income: Line 1 - Line 2 - Line 3 (minimum 0) |
//! | 5    | Annual tax: chargeable income run through [`TAX_BANDS`] in order |
//! | 6    | Monthly tax: Line 5 ÷ 12 |
//! | 7    | Effective rate: Line 5 ÷ Line 1 × 100 (0 when Line 1 is 0) |
//!
//! The calculation never fails. Negative amounts are clamped to zero and
//! arithmetic that would leave the `Decimal` range saturates.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::calculate_tax;
//!
//! // ₦500,000 a month, no rent, contributing to a pension.
//! let result = calculate_tax(dec!(500000), dec!(0), true, true);
//!
//! assert_eq!(result.annual_gross, dec!(6000000));
//! assert_eq!(result.pension_deduction, dec!(480000));
//! assert_eq!(result.chargeable_income, dec!(5520000));
//! assert_eq!(result.total_annual_tax, dec!(783600));
//! assert_eq!(result.total_monthly_tax, dec!(65300));
//! assert_eq!(result.effective_rate, dec!(13.06));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::{non_negative, percent_of};
use crate::models::{BandTax, MONTHS_PER_YEAR, PayPeriod, TAX_BANDS, TaxBand, TaxInput, TaxResult};

/// Share of annual rent allowed as relief (20%).
pub const RENT_RELIEF_RATE: Decimal = dec!(0.20);

/// Ceiling on rent relief.
pub const RENT_RELIEF_CAP: Decimal = dec!(500000);

/// Share of annual gross deducted as pension contribution (8%).
pub const PENSION_RATE: Decimal = dec!(0.08);

/// Computes PAYE for one filer using the statutory [`TAX_BANDS`].
///
/// `gross` and `rent` are monthly figures when `is_monthly` is set, annual
/// otherwise.
pub fn calculate_tax(
    gross: Decimal,
    rent: Decimal,
    is_monthly: bool,
    has_pension: bool,
) -> TaxResult {
    let input = TaxInput::new(
        gross,
        rent,
        PayPeriod::from_monthly_flag(is_monthly),
        has_pension,
    );
    PayeCalculator::default().calculate(&input)
}

/// Calculator for personal income tax over a band table.
///
/// Holds a borrowed band table so it can be shared freely between threads.
#[derive(Debug, Clone, Copy)]
pub struct PayeCalculator<'a> {
    bands: &'a [TaxBand],
}

impl Default for PayeCalculator<'static> {
    fn default() -> Self {
        Self::new(&TAX_BANDS)
    }
}

impl<'a> PayeCalculator<'a> {
    /// Creates a calculator over `bands`, which must be ordered lowest first.
    /// Income left over after a table with no unbounded band is untaxed.
    pub fn new(bands: &'a [TaxBand]) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &'a [TaxBand] {
        self.bands
    }

    /// Runs the full calculation.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> TaxResult {
        let annual_gross = input.period.annualize(non_negative(input.gross));
        let annual_rent = input.period.annualize(non_negative(input.rent));

        let rent_relief = self.rent_relief(annual_rent);
        let pension_deduction = self.pension_deduction(annual_gross, input.has_pension);
        let chargeable_income =
            self.chargeable_income(annual_gross, rent_relief, pension_deduction);

        let bands = self.apply_bands(chargeable_income);
        let total_annual_tax = bands
            .iter()
            .fold(Decimal::ZERO, |total, band| total.saturating_add(band.tax));
        let total_monthly_tax = total_annual_tax / Decimal::from(MONTHS_PER_YEAR);
        let effective_rate = percent_of(total_annual_tax, annual_gross);

        debug!(
            %annual_gross,
            %chargeable_income,
            %total_annual_tax,
            %effective_rate,
            bands_used = bands.len(),
            "computed PAYE"
        );

        TaxResult {
            annual_gross: annual_gross.normalize(),
            rent_relief: rent_relief.normalize(),
            pension_deduction: pension_deduction.normalize(),
            chargeable_income: chargeable_income.normalize(),
            total_annual_tax: total_annual_tax.normalize(),
            total_monthly_tax: total_monthly_tax.normalize(),
            effective_rate: effective_rate.normalize(),
            bands,
        }
    }

    /// Rent relief: 20% of annual rent, never more than the cap.
    fn rent_relief(
        &self,
        annual_rent: Decimal,
    ) -> Decimal {
        annual_rent
            .saturating_mul(RENT_RELIEF_RATE)
            .min(RENT_RELIEF_CAP)
    }

    fn pension_deduction(
        &self,
        annual_gross: Decimal,
        has_pension: bool,
    ) -> Decimal {
        if has_pension {
            annual_gross.saturating_mul(PENSION_RATE)
        } else {
            Decimal::ZERO
        }
    }

    fn chargeable_income(
        &self,
        annual_gross: Decimal,
        rent_relief: Decimal,
        pension_deduction: Decimal,
    ) -> Decimal {
        non_negative(
            annual_gross
                .saturating_sub(rent_relief)
                .saturating_sub(pension_deduction),
        )
    }

    /// Allocates chargeable income to bands in order, stopping once nothing
    /// is left to allocate.
    fn apply_bands(
        &self,
        chargeable_income: Decimal,
    ) -> Vec<BandTax> {
        let mut remaining = chargeable_income;
        let mut lower = Decimal::ZERO;

        self.bands
            .iter()
            .map_while(|band| {
                if remaining <= Decimal::ZERO {
                    return None;
                }
                let taxed = band.absorb(remaining);
                remaining -= taxed;

                let upper = band.width.map(|width| lower.saturating_add(width));
                let line = BandTax {
                    lower: lower.normalize(),
                    upper: upper.map(|u| u.normalize()),
                    rate: band.rate.normalize(),
                    taxed: taxed.normalize(),
                    tax: (taxed * band.rate).normalize(),
                };
                lower = upper.unwrap_or(Decimal::MAX);
                Some(line)
            })
            .collect()
    }
}
