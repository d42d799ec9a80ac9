use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MONTHS_PER_YEAR;

/// Tax owed on the slice of chargeable income that fell into one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTax {
    /// Chargeable income at which the band starts.
    pub lower: Decimal,
    /// Chargeable income at which the band ends, `None` for the top band.
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    /// Income taxed in this band.
    pub taxed: Decimal,
    /// `taxed * rate`.
    pub tax: Decimal,
}

/// Outcome of a PAYE calculation. All amounts are annual unless the field
/// name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub annual_gross: Decimal,
    pub rent_relief: Decimal,
    pub pension_deduction: Decimal,
    pub chargeable_income: Decimal,
    pub total_annual_tax: Decimal,
    pub total_monthly_tax: Decimal,
    /// Total tax as a percentage of gross income (`13.06` means 13.06%).
    pub effective_rate: Decimal,
    /// Bands that received income, lowest first.
    pub bands: Vec<BandTax>,
}

impl TaxResult {
    pub fn monthly_gross(&self) -> Decimal {
        self.annual_gross / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Gross monthly pay less the monthly tax deduction.
    pub fn net_monthly_pay(&self) -> Decimal {
        self.monthly_gross() - self.total_monthly_tax
    }

    pub fn net_annual_pay(&self) -> Decimal {
        self.annual_gross - self.total_annual_tax
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> TaxResult {
        TaxResult {
            annual_gross: dec!(6000000),
            rent_relief: dec!(0),
            pension_deduction: dec!(480000),
            chargeable_income: dec!(5520000),
            total_annual_tax: dec!(783600),
            total_monthly_tax: dec!(65300),
            effective_rate: dec!(13.06),
            bands: Vec::new(),
        }
    }

    #[test]
    fn net_monthly_pay_subtracts_monthly_tax() {
        assert_eq!(sample().net_monthly_pay(), dec!(434700));
    }

    #[test]
    fn net_annual_pay_subtracts_annual_tax() {
        assert_eq!(sample().net_annual_pay(), dec!(5216400));
    }
}
