use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A slice of chargeable income taxed at a single marginal rate.
///
/// `width` is how much income the band absorbs before the next band starts;
/// `None` marks the unbounded top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub const fn bounded(
        width: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            width: Some(width),
            rate,
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self { width: None, rate }
    }

    /// Portion of `remaining` income that falls into this band.
    pub fn absorb(
        &self,
        remaining: Decimal,
    ) -> Decimal {
        match self.width {
            Some(width) => remaining.min(width),
            None => remaining,
        }
    }
}

/// Personal income tax bands, applied to chargeable income in order.
pub const TAX_BANDS: [TaxBand; 6] = [
    TaxBand::bounded(dec!(800000), dec!(0)),
    TaxBand::bounded(dec!(2200000), dec!(0.15)),
    TaxBand::bounded(dec!(9000000), dec!(0.18)),
    TaxBand::bounded(dec!(13000000), dec!(0.21)),
    TaxBand::bounded(dec!(25000000), dec!(0.23)),
    TaxBand::unbounded(dec!(0.25)),
];

/// Income taxed at 0% before any liability arises.
pub fn tax_free_allowance(bands: &[TaxBand]) -> Decimal {
    bands
        .iter()
        .take_while(|band| band.rate.is_zero())
        .map_while(|band| band.width)
        .sum()
}

/// Highest marginal rate in the table.
pub fn top_rate(bands: &[TaxBand]) -> Decimal {
    bands
        .iter()
        .map(|band| band.rate)
        .max()
        .unwrap_or(Decimal::ZERO)
}
