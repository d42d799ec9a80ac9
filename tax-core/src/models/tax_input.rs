use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::{FilerStatus, PayPeriod};

/// One calculation request: what the filer earns and pays in rent, and over
/// which period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross income for the period.
    pub gross: Decimal,
    /// Rent paid for the period.
    pub rent: Decimal,
    pub period: PayPeriod,
    /// Whether the 8% pension contribution is deducted.
    pub has_pension: bool,
}

impl TaxInput {
    pub fn new(
        gross: Decimal,
        rent: Decimal,
        period: PayPeriod,
        has_pension: bool,
    ) -> Self {
        Self {
            gross,
            rent,
            period,
            has_pension,
        }
    }

    /// Builds an input for a filer, applying the pension rule for their
    /// status (salaried filers always contribute).
    pub fn for_filer(
        status: FilerStatus,
        gross: Decimal,
        rent: Decimal,
        period: PayPeriod,
        pension_requested: bool,
    ) -> Self {
        Self::new(gross, rent, period, status.resolve_pension(pension_requested))
    }

    /// Builds an input from floating-point amounts.
    ///
    /// `NaN` and negative values become zero; infinities and values outside
    /// the `Decimal` range saturate at [`Decimal::MAX`].
    pub fn from_f64(
        gross: f64,
        rent: f64,
        is_monthly: bool,
        has_pension: bool,
    ) -> Self {
        Self::new(
            amount_from_f64(gross),
            amount_from_f64(rent),
            PayPeriod::from_monthly_flag(is_monthly),
            has_pension,
        )
    }
}

fn amount_from_f64(value: f64) -> Decimal {
    if value.is_nan() || value <= 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::MAX)
}
