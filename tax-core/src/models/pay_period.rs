use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of pay periods in a year when income is given monthly.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Error returned when a string is not a recognised pay period.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised pay period '{0}' (expected 'monthly' or 'annual')")]
pub struct ParsePayPeriodError(pub String);

/// The period the entered income and rent figures cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    #[default]
    Monthly,
    Annual,
}

impl PayPeriod {
    pub fn from_monthly_flag(is_monthly: bool) -> Self {
        if is_monthly { Self::Monthly } else { Self::Annual }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => MONTHS_PER_YEAR,
            Self::Annual => 1,
        }
    }

    /// Converts an amount for this period into an annual amount.
    ///
    /// Saturates at [`Decimal::MAX`] rather than overflowing.
    pub fn annualize(
        &self,
        amount: Decimal,
    ) -> Decimal {
        amount.saturating_mul(Decimal::from(self.periods_per_year()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" | "a" | "y" => Some(Self::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayPeriod {
    type Err = ParsePayPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePayPeriodError(s.to_string()))
    }
}
