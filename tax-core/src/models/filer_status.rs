use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a recognised filer status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised filer status '{0}' (expected 'salary' or 'freelance')")]
pub struct ParseFilerStatusError(pub String);

/// How the filer earns their income.
///
/// Salaried employees always contribute to a pension scheme, so the pension
/// deduction cannot be switched off for them. Freelancers may opt out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilerStatus {
    #[default]
    Salary,
    Freelance,
}

impl FilerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Freelance => "freelance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salary" | "salaried" | "employed" => Some(Self::Salary),
            "freelance" | "freelancer" | "self-employed" | "contractor" => Some(Self::Freelance),
            _ => None,
        }
    }

    /// Whether this status forces the pension deduction on.
    pub fn pension_mandatory(&self) -> bool {
        matches!(self, Self::Salary)
    }

    /// Applies the pension rule to the filer's requested election.
    pub fn resolve_pension(
        &self,
        requested: bool,
    ) -> bool {
        self.pension_mandatory() || requested
    }
}

impl fmt::Display for FilerStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilerStatus {
    type Err = ParseFilerStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFilerStatusError(s.to_string()))
    }
}
