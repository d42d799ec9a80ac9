//! Tax calculations for Nigerian personal income tax.
//!
//! [`paye`] turns an income, rent and pension election into a banded tax
//! liability; [`common`] holds the rounding and clamping helpers it shares
//! with the display and export layers.

pub mod common;
pub mod paye;

pub use paye::{
    PENSION_RATE, PayeCalculator, RENT_RELIEF_CAP, RENT_RELIEF_RATE, calculate_tax,
};
