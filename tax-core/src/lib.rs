pub mod calculations;
pub mod currency;
pub mod models;

pub use calculations::{PayeCalculator, calculate_tax};
pub use currency::{format_grouped, format_naira, format_rate, parse_currency_input};
pub use models::*;
