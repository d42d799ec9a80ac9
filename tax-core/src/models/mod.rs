mod filer_status;
mod pay_period;
mod tax_band;
mod tax_input;
mod tax_result;

pub use filer_status::{FilerStatus, ParseFilerStatusError};
pub use pay_period::{MONTHS_PER_YEAR, ParsePayPeriodError, PayPeriod};
pub use tax_band::{TAX_BANDS, TaxBand, tax_free_allowance, top_rate};
pub use tax_input::TaxInput;
pub use tax_result::{BandTax, TaxResult};
