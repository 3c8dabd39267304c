//! Tax rates with date-bounded effectiveness.

pub mod error;
pub mod types;

pub use error::TaxRateError;
pub use types::{CreateTaxRateInput, TaxRate, MAX_NAME_LEN};
