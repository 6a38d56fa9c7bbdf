//! Fixed-point token amounts and the numeric helpers used to display them.

pub mod conversions;
pub mod serialization;
pub mod units;

pub use units::{Decimals, TokenAmount, format_units, parse_units, try_parse_units};
