//! Field normalizers for order page text.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{parse_currency, parse_quantity};
pub use dates::{parse_flexible_date, try_parse_date};
pub use patterns::*;
