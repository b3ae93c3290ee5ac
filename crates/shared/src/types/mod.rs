//! Common types used across the application.

pub mod id;
pub mod quantity;

pub use id::*;
pub use quantity::{format_bool_br, format_date_br, format_decimal_br, quantize};
