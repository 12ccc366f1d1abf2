//! Tolerant value normalization: the only layer that touches raw
//! `serde_json::Value` shapes. Everything here returns a usable value or a
//! deterministic default; missing data is never an error.

pub mod fields;
pub mod value;

pub use fields::*;
pub use value::*;
