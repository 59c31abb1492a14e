//! Sanity checks for a prediction CSV against the test CSV it answers.

pub mod data;
pub mod error;
pub mod exit_codes;
pub mod parser;
pub mod units;
pub mod validator;

pub use error::{SanityError, SchemaViolation};
pub use parser::{PredictionParser, UnitValueParser};
pub use validator::{Report, Validator};
