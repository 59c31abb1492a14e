use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::error::ParserError;
use crate::units;

// ---------------------------------------------------------------------------
// PredictionParser – the capability the validator is handed
// ---------------------------------------------------------------------------

/// Parses one raw `prediction` cell. Returning `Err` marks the row as
/// malformed; what a successful parse yields is the parser's business.
pub trait PredictionParser {
    type Output;

    fn parse(&self, raw: &str) -> Result<Self::Output, ParserError>;
}

impl<F, T> PredictionParser for F
where
    F: Fn(&str) -> Result<T, ParserError>,
{
    type Output = T;

    fn parse(&self, raw: &str) -> Result<T, ParserError> {
        self(raw)
    }
}

// ---------------------------------------------------------------------------
// UnitValueParser – "<number> <unit>" predictions
// ---------------------------------------------------------------------------

static PREDICTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?\s+[a-zA-Z\s]+$").expect("static regex"));

/// A parsed prediction such as `12.5 kilogram`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("Invalid format in {0}")]
    Format(String),

    #[error("Invalid unit [{unit}] found in {input}. Allowed units: {}", units::ALLOWED_UNITS.join(", "))]
    Unit { unit: String, input: String },
}

/// Default parser: a number, whitespace, then a known measurement unit.
/// Blank and `nan` cells are accepted and yield `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitValueParser;

impl UnitValueParser {
    pub fn parse_quantity(&self, raw: &str) -> Result<Option<Quantity>, QuantityError> {
        let s = raw.trim();
        if s.is_empty() || s == "nan" {
            return Ok(None);
        }
        if !PREDICTION_PATTERN.is_match(s) {
            return Err(QuantityError::Format(raw.to_string()));
        }

        // The pattern guarantees a whitespace run after the number.
        let (number, unit) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| QuantityError::Format(raw.to_string()))?;
        let value: f64 = number
            .parse()
            .map_err(|_| QuantityError::Format(raw.to_string()))?;

        let unit = units::canonical(unit.trim());
        if !units::is_allowed(unit) {
            return Err(QuantityError::Unit {
                unit: unit.to_string(),
                input: raw.to_string(),
            });
        }

        Ok(Some(Quantity {
            value,
            unit: unit.to_string(),
        }))
    }
}

impl PredictionParser for UnitValueParser {
    type Output = Option<Quantity>;

    fn parse(&self, raw: &str) -> Result<Self::Output, ParserError> {
        Ok(self.parse_quantity(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Option<Quantity>, QuantityError> {
        UnitValueParser.parse_quantity(s)
    }

    #[test]
    fn parses_number_and_unit() {
        let q = parse("12.5 kilogram").unwrap().unwrap();
        assert_eq!(q.value, 12.5);
        assert_eq!(q.unit, "kilogram");
    }

    #[test]
    fn multi_word_unit_and_extra_spacing() {
        let q = parse("  3   fluid ounce ").unwrap().unwrap();
        assert_eq!(q.value, 3.0);
        assert_eq!(q.unit, "fluid ounce");
    }

    #[test]
    fn negative_numbers_are_allowed() {
        assert_eq!(parse("-5 volt").unwrap().unwrap().value, -5.0);
    }

    #[test]
    fn abbreviations_are_normalised() {
        assert_eq!(parse("2 lbs").unwrap().unwrap().unit, "pound");
        assert_eq!(parse("30 cm").unwrap().unwrap().unit, "centimetre");
    }

    #[test]
    fn blank_and_nan_are_accepted_as_empty() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("nan"), Ok(None));
    }

    #[test]
    fn missing_unit_is_a_format_error() {
        assert_eq!(parse("12"), Err(QuantityError::Format("12".into())));
        assert!(matches!(parse("1e5 gram"), Err(QuantityError::Format(_))));
        assert!(matches!(parse("12,5 gram"), Err(QuantityError::Format(_))));
        assert!(matches!(parse("gram 12"), Err(QuantityError::Format(_))));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = parse("4 parsec").unwrap_err();
        assert!(matches!(err, QuantityError::Unit { ref unit, .. } if unit == "parsec"));
        assert!(err.to_string().starts_with("Invalid unit [parsec] found in 4 parsec."));
    }

    #[test]
    fn closures_are_parsers() {
        let reject_all = |_: &str| -> Result<(), ParserError> { Err("nope".into()) };
        assert!(reject_all.parse("anything").is_err());
    }
}
