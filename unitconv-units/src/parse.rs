//! Free-form query parsing - "5 km to mi", "100kg -> lb", "32 F in C"

use serde::Serialize;
use thiserror::Error;
use crate::engine::ENGINE;
use crate::{Category, ConversionError, Unit};

/// Errors from parsing a conversion query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("invalid conversion format: '{0}', expected '<value> <unit> to <unit>'")]
    Malformed(String),

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),

    #[error("cannot convert {from} to {to}: no category contains both units")]
    Incompatible { from: String, to: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// A parsed, fully resolved conversion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionQuery {
    pub value: f64,
    pub category: Category,
    pub from: &'static Unit,
    pub to: &'static Unit,
}

impl ConversionQuery {
    /// Run the conversion through the engine
    pub fn evaluate(&self) -> Result<f64, ConversionError> {
        ENGINE.convert_units(self.from, self.to, self.value)
    }
}

const SEPARATORS: [&str; 4] = ["->", "→", " to ", " in "];

/// Parse a conversion query like "5 km to mi" or "100kg -> lb"
pub fn parse_query(s: &str) -> Result<ConversionQuery, QueryError> {
    let s = s.trim();

    // Split at the last separator so "5 in in cm" keeps "in" as the unit
    let (quantity, target) = SEPARATORS
        .iter()
        .find_map(|sep| s.rsplit_once(sep))
        .ok_or_else(|| QueryError::Malformed(s.to_string()))?;

    let (value, from_text) = parse_quantity(quantity)?;
    let to_text = target.trim();
    if from_text.is_empty() || to_text.is_empty() {
        return Err(QueryError::Malformed(s.to_string()));
    }

    let from_categories = ENGINE.categories_of(from_text);
    if from_categories.is_empty() {
        return Err(QueryError::UnknownUnit(from_text.to_string()));
    }
    let to_categories = ENGINE.categories_of(to_text);
    if to_categories.is_empty() {
        return Err(QueryError::UnknownUnit(to_text.to_string()));
    }

    let category = from_categories
        .into_iter()
        .find(|c| to_categories.contains(c))
        .ok_or_else(|| QueryError::Incompatible {
            from: from_text.to_string(),
            to: to_text.to_string(),
        })?;

    Ok(ConversionQuery {
        value,
        category,
        from: ENGINE.resolve(category, from_text)?,
        to: ENGINE.resolve(category, to_text)?,
    })
}

/// Split a quantity like "5 m", "100kg" or "1e3 m" into value and unit text
pub fn parse_quantity(s: &str) -> Result<(f64, &str), QueryError> {
    let s = s.trim();

    // Longest prefix that reads as a number; "5ev" must stop before the 'e'
    let split = s
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find(|&end| s[..end].parse::<f64>().is_ok());

    match split {
        Some(end) => {
            let value = s[..end].parse::<f64>().map_err(|_| QueryError::InvalidNumber(s.to_string()))?;
            Ok((value, s[end..].trim()))
        }
        None => {
            let token = s.split_whitespace().next().unwrap_or(s);
            Err(QueryError::InvalidNumber(token.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5 m").unwrap(), (5.0, "m"));
        assert_eq!(parse_quantity("100kg").unwrap(), (100.0, "kg"));
        assert_eq!(parse_quantity("-3.5 nautical miles").unwrap(), (-3.5, "nautical miles"));
        assert_eq!(parse_quantity("1e3m").unwrap(), (1000.0, "m"));
        assert_eq!(parse_quantity("5eV").unwrap(), (5.0, "eV"));
    }

    #[test]
    fn test_parse_quantity_without_number() {
        assert_eq!(
            parse_quantity("km").unwrap_err(),
            QueryError::InvalidNumber("km".to_string())
        );
    }

    #[test]
    fn test_parse_query_separators() {
        for text in ["5 km to mi", "5 km -> mi", "5km→mi", "5 km in mi"] {
            let query = parse_query(text).unwrap();
            assert_eq!(query.value, 5.0);
            assert_eq!(query.category, Category::Length);
            assert_eq!(query.from.key, "kilometers");
            assert_eq!(query.to.key, "miles");
        }
    }

    #[test]
    fn test_parse_query_inches() {
        let query = parse_query("12 in in cm").unwrap();
        assert_eq!(query.from.key, "inches");
        assert_eq!(query.to.key, "centimeters");
        assert!((query.evaluate().unwrap() - 30.48).abs() < 1e-9);
    }

    #[test]
    fn test_parse_query_infers_temperature() {
        let query = parse_query("32 F to C").unwrap();
        assert_eq!(query.category, Category::Temperature);
        assert_eq!(query.evaluate().unwrap(), 0.0);
    }

    #[test]
    fn test_parse_query_errors() {
        assert!(matches!(parse_query("5 km"), Err(QueryError::Malformed(_))));
        assert!(matches!(parse_query("5 furlongs to m"), Err(QueryError::UnknownUnit(ref u)) if u == "furlongs"));
        assert!(matches!(parse_query("5 km to"), Err(QueryError::Malformed(_))));
        assert_eq!(
            parse_query("5 kg to m").unwrap_err(),
            QueryError::Incompatible { from: "kg".to_string(), to: "m".to_string() }
        );
    }

    #[test]
    fn test_non_finite_values_fail_on_evaluate() {
        let query = parse_query("NaN kg to lb").unwrap();
        assert!(matches!(query.evaluate(), Err(ConversionError::InvalidValue { .. })));
    }
}
