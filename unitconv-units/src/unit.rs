//! Unit representation with conversion rules

use std::fmt;
use serde::Serialize;
use thiserror::Error;
use unitconv_core::format_unit;
use crate::Category;

/// How a unit maps onto its category's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionRule {
    /// `base = value * factor`
    Linear { factor: f64 },
    /// `base = (value + shift) * scale + offset`
    Affine { shift: f64, scale: f64, offset: f64 },
}

impl ConversionRule {
    /// Apply the rule: unit value -> base value
    pub fn to_base(&self, value: f64) -> f64 {
        match *self {
            ConversionRule::Linear { factor } => value * factor,
            ConversionRule::Affine { shift, scale, offset } => (value + shift) * scale + offset,
        }
    }

    /// Invert the rule: base value -> unit value
    pub fn from_base(&self, base: f64) -> f64 {
        match *self {
            ConversionRule::Linear { factor } => base / factor,
            ConversionRule::Affine { shift, scale, offset } => (base - offset) / scale - shift,
        }
    }

    /// Slope of the rule (the factor for linear rules)
    pub fn scale(&self) -> f64 {
        match *self {
            ConversionRule::Linear { factor } => factor,
            ConversionRule::Affine { scale, .. } => scale,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(*self, ConversionRule::Linear { factor } if factor == 1.0)
    }
}

/// A unit scoped to exactly one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// Machine key (e.g., "nautical_miles")
    pub key: &'static str,
    /// Short symbol (e.g., "nmi")
    pub symbol: &'static str,
    /// The only category this unit belongs to
    pub category: Category,
    /// Transform to and from the category's base unit
    pub rule: ConversionRule,
    /// Extra spellings accepted on lookup
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

impl Unit {
    /// Create a unit with proportional conversion
    pub const fn linear(
        key: &'static str,
        symbol: &'static str,
        category: Category,
        factor: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        Unit {
            key,
            symbol,
            category,
            rule: ConversionRule::Linear { factor },
            aliases,
        }
    }

    /// Create a unit with an affine conversion (temperature scales)
    pub const fn affine(
        key: &'static str,
        symbol: &'static str,
        category: Category,
        shift: f64,
        scale: f64,
        offset: f64,
        aliases: &'static [&'static str],
    ) -> Self {
        Unit {
            key,
            symbol,
            category,
            rule: ConversionRule::Affine { shift, scale, offset },
            aliases,
        }
    }

    /// Human label, e.g. "Nautical Miles"
    pub fn label(&self) -> String {
        format_unit(self.key)
    }

    /// Check if this is the base unit of its category
    pub fn is_base(&self) -> bool {
        self.rule.is_identity()
    }

    /// Every spelling this unit answers to: key, symbol, then aliases
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        let aliases: &'static [&'static str] = self.aliases;
        [self.key, self.symbol].into_iter().chain(aliases.iter().copied())
    }

    /// Convert a value from this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        self.rule.to_base(value)
    }

    /// Convert a value from the base unit to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        self.rule.from_base(base)
    }

    /// Convert a value from this unit to another unit of the same category
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, ConversionError> {
        if self.category != target.category {
            return Err(ConversionError::UnitNotInCategory {
                unit: target.key.to_string(),
                category: self.category,
            });
        }

        if !value.is_finite() {
            return Err(ConversionError::InvalidValue {
                value,
                reason: "not a finite number",
            });
        }

        if self.key == target.key {
            return Ok(value);
        }

        // Linear pairs scale by one ratio so the intermediate base value can't overflow
        let result = match (self.rule, target.rule) {
            (ConversionRule::Linear { factor: from }, ConversionRule::Linear { factor: to }) => {
                value * (from / to)
            }
            _ => target.from_base(self.to_base(value)),
        };
        if !result.is_finite() {
            return Err(ConversionError::InvalidValue {
                value,
                reason: "result is out of range for the target unit",
            });
        }
        Ok(result)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("unit '{unit}' is not a {category} unit")]
    UnitNotInCategory { unit: String, category: Category },

    #[error("invalid value {value}: {reason}")]
    InvalidValue { value: f64, reason: &'static str },
}
