//! Human-readable conversion formulas

use unitconv_core::{format_significant, DEFAULT_SIGFIGS};
use crate::{Category, ConversionError, Unit};

/// Describe how `from` converts into `to`.
///
/// Linear pairs read `1 Kilometers = 1000 Meters`; temperature pairs are
/// written as `to = from × a + b`, using the familiar textbook form where
/// one exists.
pub fn formula(from: &Unit, to: &Unit) -> Result<String, ConversionError> {
    if from.category != to.category {
        return Err(ConversionError::UnitNotInCategory {
            unit: to.key.to_string(),
            category: from.category,
        });
    }

    if from.key == to.key {
        return Ok(format!("{} = {}", to.symbol, from.symbol));
    }

    if from.category == Category::Temperature {
        return Ok(temperature_formula(from, to));
    }

    let factor = from.rule.scale() / to.rule.scale();
    Ok(format!(
        "1 {} = {} {}",
        from.label(),
        format_significant(factor, DEFAULT_SIGFIGS),
        to.label()
    ))
}

fn temperature_formula(from: &Unit, to: &Unit) -> String {
    let known = match (from.key, to.key) {
        ("celsius", "fahrenheit") => Some("°F = (°C × 9/5) + 32"),
        ("fahrenheit", "celsius") => Some("°C = (°F - 32) × 5/9"),
        ("celsius", "kelvin") => Some("K = °C + 273.15"),
        ("kelvin", "celsius") => Some("°C = K - 273.15"),
        _ => None,
    };
    if let Some(text) = known {
        return text.to_string();
    }

    // Composite of two affine maps is affine: slope from the scales, intercept at zero
    let slope = from.rule.scale() / to.rule.scale();
    let intercept = to.from_base(from.to_base(0.0));

    let mut text = format!("{} = {}", to.symbol, from.symbol);
    if slope != 1.0 {
        text.push_str(&format!(" × {}", format_significant(slope, DEFAULT_SIGFIGS)));
    }
    let rounded = format_significant(intercept.abs(), DEFAULT_SIGFIGS);
    if rounded != "0" {
        let sign = if intercept < 0.0 { '-' } else { '+' };
        text.push_str(&format!(" {} {}", sign, rounded));
    }
    text
}
