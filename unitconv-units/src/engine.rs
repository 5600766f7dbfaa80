//! The conversion engine: category -> unit pair -> scalar transform

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;
use crate::units::normalize;
use crate::{Category, ConversionError, Unit};

/// Global engine, indexed once on first use
pub static ENGINE: LazyLock<ConversionEngine> = LazyLock::new(ConversionEngine::new);

/// Read-only index over the static unit tables
pub struct ConversionEngine {
    lookup: HashMap<Category, HashMap<String, &'static Unit>>,
}

impl ConversionEngine {
    pub fn new() -> Self {
        let lookup = Category::ALL
            .iter()
            .map(|&category| {
                let mut names = HashMap::new();
                for unit in category.units() {
                    for name in unit.names() {
                        names.entry(normalize(name)).or_insert(unit);
                    }
                }
                (category, names)
            })
            .collect();

        ConversionEngine { lookup }
    }

    /// All supported categories, in stable display order
    pub fn list_categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    /// Units valid for a category given by name
    pub fn list_units(&self, category: &str) -> Result<&'static [Unit], ConversionError> {
        let category: Category = category.parse()?;
        Ok(category.units())
    }

    /// Resolve a unit name (key, symbol or alias) within a category
    pub fn resolve(&self, category: Category, unit: &str) -> Result<&'static Unit, ConversionError> {
        self.lookup
            .get(&category)
            .and_then(|names| names.get(&normalize(unit)))
            .copied()
            .ok_or_else(|| ConversionError::UnitNotInCategory {
                unit: unit.trim().to_string(),
                category,
            })
    }

    /// Categories in which a unit name resolves, in display order
    pub fn categories_of(&self, unit: &str) -> Vec<Category> {
        let key = normalize(unit);
        Category::ALL
            .iter()
            .copied()
            .filter(|category| {
                self.lookup
                    .get(category)
                    .is_some_and(|names| names.contains_key(&key))
            })
            .collect()
    }

    /// Convert `value` between two units of the named category
    pub fn convert(
        &self,
        category: &str,
        from_unit: &str,
        to_unit: &str,
        value: f64,
    ) -> Result<f64, ConversionError> {
        let category: Category = category.parse().inspect_err(|e| debug!(error = %e, "conversion rejected"))?;
        self.convert_in(category, from_unit, to_unit, value)
    }

    /// Convert `value` between two units of an already-parsed category
    pub fn convert_in(
        &self,
        category: Category,
        from_unit: &str,
        to_unit: &str,
        value: f64,
    ) -> Result<f64, ConversionError> {
        let result = self
            .resolve(category, from_unit)
            .and_then(|from| Ok((from, self.resolve(category, to_unit)?)))
            .and_then(|(from, to)| self.convert_units(from, to, value));

        match &result {
            Ok(converted) => debug!(%category, from_unit, to_unit, value, converted, "converted"),
            Err(e) => debug!(%category, from_unit, to_unit, value, error = %e, "conversion rejected"),
        }
        result
    }

    /// Convert between resolved units through the category's base unit
    pub fn convert_units(&self, from: &Unit, to: &Unit, value: f64) -> Result<f64, ConversionError> {
        from.convert_to(value, to)
    }
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_list_categories_is_stable() {
        let engine = ConversionEngine::new();
        assert_eq!(engine.list_categories(), &Category::ALL);
        assert_eq!(engine.list_categories()[0], Category::Length);
        assert_eq!(engine.list_categories().len(), 10);
    }

    #[test]
    fn test_list_units() {
        let units = ENGINE.list_units("Length").unwrap();
        assert_eq!(units[0].key, "meters");
        assert!(units.iter().any(|u| u.key == "nautical_miles"));

        let err = ENGINE.list_units("Colour").unwrap_err();
        assert_eq!(err, ConversionError::UnknownCategory("Colour".to_string()));
    }

    #[test]
    fn test_resolve_by_key_symbol_alias() {
        let by_key = ENGINE.resolve(Category::Mass, "kilograms").unwrap();
        let by_symbol = ENGINE.resolve(Category::Mass, "kg").unwrap();
        let by_alias = ENGINE.resolve(Category::Mass, "Kilogram").unwrap();
        assert_eq!(by_key, by_symbol);
        assert_eq!(by_key, by_alias);

        assert_eq!(ENGINE.resolve(Category::Length, "Nautical Miles").unwrap().key, "nautical_miles");
        assert_eq!(ENGINE.resolve(Category::Temperature, "°C").unwrap().key, "celsius");
    }

    #[test]
    fn test_every_name_resolves_to_its_unit() {
        for category in Category::ALL {
            for unit in category.units() {
                for name in unit.names() {
                    assert_eq!(ENGINE.resolve(category, name).unwrap().key, unit.key, "name '{}'", name);
                }
            }
        }
    }

    #[test]
    fn test_categories_of() {
        assert_eq!(ENGINE.categories_of("kilograms"), vec![Category::Mass]);
        assert_eq!(ENGINE.categories_of("psi"), vec![Category::Pressure]);
        assert!(ENGINE.categories_of("furlongs").is_empty());
    }

    #[test]
    fn test_boundary_values() {
        assert_eq!(ENGINE.convert("Temperature", "celsius", "kelvin", 0.0).unwrap(), 273.15);
        assert_eq!(ENGINE.convert("Temperature", "fahrenheit", "celsius", 32.0).unwrap(), 0.0);
        assert!(approx_eq(ENGINE.convert("Length", "meters", "centimeters", 1.0).unwrap(), 100.0));
        assert_eq!(ENGINE.convert("DigitalStorage", "gigabytes", "megabytes", 1.0).unwrap(), 1000.0);
        assert_eq!(ENGINE.convert("DigitalStorage", "gibibytes", "mebibytes", 1.0).unwrap(), 1024.0);
    }

    #[test]
    fn test_huge_values_that_fit_the_target() {
        let mi = ENGINE.convert("Length", "kilometers", "miles", 1.7e306).unwrap();
        assert!(approx_eq(mi, 1.0563310268034678e306));
        let pib = ENGINE.convert("DigitalStorage", "petabytes", "pebibytes", 1e300).unwrap();
        assert!(approx_eq(pib, 8.881784197001253e299));
        assert!(matches!(
            ENGINE.convert("Length", "miles", "millimeters", f64::MAX),
            Err(ConversionError::InvalidValue { reason: "result is out of range for the target unit", .. })
        ));
    }

    #[test]
    fn test_temperature_scales() {
        assert!(approx_eq(ENGINE.convert("Temperature", "C", "F", 100.0).unwrap(), 212.0));
        assert!(approx_eq(ENGINE.convert("Temperature", "F", "C", -40.0).unwrap(), -40.0));
        assert!(approx_eq(ENGINE.convert("Temperature", "kelvin", "rankine", 100.0).unwrap(), 180.0));
        assert!(approx_eq(ENGINE.convert("Temperature", "rankine", "fahrenheit", 491.67).unwrap(), 32.0));
    }

    #[test]
    fn test_common_conversions() {
        assert!(approx_eq(ENGINE.convert("Length", "miles", "kilometers", 1.0).unwrap(), 1.609344));
        assert!(approx_eq(ENGINE.convert("Mass", "pounds", "grams", 1.0).unwrap(), 453.59237));
        assert!(approx_eq(ENGINE.convert("Time", "days", "hours", 2.0).unwrap(), 48.0));
        assert!(approx_eq(ENGINE.convert("Volume", "gallons", "liters", 1.0).unwrap(), 3.785411784));
        assert!(approx_eq(ENGINE.convert("Speed", "km/h", "m/s", 36.0).unwrap(), 10.0));
        assert!(approx_eq(ENGINE.convert("Area", "hectares", "acres", 1.0).unwrap(), 2.471053814671653));
        assert!(approx_eq(ENGINE.convert("Energy", "kcal", "kJ", 1.0).unwrap(), 4.184));
        assert!(approx_eq(ENGINE.convert("Pressure", "atm", "torr", 1.0).unwrap(), 760.0));
    }

    #[test]
    fn test_unit_not_in_category() {
        let err = ENGINE.convert("Length", "meters", "kilograms", 5.0).unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnitNotInCategory {
                unit: "kilograms".to_string(),
                category: Category::Length,
            }
        );

        let err = ENGINE.convert("Length", "furlongs", "meters", 5.0).unwrap_err();
        assert!(matches!(err, ConversionError::UnitNotInCategory { ref unit, .. } if unit == "furlongs"));
    }

    #[test]
    fn test_invalid_value() {
        let err = ENGINE.convert("Mass", "kg", "kg", f64::NAN).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { .. }));

        let err = ENGINE.convert("Mass", "kg", "lb", f64::INFINITY).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { .. }));
    }

    #[test]
    fn test_validation_order() {
        // Category is checked before units, units before the value
        let err = ENGINE.convert("Colour", "meters", "kilograms", f64::NAN).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownCategory(_)));

        let err = ENGINE.convert("Length", "meters", "kilograms", f64::NAN).unwrap_err();
        assert!(matches!(err, ConversionError::UnitNotInCategory { .. }));
    }

    #[test]
    fn test_identity_is_exact() {
        assert_eq!(ENGINE.convert("Volume", "liters", "liters", 10.0).unwrap(), 10.0);
        assert_eq!(ENGINE.convert("Volume", "liters", "L", 0.1).unwrap(), 0.1);
        assert_eq!(ENGINE.convert("Temperature", "fahrenheit", "fahrenheit", 98.6).unwrap(), 98.6);
    }

    #[test]
    fn test_convert_units_rejects_mixed_categories() {
        let meters = ENGINE.resolve(Category::Length, "m").unwrap();
        let grams = ENGINE.resolve(Category::Mass, "g").unwrap();
        assert!(matches!(
            ENGINE.convert_units(meters, grams, 1.0),
            Err(ConversionError::UnitNotInCategory { category: Category::Length, .. })
        ));
    }
}
