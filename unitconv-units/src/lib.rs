//! unitconv Units - Conversion Engine
//!
//! Converts values between units of the same measurement category. Every
//! unit carries one rule to and from its category's base unit, so any pair
//! converts through the base and the tables stay linear in size.
//!
//! Categories (base unit first):
//! - Length (m, km, cm, mm, mi, yd, ft, in, nmi)
//! - Mass (kg, g, mg, t, ton, lb, oz, st)
//! - Temperature (K, °C, °F, °R)
//! - Time (s, ms, min, h, d, wk, mo, yr)
//! - Volume (m³, L, mL, gal, qt, pt, cup, fl oz, tbsp, tsp)
//! - Speed (m/s, km/h, mph, ft/s, kn)
//! - Area (m², km², cm², ha, ac, ft², yd², mi²)
//! - Digital Storage (B, bit, KB..PB decimal, KiB..PiB binary)
//! - Energy (J, kJ, cal, kcal, Wh, kWh, eV, BTU)
//! - Pressure (Pa, kPa, bar, mbar, atm, psi, Torr, mmHg)

mod category;
mod unit;
mod units;
mod engine;
mod formula;
mod parse;
mod search;

pub use category::Category;
pub use unit::{Unit, ConversionRule, ConversionError};
pub use units::normalize;
pub use engine::{ConversionEngine, ENGINE};
pub use formula::formula;
pub use parse::{parse_query, parse_quantity, ConversionQuery, QueryError};
pub use search::{search, SearchHit};

use unitconv_core::UnitconvError;

/// All supported categories, in stable display order
pub fn list_categories() -> &'static [Category] {
    ENGINE.list_categories()
}

/// Units valid for the named category
pub fn list_units(category: &str) -> Result<&'static [Unit], ConversionError> {
    ENGINE.list_units(category)
}

/// Convert `value` from one unit to another within the named category
pub fn convert(category: &str, from_unit: &str, to_unit: &str, value: f64) -> Result<f64, ConversionError> {
    ENGINE.convert(category, from_unit, to_unit, value)
}

impl From<ConversionError> for UnitconvError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::UnknownCategory(name) => UnitconvError::unknown_category(&name),
            ConversionError::UnitNotInCategory { unit, category } => {
                let err = UnitconvError::unit_not_in_category(&unit, category.name());
                match ENGINE.categories_of(&unit).first() {
                    Some(home) => err.with_suggestion(format!(
                        "'{}' is a {} unit; pick a {} unit or switch category",
                        unit, home, category
                    )),
                    None => err,
                }
            }
            ConversionError::InvalidValue { value, reason } => {
                UnitconvError::invalid_value(format!("{} is {}", value, reason))
            }
        }
    }
}

impl From<QueryError> for UnitconvError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Conversion(inner) => inner.into(),
            QueryError::UnknownUnit(_) => UnitconvError::parse_error(err.to_string())
                .with_suggestion("Use search_units to find supported units"),
            other => UnitconvError::parse_error(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use unitconv_core::codes;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    /// Any (category, unit index) pair
    fn category_and_unit() -> impl Strategy<Value = (Category, usize)> {
        (0..Category::ALL.len()).prop_flat_map(|i| {
            let category = Category::ALL[i];
            (Just(category), 0..category.units().len())
        })
    }

    /// A category with three of its unit indices
    fn category_and_three_units() -> impl Strategy<Value = (Category, usize, usize, usize)> {
        (0..Category::ALL.len()).prop_flat_map(|i| {
            let category = Category::ALL[i];
            let n = category.units().len();
            (Just(category), 0..n, 0..n, 0..n)
        })
    }

    #[test]
    fn test_reference_conversions() {
        assert_eq!(convert("Temperature", "Celsius", "Kelvin", 0.0).unwrap(), 273.15);
        assert_eq!(convert("Temperature", "Fahrenheit", "Celsius", 32.0).unwrap(), 0.0);
        assert!(approx_eq(convert("Length", "meters", "centimeters", 1.0).unwrap(), 100.0));
        assert_eq!(convert("DigitalStorage", "gigabytes", "megabytes", 1.0).unwrap(), 1000.0);
        assert_eq!(convert("Volume", "liters", "liters", 10.0).unwrap(), 10.0);

        assert!(matches!(
            convert("Length", "meters", "kilograms", 5.0),
            Err(ConversionError::UnitNotInCategory { .. })
        ));
        assert!(matches!(
            convert("Mass", "kg", "kg", f64::NAN),
            Err(ConversionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_list_functions() {
        assert_eq!(list_categories().len(), 10);
        assert_eq!(list_units("Temperature").unwrap().len(), 4);
        assert!(matches!(list_units("Colour"), Err(ConversionError::UnknownCategory(_))));
    }

    #[test]
    fn test_error_to_user_message() {
        let err: UnitconvError = convert("Length", "meters", "kilograms", 5.0).unwrap_err().into();
        assert_eq!(err.code, codes::UNIT_NOT_IN_CATEGORY);
        assert_eq!(err.message, "Unit 'kilograms' is not a Length unit");
        assert!(err.suggestion.unwrap().contains("'kilograms' is a Mass unit"));

        let err: UnitconvError = convert("Colour", "m", "m", 1.0).unwrap_err().into();
        assert_eq!(err.code, codes::UNKNOWN_CATEGORY);

        let err: UnitconvError = convert("Mass", "kg", "kg", f64::NAN).unwrap_err().into();
        assert_eq!(err.code, codes::INVALID_VALUE);
        assert_eq!(err.message, "Invalid value: NaN is not a finite number");
    }

    #[test]
    fn test_query_error_to_user_message() {
        let err: UnitconvError = parse_query("5 furlongs to m").unwrap_err().into();
        assert_eq!(err.code, codes::PARSE_ERROR);
        assert!(err.suggestion.unwrap().contains("search_units"));

        let err: UnitconvError = parse_query("5 km").unwrap_err().into();
        assert_eq!(err.code, codes::PARSE_ERROR);
    }

    proptest! {
        #[test]
        fn prop_identity((category, i) in category_and_unit(), v in -1e12f64..1e12) {
            let unit = category.units()[i].key;
            prop_assert_eq!(convert(category.key(), unit, unit, v).unwrap(), v);
        }

        #[test]
        fn prop_round_trip((category, a, b, _) in category_and_three_units(), v in -1e9f64..1e9) {
            let units = category.units();
            let there = convert(category.key(), units[a].key, units[b].key, v).unwrap();
            let back = convert(category.key(), units[b].key, units[a].key, there).unwrap();
            prop_assert!(approx_eq(back, v), "{} -> {} -> {}", v, there, back);
        }

        #[test]
        fn prop_composes_through_any_unit((category, a, b, c) in category_and_three_units(), v in -1e9f64..1e9) {
            let units = category.units();
            let direct = convert(category.key(), units[a].key, units[c].key, v).unwrap();
            let via = convert(category.key(), units[a].key, units[b].key, v)
                .and_then(|mid| convert(category.key(), units[b].key, units[c].key, mid))
                .unwrap();
            prop_assert!(approx_eq(direct, via), "direct {} vs via {} = {}", direct, units[b].key, via);
        }

        #[test]
        fn prop_non_finite_rejected((category, i) in category_and_unit(), v in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)]) {
            let unit = category.units()[i].key;
            let is_invalid = matches!(convert(category.key(), unit, unit, v), Err(ConversionError::InvalidValue { .. }));
            prop_assert!(is_invalid);
        }
    }
}
