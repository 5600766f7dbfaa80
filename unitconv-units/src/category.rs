//! Measurement categories

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::unit::{ConversionError, Unit};
use crate::units;

/// A family of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Time,
    Volume,
    Speed,
    Area,
    DigitalStorage,
    Energy,
    Pressure,
}

impl Category {
    /// Every category, in the order hosts should present them
    pub const ALL: [Category; 10] = [
        Category::Length,
        Category::Mass,
        Category::Temperature,
        Category::Time,
        Category::Volume,
        Category::Speed,
        Category::Area,
        Category::DigitalStorage,
        Category::Energy,
        Category::Pressure,
    ];

    /// Machine key, e.g. `digital_storage`
    pub fn key(self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Temperature => "temperature",
            Category::Time => "time",
            Category::Volume => "volume",
            Category::Speed => "speed",
            Category::Area => "area",
            Category::DigitalStorage => "digital_storage",
            Category::Energy => "energy",
            Category::Pressure => "pressure",
        }
    }

    /// Display name, e.g. `Digital Storage`
    pub fn name(self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Mass => "Mass",
            Category::Temperature => "Temperature",
            Category::Time => "Time",
            Category::Volume => "Volume",
            Category::Speed => "Speed",
            Category::Area => "Area",
            Category::DigitalStorage => "Digital Storage",
            Category::Energy => "Energy",
            Category::Pressure => "Pressure",
        }
    }

    /// Units of this category, base unit first
    pub fn units(self) -> &'static [Unit] {
        units::table(self)
    }

    /// The unit every other unit of this category is defined against
    pub fn base_unit(self) -> &'static Unit {
        // Tables are static and non-empty; the base unit is always listed first
        &self.units()[0]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = units::normalize(s);
        let category = match key.as_str() {
            "length" | "distance" => Category::Length,
            "mass" | "weight" => Category::Mass,
            "temperature" | "temp" => Category::Temperature,
            "time" | "duration" => Category::Time,
            "volume" => Category::Volume,
            "speed" | "velocity" => Category::Speed,
            "area" => Category::Area,
            "digital_storage" | "digitalstorage" | "data" | "storage" => Category::DigitalStorage,
            "energy" => Category::Energy,
            "pressure" => Category::Pressure,
            _ => return Err(ConversionError::UnknownCategory(s.trim().to_string())),
        };
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_names_and_keys() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Weight".parse::<Category>().unwrap(), Category::Mass);
        assert_eq!("data".parse::<Category>().unwrap(), Category::DigitalStorage);
        assert_eq!("DigitalStorage".parse::<Category>().unwrap(), Category::DigitalStorage);
        assert_eq!("digital-storage".parse::<Category>().unwrap(), Category::DigitalStorage);
        assert_eq!(" velocity ".parse::<Category>().unwrap(), Category::Speed);
    }

    #[test]
    fn test_unknown_category() {
        let err = "Colour".parse::<Category>().unwrap_err();
        assert!(matches!(err, ConversionError::UnknownCategory(ref s) if s == "Colour"));
    }

    #[test]
    fn test_base_units() {
        assert_eq!(Category::Length.base_unit().key, "meters");
        assert_eq!(Category::Temperature.base_unit().key, "kelvin");
        assert_eq!(Category::DigitalStorage.base_unit().key, "bytes");
        assert_eq!(Category::Volume.base_unit().key, "cubic_meters");
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
    }
}
