//! Unit definitions, one static table per category
//!
//! The base unit of each category is listed first with factor 1.
//! Aliases are matched after `normalize`, so they only need one spelling.

use crate::{Category, Unit};

/// Lookup form of a unit or category name: trimmed, lowercase, `_` for spaces and hyphens
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

pub(crate) fn table(category: Category) -> &'static [Unit] {
    match category {
        Category::Length => LENGTH,
        Category::Mass => MASS,
        Category::Temperature => TEMPERATURE,
        Category::Time => TIME,
        Category::Volume => VOLUME,
        Category::Speed => SPEED,
        Category::Area => AREA,
        Category::DigitalStorage => DIGITAL_STORAGE,
        Category::Energy => ENERGY,
        Category::Pressure => PRESSURE,
    }
}

use Category::*;

static LENGTH: &[Unit] = &[
    Unit::linear("meters", "m", Length, 1.0, &["meter", "metre", "metres"]),
    Unit::linear("kilometers", "km", Length, 1000.0, &["kilometer", "kilometre", "kilometres"]),
    Unit::linear("centimeters", "cm", Length, 0.01, &["centimeter", "centimetre", "centimetres"]),
    Unit::linear("millimeters", "mm", Length, 0.001, &["millimeter", "millimetre", "millimetres"]),
    Unit::linear("miles", "mi", Length, 1609.344, &["mile"]),
    Unit::linear("yards", "yd", Length, 0.9144, &["yard"]),
    Unit::linear("feet", "ft", Length, 0.3048, &["foot"]),
    Unit::linear("inches", "in", Length, 0.0254, &["inch"]),
    Unit::linear("nautical_miles", "nmi", Length, 1852.0, &["nautical_mile"]),
];

static MASS: &[Unit] = &[
    Unit::linear("kilograms", "kg", Mass, 1.0, &["kilogram", "kilo", "kilos"]),
    Unit::linear("grams", "g", Mass, 0.001, &["gram"]),
    Unit::linear("milligrams", "mg", Mass, 0.000001, &["milligram"]),
    Unit::linear("tonnes", "t", Mass, 1000.0, &["tonne", "metric_ton", "metric_tons"]),
    // US short ton
    Unit::linear("tons", "ton", Mass, 907.18474, &["short_ton", "short_tons"]),
    Unit::linear("pounds", "lb", Mass, 0.45359237, &["pound", "lbs"]),
    Unit::linear("ounces", "oz", Mass, 0.028349523125, &["ounce"]),
    Unit::linear("stones", "st", Mass, 6.35029318, &["stone"]),
];

// Kelvin is the base; K = (value + shift) * scale + offset
static TEMPERATURE: &[Unit] = &[
    Unit::linear("kelvin", "K", Temperature, 1.0, &["kelvins"]),
    Unit::affine("celsius", "°C", Temperature, 0.0, 1.0, 273.15, &["c", "degc", "centigrade"]),
    Unit::affine("fahrenheit", "°F", Temperature, -32.0, 5.0 / 9.0, 273.15, &["f", "degf"]),
    Unit::linear("rankine", "°R", Temperature, 5.0 / 9.0, &["r", "degr"]),
];

// Months and years follow the Julian year of 365.25 days
static TIME: &[Unit] = &[
    Unit::linear("seconds", "s", Time, 1.0, &["second", "sec", "secs"]),
    Unit::linear("milliseconds", "ms", Time, 0.001, &["millisecond"]),
    Unit::linear("minutes", "min", Time, 60.0, &["minute", "mins"]),
    Unit::linear("hours", "h", Time, 3600.0, &["hour", "hr", "hrs"]),
    Unit::linear("days", "d", Time, 86_400.0, &["day"]),
    Unit::linear("weeks", "wk", Time, 604_800.0, &["week"]),
    Unit::linear("months", "mo", Time, 2_629_800.0, &["month"]),
    Unit::linear("years", "yr", Time, 31_557_600.0, &["year", "yrs"]),
];

// US customary for the kitchen measures
static VOLUME: &[Unit] = &[
    Unit::linear("cubic_meters", "m³", Volume, 1.0, &["cubic_meter", "m3"]),
    Unit::linear("liters", "L", Volume, 0.001, &["liter", "litre", "litres"]),
    Unit::linear("milliliters", "mL", Volume, 0.000001, &["milliliter", "millilitre", "millilitres"]),
    Unit::linear("gallons", "gal", Volume, 0.003785411784, &["gallon"]),
    Unit::linear("quarts", "qt", Volume, 0.000946352946, &["quart"]),
    Unit::linear("pints", "pt", Volume, 0.000473176473, &["pint"]),
    Unit::linear("cups", "cup", Volume, 0.0002365882365, &[]),
    Unit::linear("fluid_ounces", "fl_oz", Volume, 0.0000295735295625, &["fluid_ounce", "floz"]),
    Unit::linear("tablespoons", "tbsp", Volume, 0.00001478676478125, &["tablespoon"]),
    Unit::linear("teaspoons", "tsp", Volume, 0.00000492892159375, &["teaspoon"]),
];

static SPEED: &[Unit] = &[
    Unit::linear("meters_per_second", "m/s", Speed, 1.0, &["meter_per_second", "mps"]),
    Unit::linear("kilometers_per_hour", "km/h", Speed, 1000.0 / 3600.0, &["kilometer_per_hour", "kph", "kmh"]),
    Unit::linear("miles_per_hour", "mph", Speed, 0.44704, &["mile_per_hour"]),
    Unit::linear("feet_per_second", "ft/s", Speed, 0.3048, &["foot_per_second", "fps"]),
    Unit::linear("knots", "kn", Speed, 1852.0 / 3600.0, &["knot", "kt"]),
];

static AREA: &[Unit] = &[
    Unit::linear("square_meters", "m²", Area, 1.0, &["square_meter", "m2", "sq_m"]),
    Unit::linear("square_kilometers", "km²", Area, 1_000_000.0, &["square_kilometer", "km2", "sq_km"]),
    Unit::linear("square_centimeters", "cm²", Area, 0.0001, &["square_centimeter", "cm2"]),
    Unit::linear("hectares", "ha", Area, 10_000.0, &["hectare"]),
    Unit::linear("acres", "ac", Area, 4046.8564224, &["acre"]),
    Unit::linear("square_feet", "ft²", Area, 0.09290304, &["square_foot", "ft2", "sq_ft"]),
    Unit::linear("square_yards", "yd²", Area, 0.83612736, &["square_yard", "yd2", "sq_yd"]),
    Unit::linear("square_miles", "mi²", Area, 2_589_988.110336, &["square_mile", "mi2", "sq_mi"]),
];

// SI prefixes are decimal; the IEC binary multiples are separate units
static DIGITAL_STORAGE: &[Unit] = &[
    Unit::linear("bytes", "B", DigitalStorage, 1.0, &["byte"]),
    Unit::linear("bits", "bit", DigitalStorage, 0.125, &[]),
    Unit::linear("kilobytes", "KB", DigitalStorage, 1e3, &["kilobyte"]),
    Unit::linear("megabytes", "MB", DigitalStorage, 1e6, &["megabyte"]),
    Unit::linear("gigabytes", "GB", DigitalStorage, 1e9, &["gigabyte"]),
    Unit::linear("terabytes", "TB", DigitalStorage, 1e12, &["terabyte"]),
    Unit::linear("petabytes", "PB", DigitalStorage, 1e15, &["petabyte"]),
    Unit::linear("kibibytes", "KiB", DigitalStorage, 1024.0, &["kibibyte"]),
    Unit::linear("mebibytes", "MiB", DigitalStorage, 1_048_576.0, &["mebibyte"]),
    Unit::linear("gibibytes", "GiB", DigitalStorage, 1_073_741_824.0, &["gibibyte"]),
    Unit::linear("tebibytes", "TiB", DigitalStorage, 1_099_511_627_776.0, &["tebibyte"]),
    Unit::linear("pebibytes", "PiB", DigitalStorage, 1_125_899_906_842_624.0, &["pebibyte"]),
];

static ENERGY: &[Unit] = &[
    Unit::linear("joules", "J", Energy, 1.0, &["joule"]),
    Unit::linear("kilojoules", "kJ", Energy, 1000.0, &["kilojoule"]),
    // Thermochemical calorie
    Unit::linear("calories", "cal", Energy, 4.184, &["calorie"]),
    Unit::linear("kilocalories", "kcal", Energy, 4184.0, &["kilocalorie"]),
    Unit::linear("watt_hours", "Wh", Energy, 3600.0, &["watt_hour"]),
    Unit::linear("kilowatt_hours", "kWh", Energy, 3_600_000.0, &["kilowatt_hour"]),
    Unit::linear("electron_volts", "eV", Energy, 1.602176634e-19, &["electron_volt", "electronvolt", "electronvolts"]),
    Unit::linear("btus", "BTU", Energy, 1055.05585262, &["british_thermal_unit"]),
];

static PRESSURE: &[Unit] = &[
    Unit::linear("pascals", "Pa", Pressure, 1.0, &["pascal"]),
    Unit::linear("kilopascals", "kPa", Pressure, 1000.0, &["kilopascal"]),
    Unit::linear("bar", "bar", Pressure, 100_000.0, &["bars"]),
    Unit::linear("millibars", "mbar", Pressure, 100.0, &["millibar"]),
    Unit::linear("atmospheres", "atm", Pressure, 101_325.0, &["atmosphere"]),
    Unit::linear("psi", "psi", Pressure, 6894.757293168361, &["pounds_per_square_inch"]),
    Unit::linear("torr", "Torr", Pressure, 101_325.0 / 760.0, &[]),
    Unit::linear("millimeters_of_mercury", "mmHg", Pressure, 133.322387415, &["millimeter_of_mercury"]),
];
