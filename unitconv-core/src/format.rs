//! Display formatting for conversion results and unit names

/// Default number of significant digits shown to users
pub const DEFAULT_SIGFIGS: u32 = 6;

/// Format a value with at most `digits` significant digits, `%g` style.
///
/// Trailing zeros are dropped. Scientific notation is used when the decimal
/// exponent is below -4 or at least `digits`, e.g. `1e+06`, `1.5e-05`.
pub fn format_significant(value: f64, digits: u32) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.clamp(1, 17) as usize;

    // Let the formatter do the rounding so a carry (9.999995 -> 10) moves the exponent
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Turn a unit key into a label: `nautical_miles` -> `Nautical Miles`
pub fn format_unit(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
