/// Parse the leading integer of a cell the way spreadsheet exports are read:
/// leading whitespace, an optional sign, and an optional `0x` prefix are
/// accepted, and parsing stops at the first invalid digit (`"12abc"` -> 12,
/// `"3.9"` -> 3, `"0x1f"` -> 31).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let value = raw.trim_start();
    let (negative, unsigned) = split_sign(value);
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_digit(radix))
        .map_or(digits.len(), |(idx, _)| idx);
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Coerce a whole cell into a number. Blank text counts as zero, and the
/// unsigned `0x`/`0o`/`0b` literals and `Infinity` are accepted; anything else
/// that is not a complete decimal number yields `None`.
pub fn coerce_number(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return Some(0.0);
    }

    let radix = match value.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&value[2..], radix)
            .ok()
            .map(|number| number as f64);
    }

    let (negative, unsigned) = split_sign(value);
    if unsigned == "Infinity" {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    // `f64::from_str` also understands "inf" and "nan", which a cell never means.
    if value.chars().any(|ch| ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E') {
        return None;
    }

    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn split_sign(value: &str) -> (bool, &str) {
    if let Some(rest) = value.strip_prefix('-') {
        (true, rest)
    } else {
        (false, value.strip_prefix('+').unwrap_or(value))
    }
}

/// Clamp a coerced number into a stock count: negatives and NaN become zero,
/// fractions are truncated, and overflow saturates.
pub fn clamp_stock(number: f64) -> u32 {
    if number.is_nan() || number <= 0.0 {
        return 0;
    }

    if number >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        number.trunc() as u32
    }
}

/// Interpret a textual flag like `1`, `true`, `yes`, or `on`.
pub fn parse_bool_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::{clamp_stock, coerce_number, parse_bool_flag, parse_leading_int};

    #[test]
    fn leading_int_stops_at_first_non_digit() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  7 unit"), Some(7));
        assert_eq!(parse_leading_int("3.9"), Some(3));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("+5"), Some(5));
        assert_eq!(parse_leading_int("nomor"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("0x1f"), Some(31));
        assert_eq!(parse_leading_int("-0x10"), Some(-16));
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0b11"), Some(0));
    }

    #[test]
    fn coerces_whole_cells_only() {
        assert_eq!(coerce_number("4"), Some(4.0));
        assert_eq!(coerce_number(" 2.5 "), Some(2.5));
        assert_eq!(coerce_number("1e2"), Some(100.0));
        assert_eq!(coerce_number(""), Some(0.0));
        assert_eq!(coerce_number("   "), Some(0.0));
        assert_eq!(coerce_number("4 pcs"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("Nomor"), None);
    }

    #[test]
    fn coerces_radix_literals_and_infinity() {
        assert_eq!(coerce_number("0x10"), Some(16.0));
        assert_eq!(coerce_number("0o17"), Some(15.0));
        assert_eq!(coerce_number("0b1"), Some(1.0));
        assert_eq!(coerce_number("0x"), None);
        assert_eq!(coerce_number("-0x10"), None);
        assert_eq!(coerce_number("0xzz"), None);
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(coerce_number("infinity"), None);
    }

    #[test]
    fn stock_is_clamped_non_negative() {
        assert_eq!(clamp_stock(4.0), 4);
        assert_eq!(clamp_stock(4.8), 4);
        assert_eq!(clamp_stock(-2.0), 0);
        assert_eq!(clamp_stock(f64::NAN), 0);
        assert_eq!(clamp_stock(1e12), u32::MAX);
        assert_eq!(clamp_stock(f64::INFINITY), u32::MAX);
        assert_eq!(clamp_stock(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn bool_flags() {
        assert!(parse_bool_flag("true"));
        assert!(parse_bool_flag(" YES "));
        assert!(parse_bool_flag("1"));
        assert!(parse_bool_flag("on"));
        assert!(!parse_bool_flag("false"));
        assert!(!parse_bool_flag(""));
        assert!(!parse_bool_flag("enabled"));
    }
}
