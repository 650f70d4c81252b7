//! Display formatting shared by the report, the CLI tables and exports.
//! The aggregators return raw numbers and never call into this module.

/// Abbreviates large values: `1.5M`, `12.3K`, otherwise the plain number.
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{value}")
    }
}

/// US dollars with thousands separators, e.g. `-$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let cents = (value * 100.0).round() as i128;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_signed_percent(delta: f64) -> String {
    format!("{}{}", plus_sign(delta), format_percent(delta))
}

pub fn format_signed_number(delta: f64) -> String {
    format!("{}{}", plus_sign(delta), format_number(delta))
}

fn plus_sign(delta: f64) -> &'static str {
    if delta > 0.0 {
        "+"
    } else {
        ""
    }
}

fn group_thousands(value: i128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_abbreviate_by_magnitude() {
        assert_eq!(format_number(2_500_000.0), "2.5M");
        assert_eq!(format_number(12_340.0), "12.3K");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-4_200.0), "-4.2K");
    }

    #[test]
    fn currency_groups_and_rounds() {
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(45_000.0), "$45,000.00");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(-1_250.0), "-$1,250.00");
    }

    #[test]
    fn deltas_carry_explicit_sign() {
        assert_eq!(format_signed_percent(1.26), "+1.3%");
        assert_eq!(format_signed_percent(-0.4), "-0.4%");
        assert_eq!(format_signed_percent(0.0), "0.0%");
        assert_eq!(format_signed_number(1_500.0), "+1.5K");
        assert_eq!(format_signed_number(-300.0), "-300");
    }
}
