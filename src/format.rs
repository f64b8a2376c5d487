//! Display formatting for prices, percentages and supplies.
//!
//! All grouping follows en-US conventions: `,` between thousands and `.`
//! as the decimal separator.

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Formats a dollar amount, abbreviating billions and millions.
///
/// ```
/// use tickerboard::format::format_currency;
///
/// assert_eq!(format_currency(1_861_618_902_186.0), "$1861.62B");
/// assert_eq!(format_currency(93_759.48), "$93,759.48");
/// assert_eq!(format_currency(0.000_123_4), "$0.000123");
/// ```
pub fn format_currency(value: f64) -> String {
    if value >= BILLION {
        return format!("${:.2}B", value / BILLION);
    }
    if value >= MILLION {
        return format!("${:.2}M", value / MILLION);
    }
    if value >= THOUSAND {
        return format!("${}", group(value, 2, 2));
    }
    let max_fraction = if value >= 1.0 { 2 } else { 6 };
    format!("${}", group(value, 2, max_fraction))
}

/// Formats a signed percentage with two decimals. Positive values carry no sign.
pub fn format_percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "" } else { "-" };
    format!("{sign}{:.2}%", value.abs())
}

/// Like [`format_percentage`] but prefixes strictly positive values with `+`.
pub fn format_signed_percentage(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.2}%")
    } else {
        format_percentage(value)
    }
}

/// Formats a number with default grouping and up to three decimals.
pub fn format_number(value: f64) -> String {
    group(value, 0, 3)
}

/// Formats a circulating or maximum supply followed by the asset symbol.
pub fn format_supply(value: f64, symbol: &str) -> String {
    if value >= MILLION {
        format!("{value:.2}M {symbol}")
    } else {
        format!("{} {symbol}", format_number(value))
    }
}

/// Groups the integer part of `value` in threes and keeps between
/// `min_fraction` and `max_fraction` decimals.
fn group(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_fraction && frac.ends_with('0') {
        frac.pop();
    }

    let digits = int_part.len();
    let mut out = String::with_capacity(digits + digits / 3 + frac.len() + 2);
    // Rounding can turn -0.0000001 into "0"; only keep the sign for non-zero output.
    if value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_billions() {
        assert_eq!(format_currency(1_861_618_902_186.0), "$1861.62B");
        assert_eq!(format_currency(1_000_000_000.0), "$1.00B");
    }

    #[test]
    fn currency_millions() {
        assert_eq!(format_currency(43_874_950.0), "$43.87M");
        assert_eq!(format_currency(1_000_000.0), "$1.00M");
    }

    #[test]
    fn currency_thousands_are_grouped() {
        assert_eq!(format_currency(93_759.48), "$93,759.48");
        assert_eq!(format_currency(1_000.0), "$1,000.00");
        assert_eq!(format_currency(999_999.994), "$999,999.99");
    }

    #[test]
    fn currency_small_values() {
        assert_eq!(format_currency(606.65), "$606.65");
        assert_eq!(format_currency(1.0), "$1.00");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(0.123_456_78), "$0.123457");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn currency_negative_keeps_sign_after_dollar() {
        assert_eq!(format_currency(-0.5), "$-0.50");
        assert_eq!(format_currency(-1_234.5), "$-1,234.50");
    }

    #[test]
    fn percentage() {
        assert_eq!(format_percentage(-1.2), "-1.20%");
        assert_eq!(format_percentage(0.93), "0.93%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(11.111), "11.11%");
    }

    #[test]
    fn signed_percentage() {
        assert_eq!(format_signed_percentage(3.456), "+3.46%");
        assert_eq!(format_signed_percentage(0.0), "0.00%");
        assert_eq!(format_signed_percentage(-0.5), "-0.50%");
    }

    #[test]
    fn supply_millions_branch() {
        assert_eq!(format_supply(2_000_000.0, "BTC"), "2000000.00M BTC");
    }

    #[test]
    fn supply_small_values() {
        assert_eq!(format_supply(19.85, "BTC"), "19.85 BTC");
        assert_eq!(format_supply(517.31, "SOL"), "517.31 SOL");
        assert_eq!(format_supply(120_000.0, "ETH"), "120,000 ETH");
    }

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(12.3456), "12.346");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(-4_321.5), "-4,321.5");
    }
}
