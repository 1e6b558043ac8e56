//! Display formatting for dashboard numbers.
//!
//! Non-finite inputs format as zero so a bad value never renders as `NaN`.

use chrono::NaiveDate;

const MAGNITUDES: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

/// `$12,345` style currency with `fraction_digits` decimals.
pub fn format_currency(amount: f64, fraction_digits: usize) -> String {
    let amount = finite_or_zero(amount);
    let digits = format!("{:.*}", fraction_digits, amount.abs());
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    match fraction {
        Some(fraction) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(whole)),
    }
}

/// Fixed decimals plus a `%` suffix.
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, finite_or_zero(value))
}

/// Largest applicable unit with one decimal: `1.2K`, `3M`, `5.6B`.
pub fn format_abbreviated(num: f64) -> String {
    let num = finite_or_zero(num);
    match MAGNITUDES.iter().find(|(unit, _)| num >= *unit) {
        Some((unit, symbol)) => {
            let scaled = format!("{:.1}", num / unit);
            let trimmed = scaled.strip_suffix(".0").unwrap_or(&scaled);
            format!("{trimmed}{symbol}")
        }
        None => num.to_string(),
    }
}

/// Integer with thousands separators: `1,845`.
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// `Oct 19, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(12_345.0, 0), "$12,345");
        assert_eq!(format_currency(7_020.48, 2), "$7,020.48");
        assert_eq!(format_currency(1_234_567.891, 2), "$1,234,567.89");
        assert_eq!(format_currency(45.0, 2), "$45.00");
        assert_eq!(format_currency(999.0, 0), "$999");
    }

    #[test]
    fn test_currency_sign_and_zero() {
        assert_eq!(format_currency(-1_234.5, 2), "-$1,234.50");
        assert_eq!(format_currency(-0.001, 2), "$0.00");
        assert_eq!(format_currency(f64::NAN, 0), "$0");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(8.391, 2), "8.39%");
        assert_eq!(format_percentage(12.34, 1), "12.3%");
        assert_eq!(format_percentage(f64::INFINITY, 1), "0.0%");
    }

    #[test]
    fn test_abbreviated_magnitudes() {
        assert_eq!(format_abbreviated(154_000.0), "154K");
        assert_eq!(format_abbreviated(1_240.0), "1.2K");
        assert_eq!(format_abbreviated(3_000_000.0), "3M");
        assert_eq!(format_abbreviated(5_640_000_000.0), "5.6B");
        assert_eq!(format_abbreviated(999.0), "999");
        assert_eq!(format_abbreviated(12.5), "12.5");
    }

    #[test]
    fn test_count_grouping() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1_845), "1,845");
        assert_eq!(format_count(208_333), "208,333");
        assert_eq!(format_count(1_000_000), "1,000,000");
    }

    #[test]
    fn test_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 9).unwrap();
        assert_eq!(format_date(date), "Oct 9, 2026");
    }
}
