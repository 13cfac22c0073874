// ==========================================
// BQC Generator - amount / date formatting
// ==========================================
// Pure string formatting for the rendered document.
// Inputs are in Rupees unless the function name says otherwise.
// ==========================================

use chrono::NaiveDate;

/// 1 Crore = 1,00,00,000 Rupees
pub const RUPEES_PER_CRORE: f64 = 10_000_000.0;

/// 1 Lakh = 1,00,000 Rupees
pub const RUPEES_PER_LAKH: f64 = 100_000.0;

pub fn crore_to_rupees(crore: f64) -> f64 {
    crore * RUPEES_PER_CRORE
}

pub fn lakh_to_rupees(lakh: f64) -> f64 {
    lakh * RUPEES_PER_LAKH
}

// ==========================================
// CurrencyFormat
// ==========================================

/// Scale an absolute Rupee amount into Crore / Lacs wording
///
/// - `>= 1,00,00,000` → `"2.50 Crore"`
/// - `>= 1,00,000` → `"5.00 Lacs"`
/// - otherwise the literal amount with thousands separators
pub fn currency_format(amount: f64) -> String {
    let amount = sanitize(amount);
    let (sign, abs) = split_sign(amount);

    if abs >= RUPEES_PER_CRORE {
        format!("{}{:.2} Crore", sign, abs / RUPEES_PER_CRORE)
    } else if abs >= RUPEES_PER_LAKH {
        format!("{}{:.2} Lacs", sign, abs / RUPEES_PER_LAKH)
    } else {
        format!("{}{}", sign, group_digits(abs, false))
    }
}

/// Absolute Rupee amount with Indian comma grouping (`12,34,567.50`)
pub fn format_indian_rupees(amount: f64) -> String {
    let amount = sanitize(amount);
    let (sign, abs) = split_sign(amount);
    format!("{}{}", sign, group_digits(abs, true))
}

/// Decimal without trailing zeros (`2.5`, `20`, `0.85`), at most `max_dp` places
pub fn format_decimal(value: f64, max_dp: usize) -> String {
    let value = sanitize(value);
    let formatted = format!("{:.*}", max_dp, value);
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// ==========================================
// DateFormat
// ==========================================

/// Render a native date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse `yyyy-mm-dd` or `dd-mm-yyyy` (an ISO timestamp suffix is ignored)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // "2024-03-05T10:00:00Z" → "2024-03-05"
    let head = trimmed.get(..10).unwrap_or(trimmed);

    ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(head, fmt).ok())
}

/// Render a date string as `dd/mm/yyyy`; None when it is not a recognised date
pub fn format_date_str(raw: &str) -> Option<String> {
    parse_date(raw).map(format_date)
}

/// `dd-mm-yyyy`, used in generated file names
pub fn format_file_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

// ==========================================
// helpers
// ==========================================

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn split_sign(value: f64) -> (&'static str, f64) {
    if value < 0.0 {
        ("-", -value)
    } else {
        ("", value)
    }
}

/// Group the integer part; decimals shown only when non-zero after rounding to paise
fn group_digits(abs: f64, indian: bool) -> String {
    let paise = (abs * 100.0).round() as u128;
    let whole = paise / 100;
    let frac = paise % 100;

    let digits = whole.to_string();
    let grouped = if indian {
        group_indian(&digits)
    } else {
        group_western(&digits)
    };

    if frac == 0 {
        grouped
    } else {
        format!("{}.{:02}", grouped, frac)
    }
}

fn group_western(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_bytes = head.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, b) in head_bytes.iter().enumerate() {
        if i > 0 && (head_bytes.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_format_crore_and_lacs() {
        assert_eq!(currency_format(crore_to_rupees(2.0)), "2.00 Crore");
        assert_eq!(currency_format(10_000_000.0), "1.00 Crore");
        assert_eq!(currency_format(9_999_999.0), "100.00 Lacs");
        assert_eq!(currency_format(250_000.0), "2.50 Lacs");
        assert_eq!(currency_format(100_000.0), "1.00 Lacs");
    }

    #[test]
    fn test_currency_format_literal() {
        assert_eq!(currency_format(99_999.0), "99,999");
        assert_eq!(currency_format(1_234.5), "1,234.50");
        assert_eq!(currency_format(0.0), "0");
        assert_eq!(currency_format(f64::NAN), "0");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_indian_rupees(250_000.0), "2,50,000");
        assert_eq!(format_indian_rupees(12_345_678.5), "1,23,45,678.50");
        assert_eq!(format_indian_rupees(999.0), "999");
        assert_eq!(format_indian_rupees(1_000.0), "1,000");
        assert_eq!(format_indian_rupees(-2_000_000.0), "-20,00,000");
    }

    #[test]
    fn test_format_decimal_trims() {
        assert_eq!(format_decimal(2.5, 2), "2.5");
        assert_eq!(format_decimal(20.0, 2), "20");
        assert_eq!(format_decimal(0.6, 4), "0.6");
        assert_eq!(format_decimal(-0.0001, 2), "0");
    }

    #[test]
    fn test_date_formats() {
        let expected = Some("05/03/2024".to_string());
        assert_eq!(format_date_str("2024-03-05"), expected);
        assert_eq!(format_date_str("05-03-2024"), expected);
        assert_eq!(format_date_str("2024-03-05T10:30:00Z"), expected);
        assert_eq!(format_date_str("not a date"), None);
        assert_eq!(format_date_str("  "), None);

        let d = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(format_date(d), "01/12/2025");
        assert_eq!(format_file_date(d), "01-12-2025");
    }
}
