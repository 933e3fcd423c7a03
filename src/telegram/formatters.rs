//! Amount formatting for chat replies

/// Format an amount with thousands separators and two decimal places
///
/// Display policy for every number the bot sends: `1350.25` → `"1,350.25"`,
/// `135025` → `"135,025.00"`.
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some(parts) => parts,
        None => (rounded.as_str(), "00"),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_keep_two_decimals() {
        assert_eq!(format_amount(0.5), "0.50");
        assert_eq!(format_amount(999.0), "999.00");
    }

    #[test]
    fn test_thousands_are_grouped() {
        assert_eq!(format_amount(1350.25), "1,350.25");
        assert_eq!(format_amount(135025.0), "135,025.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_rounding_to_cents() {
        assert_eq!(format_amount(74.0566), "74.06");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_amount(-1234.5), "-1,234.50");
    }
}
