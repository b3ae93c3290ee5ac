//! Decimal quantization and pt-BR display formatting.
//!
//! CRITICAL: Never use floating-point for money or hour calculations.
//! Every derivation step quantizes to 2 decimal places with
//! round-half-up, matching how the figures are persisted.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Quantizes a monetary or hour quantity to 2 decimal places, round-half-up.
#[must_use]
pub fn quantize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a quantity for display with pt-BR conventions:
/// thousands grouped with `.`, decimal separator `,`, always 2 places.
///
/// `1234.5` becomes `1.234,50`; `-1000` becomes `-1.000,00`.
#[must_use]
pub fn format_decimal_br(value: Decimal) -> String {
    let quantized = quantize(value);
    let text = quantized.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, format!("{frac:0<2}")),
        None => (unsigned, "00".to_string()),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    format!("{sign}{grouped},{frac_part}")
}

/// Formats a date as `dd/mm/YYYY`.
#[must_use]
pub fn format_date_br(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

/// Formats a boolean as `Sim`/`Nao`.
#[must_use]
pub fn format_bool_br(value: bool) -> &'static str {
    if value { "Sim" } else { "Nao" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.01))]
    #[case(dec!(10.004), dec!(10.00))]
    #[case(dec!(-10.005), dec!(-10.01))]
    #[case(dec!(7), dec!(7))]
    fn test_quantize_rounds_half_up(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(quantize(input), expected);
    }

    #[test]
    fn test_quantize_is_idempotent() {
        let once = quantize(dec!(3.14159));
        assert_eq!(quantize(once), once);
    }

    #[rstest]
    #[case(dec!(1234.5), "1.234,50")]
    #[case(dec!(1234567.89), "1.234.567,89")]
    #[case(dec!(999), "999,00")]
    #[case(dec!(0), "0,00")]
    #[case(dec!(-1000), "-1.000,00")]
    fn test_format_decimal_br(#[case] input: Decimal, #[case] expected: &str) {
        assert_eq!(format_decimal_br(input), expected);
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date_br(date), "07/03/2025");
    }

    #[test]
    fn test_format_bool() {
        assert_eq!(format_bool_br(true), "Sim");
        assert_eq!(format_bool_br(false), "Nao");
    }
}
