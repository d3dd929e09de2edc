//! Fixed-point formatting between scaled integer amounts and decimal strings.
//!
//! Chain nodes report balances as integers in the token's smallest unit
//! (satoshis, lamports, MIST). Human-facing records carry the same value as
//! a decimal string with exactly `decimals` fractional digits.

/// Format a scaled integer amount as a fixed-point decimal string.
///
/// The result always carries exactly `decimals` fractional digits,
/// including trailing zeros: `format_units(1_000_000_000, 9)` is
/// `"1.000000000"`. With `decimals == 0` the integer is returned as-is.
///
/// The split is done on the decimal digits rather than by dividing, so
/// any `decimals` is handled, including values past the precision of
/// u128. Decimals arrive here straight from node responses.
pub fn format_units(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let digits = value.to_string();
    let decimals = decimals as usize;
    if digits.len() <= decimals {
        format!("0.{digits:0>decimals$}")
    } else {
        let (whole, frac) = digits.split_at(digits.len() - decimals);
        format!("{whole}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_decimals_is_plain_integer() {
        assert_eq!(format_units(42, 0), "42");
    }

    #[test]
    fn one_sol_in_lamports() {
        assert_eq!(format_units(1_000_000_000, 9), "1.000000000");
    }

    #[test]
    fn fractional_only() {
        assert_eq!(format_units(1, 9), "0.000000001");
    }

    #[test]
    fn trailing_zeros_are_kept() {
        assert_eq!(format_units(1_500_000, 6), "1.500000");
    }

    #[test]
    fn zero_value() {
        assert_eq!(format_units(0, 8), "0.00000000");
    }

    #[test]
    fn satoshi_amounts() {
        assert_eq!(format_units(123_456_789, 8), "1.23456789");
        assert_eq!(format_units(100_000_000, 8), "1.00000000");
    }

    #[test]
    fn decimals_past_u128_precision_do_not_overflow() {
        // 10^39 does not fit in u128; the digit split must not try to
        // compute it. Node-supplied decimals land here unchecked.
        assert_eq!(format_units(1, 39), format!("0.{}1", "0".repeat(38)));
        assert_eq!(format_units(0, 255), format!("0.{}", "0".repeat(255)));
        // u128::MAX has exactly 39 digits, so it is all fraction here.
        assert_eq!(format_units(u128::MAX, 39), format!("0.{}", u128::MAX));
        assert_eq!(format_units(u128::MAX, 40), format!("0.0{}", u128::MAX));
    }

    #[test]
    fn whole_and_fraction_split_at_the_digit_boundary() {
        assert_eq!(format_units(1_000_000_000, 38), format!("0.{}1000000000", "0".repeat(28)));
        assert_eq!(format_units(10, 1), "1.0");
        assert_eq!(format_units(10, 2), "0.10");
    }

    #[test]
    fn parse_back_roundtrip() {
        // Parsing the formatted string and rescaling recovers the input
        // exactly for every decimals in the supported range.
        for decimals in 0..=18u32 {
            for value in [0u128, 1, 7, 999, 1_000_000_007, u64::MAX as u128] {
                let formatted = format_units(value, decimals);
                let rescaled: u128 = if decimals == 0 {
                    formatted.parse().unwrap()
                } else {
                    let (whole, frac) = formatted.split_once('.').unwrap();
                    assert_eq!(frac.len(), decimals as usize);
                    whole.parse::<u128>().unwrap() * 10u128.pow(decimals)
                        + frac.parse::<u128>().unwrap()
                };
                assert_eq!(rescaled, value, "roundtrip failed for {value} @ {decimals}");
            }
        }
    }
}
