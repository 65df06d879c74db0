//! ASCII decimal parameter conversion
//!
//! Parameters are unsigned and written most significant digit first.
//! There is no sign, no whitespace and no radix prefix.

/// Errors produced while converting a numeric parameter field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// The parameter field contains no characters
    Empty,
    /// A byte outside `'0'..='9'` was found
    InvalidDigit {
        /// Position of the offending byte within the field
        index: usize,
        /// The offending byte
        byte: u8,
    },
    /// The value does not fit in a `u32`
    Overflow,
    /// The value is valid decimal but outside the range the command accepts
    OutOfRange,
}

/// Convert an ASCII decimal field to an integer
///
/// Digits accumulate left to right from zero: `result = result * 10 + digit`.
/// The whole field must be digits; the first non-digit aborts the conversion.
pub fn parse_decimal(field: &[u8]) -> Result<u32, ParseError> {
    if field.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut result: u32 = 0;
    for (index, &byte) in field.iter().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(ParseError::InvalidDigit { index, byte });
        }
        let digit = u32::from(byte - b'0');
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add(digit))
            .ok_or(ParseError::Overflow)?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_four_digits() {
        assert_eq!(parse_decimal(b"2048"), Ok(2048));
        assert_eq!(parse_decimal(b"4095"), Ok(4095));
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(parse_decimal(b"0000"), Ok(0));
        assert_eq!(parse_decimal(b"0042"), Ok(42));
    }

    #[test]
    fn test_empty_field() {
        assert_eq!(parse_decimal(b""), Err(ParseError::Empty));
    }

    #[test]
    fn test_non_digit_reports_position() {
        assert_eq!(
            parse_decimal(b"abcd"),
            Err(ParseError::InvalidDigit { index: 0, byte: b'a' })
        );
        assert_eq!(
            parse_decimal(b"12 4"),
            Err(ParseError::InvalidDigit { index: 2, byte: b' ' })
        );
    }

    #[test]
    fn test_sign_is_not_a_digit() {
        assert_eq!(
            parse_decimal(b"-1"),
            Err(ParseError::InvalidDigit { index: 0, byte: b'-' })
        );
    }

    #[test]
    fn test_overflow_detected() {
        assert_eq!(parse_decimal(b"4294967295"), Ok(u32::MAX));
        assert_eq!(parse_decimal(b"4294967296"), Err(ParseError::Overflow));
    }

    proptest! {
        #[test]
        fn test_decodes_every_u32(value in any::<u32>()) {
            let mut buf = [0u8; 10];
            let mut len = 0;
            let mut rest = value;
            loop {
                buf[len] = b'0' + (rest % 10) as u8;
                len += 1;
                rest /= 10;
                if rest == 0 {
                    break;
                }
            }
            buf[..len].reverse();
            prop_assert_eq!(parse_decimal(&buf[..len]), Ok(value));
        }

        #[test]
        fn test_any_non_digit_is_rejected(
            prefix in "[0-9]{0,3}",
            bad in any::<u8>().prop_filter("non-digit", |b| !b.is_ascii_digit()),
        ) {
            let mut field = [0u8; 4];
            let n = prefix.len();
            field[..n].copy_from_slice(prefix.as_bytes());
            field[n] = bad;
            prop_assert_eq!(
                parse_decimal(&field[..=n]),
                Err(ParseError::InvalidDigit { index: n, byte: bad })
            );
        }
    }
}
