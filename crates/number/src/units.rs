//! Conversions between human readable decimal amounts (`"1,234.5"`) and the
//! integer amount of a token's smallest indivisible unit.

use {
    num::{BigUint, Zero},
    std::{fmt, iter, str::FromStr},
};

/// Number of fractional digits separating a token's smallest unit from its
/// display unit, i.e. `display = amount / 10^decimals`.
pub type Decimals = u8;

/// A non-negative amount of a token, counted in its smallest unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenAmount(BigUint);

impl TokenAmount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn get(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<BigUint> for TokenAmount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl From<TokenAmount> for BigUint {
    fn from(value: TokenAmount) -> Self {
        value.0
    }
}

/// Formats the raw integer amount, which is what transaction arguments carry.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parses a raw integer amount (no decimal point, no grouping).
impl FromStr for TokenAmount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ensure_digits(s)?;
        parse_digits(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid character {0:?} in amount")]
    InvalidCharacter(char),
    #[error("amount has no digits")]
    NoDigits,
}

/// Parses a decimal amount into the token's smallest unit.
///
/// Malformed input is logged and treated as zero, so this never fails. Use
/// [`try_parse_units`] to learn why an input was rejected.
pub fn parse_units(text: &str, decimals: Decimals) -> TokenAmount {
    match try_parse_units(text, decimals) {
        Ok(amount) => amount,
        Err(err) => {
            tracing::warn!(?err, ?text, decimals, "unparsable token amount, using zero");
            TokenAmount::zero()
        }
    }
}

/// Parses `[digits]['.' digits]` into the token's smallest unit.
///
/// Blank input is zero. Fractional digits beyond `decimals` are truncated,
/// not rounded. The whole part may be grouped in thousands with `,` exactly
/// as [`format_units`] renders it (`1,234,567`); any other `,` is rejected.
pub fn try_parse_units(text: &str, decimals: Decimals) -> Result<TokenAmount, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(TokenAmount::zero());
    }

    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let whole = ungroup(whole)?;
    let whole = if whole.is_empty() { "0" } else { whole.as_str() };
    ensure_digits(whole)?;
    ensure_digits_or_empty(fraction)?;

    let fraction = fraction
        .chars()
        .chain(iter::repeat('0'))
        .take(usize::from(decimals))
        .collect::<String>();

    let mut amount = parse_digits(whole)? * scale(decimals);
    if !fraction.is_empty() {
        amount += parse_digits(&fraction)?;
    }
    Ok(TokenAmount(amount))
}

/// Renders an amount in display units with `,` grouping of the whole part.
///
/// Trailing fractional zeros are trimmed. An amount without fractional part
/// keeps a single `.0` while its whole part stays below one thousand:
///
/// ```
/// use number::units::format_units;
///
/// assert_eq!(format_units(&0u64.into(), 6), "0");
/// assert_eq!(format_units(&10_000_000u64.into(), 6), "10.0");
/// assert_eq!(format_units(&1_000_000_000_000u64.into(), 6), "1,000,000");
/// assert_eq!(format_units(&123_456_789u64.into(), 6), "123.456789");
/// ```
pub fn format_units(amount: &TokenAmount, decimals: Decimals) -> String {
    if amount.is_zero() {
        return "0".to_owned();
    }

    let scale = scale(decimals);
    let whole = group_thousands(&(&amount.0 / &scale).to_string());
    if decimals == 0 {
        return whole;
    }

    let fraction = format!(
        "{:0>width$}",
        (&amount.0 % &scale).to_string(),
        width = usize::from(decimals)
    );
    match fraction.trim_end_matches('0') {
        "" if whole.contains(',') => whole,
        "" => format!("{whole}.0"),
        fraction => format!("{whole}.{fraction}"),
    }
}

fn scale(decimals: Decimals) -> BigUint {
    BigUint::from(10u8).pow(u32::from(decimals))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Removes thousands separators. Only a leading group of one to three
/// characters followed by groups of exactly three is accepted.
fn ungroup(whole: &str) -> Result<String, ParseError> {
    if !whole.contains(',') {
        return Ok(whole.to_owned());
    }
    let mut groups = whole.split(',');
    let leading = groups.next().unwrap_or_default();
    let well_formed =
        (1..=3).contains(&leading.len()) && groups.clone().all(|group| group.len() == 3);
    if !well_formed {
        return Err(ParseError::InvalidCharacter(','));
    }
    Ok(iter::once(leading).chain(groups).collect())
}

fn ensure_digits(s: &str) -> Result<(), ParseError> {
    if s.is_empty() {
        return Err(ParseError::NoDigits);
    }
    ensure_digits_or_empty(s)
}

fn ensure_digits_or_empty(s: &str) -> Result<(), ParseError> {
    match s.chars().find(|c| !c.is_ascii_digit()) {
        Some(c) => Err(ParseError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

// `BigUint::parse_bytes` also accepts `_` separators, callers validate first.
fn parse_digits(digits: &str) -> Result<BigUint, ParseError> {
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or(ParseError::NoDigits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: u128) -> TokenAmount {
        value.into()
    }

    #[test]
    fn blank_input_is_zero() {
        for decimals in [0, 6, 18] {
            assert_eq!(parse_units("", decimals), TokenAmount::zero());
            assert_eq!(parse_units("   ", decimals), TokenAmount::zero());
        }
    }

    #[test]
    fn parses_whole_and_fractional_parts() {
        assert_eq!(parse_units("1", 6), amount(1_000_000));
        assert_eq!(parse_units("1.5", 6), amount(1_500_000));
        assert_eq!(parse_units(".5", 6), amount(500_000));
        assert_eq!(parse_units("2.", 6), amount(2_000_000));
        assert_eq!(parse_units("0.000001", 6), amount(1));
        assert_eq!(parse_units("42", 0), amount(42));
        assert_eq!(parse_units(" 7.25 ", 2), amount(725));
    }

    #[test]
    fn truncates_excess_precision() {
        assert_eq!(parse_units("1234.5678", 2), amount(123_456));
        assert_eq!(parse_units("0.9999999", 6), amount(999_999));
        assert_eq!(parse_units("3.99", 0), amount(3));
    }

    #[test]
    fn malformed_input_is_zero() {
        for text in ["abc", "1.2.3", "-1", "+1", "1e5", "1_000", "0x10", "1. 5"] {
            assert_eq!(parse_units(text, 6), TokenAmount::zero(), "{text}");
            assert!(try_parse_units(text, 6).is_err(), "{text}");
        }
        assert_eq!(
            try_parse_units("1.2.3", 6),
            Err(ParseError::InvalidCharacter('.'))
        );
        assert_eq!(
            try_parse_units("-1", 6),
            Err(ParseError::InvalidCharacter('-'))
        );
    }

    #[test]
    fn accepts_grouped_whole_part() {
        assert_eq!(parse_units("1,000,000", 6), amount(1_000_000_000_000));
        assert_eq!(parse_units("1,234.5", 2), amount(123_450));
        assert_eq!(parse_units("12,345", 0), amount(12_345));
    }

    #[test]
    fn rejects_misplaced_commas() {
        for text in [
            "1,2", "1,5", "1,,2", "1,,2.5", ",5", ",", "1,", "1,0000", "1234,567", "1.000,5",
        ] {
            assert_eq!(parse_units(text, 6), TokenAmount::zero(), "{text}");
            assert!(try_parse_units(text, 6).is_err(), "{text}");
        }
        assert_eq!(
            try_parse_units("1,2", 6),
            Err(ParseError::InvalidCharacter(','))
        );
        assert_eq!(
            try_parse_units("1,0a0", 6),
            Err(ParseError::InvalidCharacter('a'))
        );
    }

    #[test]
    fn parses_beyond_u128() {
        let parsed = parse_units("340282366920938463463374607431768211456", 18);
        assert_eq!(
            parsed.to_string(),
            "340282366920938463463374607431768211456000000000000000000"
        );
    }

    #[test]
    fn formats_zero_for_all_decimals() {
        for decimals in [0, 1, 6, 18] {
            assert_eq!(format_units(&TokenAmount::zero(), decimals), "0");
        }
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_units(&amount(123_456_789), 6), "123.456789");
        assert_eq!(format_units(&amount(1_000_000_000_000), 6), "1,000,000");
        assert_eq!(format_units(&amount(1), 6), "0.000001");
        assert_eq!(format_units(&amount(1_500_000), 6), "1.5");
        assert_eq!(format_units(&amount(1_234_567_890), 2), "12,345,678.9");
        assert_eq!(format_units(&amount(1_234_567), 0), "1,234,567");
        assert_eq!(format_units(&amount(999), 0), "999");
    }

    #[test]
    fn formats_grouped_amounts_with_fraction() {
        assert_eq!(format_units(&amount(1_000_500_000), 6), "1,000.5");
        assert_eq!(format_units(&amount(1_234_567_000_001), 6), "1,234,567.000001");
        assert_eq!(format_units(&amount(100_050), 2), "1,000.5");
        assert_eq!(parse_units("1,000.5", 6), amount(1_000_500_000));
    }

    #[test]
    fn trims_trailing_fractional_zeros() {
        assert_eq!(format_units(&amount(10_000_000), 6), "10.0");
        assert_eq!(format_units(&amount(999_000_000), 6), "999.0");
        assert_eq!(format_units(&amount(1_000_000_000), 6), "1,000");
        assert_eq!(format_units(&amount(10_100_000), 6), "10.1");
    }

    #[test]
    fn trimmed_values_restore_on_parse() {
        // "10.0" is padded back to six digits
        assert_eq!(
            parse_units(&format_units(&amount(10_000_000), 6), 6),
            amount(10_000_000)
        );
        // "10.1" restores the zeros that display dropped
        assert_eq!(parse_units("10.1", 6), amount(10_100_000));
        assert_eq!(parse_units("10.100000", 6), amount(10_100_000));
    }

    #[test]
    fn clean_values_round_trip() {
        for value in [1u128, 7, 123_456_789, 1_234_567_890_123, 999_999, 5_000_001] {
            let formatted = format_units(&amount(value), 6);
            assert_eq!(parse_units(&formatted, 6), amount(value), "{formatted}");
        }
    }

    #[test]
    fn raw_integer_string() {
        assert_eq!("1500000".parse::<TokenAmount>(), Ok(amount(1_500_000)));
        assert_eq!(amount(1_500_000).to_string(), "1500000");
        assert!("1.5".parse::<TokenAmount>().is_err());
        assert!("".parse::<TokenAmount>().is_err());
    }
}
