use {
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::{
        fmt::{self, Debug, Display, Formatter},
        str::FromStr,
    },
};

/// A 32 byte ledger account identifier.
///
/// Accounts are written in hex with or without a `0x` prefix, in any case,
/// and either zero-padded to 64 digits or in their short form (`0x1`). All
/// spellings of the same account parse to the same value, so comparing
/// addresses is plain equality.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Address(pub [u8; 32]);

impl Address {
    pub const LENGTH: usize = 32;
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&const_hex::encode_prefixed(self.0))
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(ParseAddressError::Empty);
        }
        if digits.len() > Self::LENGTH * 2 {
            return Err(ParseAddressError::TooLong(digits.len()));
        }
        let padded = format!("{digits:0>64}");
        Ok(Self(const_hex::decode_to_array(padded)?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseAddressError {
    #[error("address has no hex digits")]
    Empty,
    #[error("address has {0} hex digits, at most 64 are allowed")]
    TooLong(usize),
    #[error(transparent)]
    Hex(#[from] const_hex::FromHexError),
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|err| de::Error::custom(format!("failed to decode {s:?} as address: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_padded_forms_are_equal() {
        let short: Address = "0x1".parse().unwrap();
        let padded: Address =
            "0x0000000000000000000000000000000000000000000000000000000000000001"
                .parse()
                .unwrap();
        assert_eq!(short, padded);
        assert_eq!(short, "1".parse().unwrap());
    }

    #[test]
    fn case_insensitive() {
        let lower: Address = "0xabcdef".parse().unwrap();
        let upper: Address = "0XABCDEF".parse().unwrap();
        let mixed: Address = "0x0000AbCdEf".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn displays_padded_lowercase() {
        let address: Address = "0xABC".parse().unwrap();
        assert_eq!(
            address.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000abc"
        );
    }

    #[test]
    fn rejects_invalid_addresses() {
        assert!(matches!(
            "0x".parse::<Address>(),
            Err(ParseAddressError::Empty)
        ));
        assert!(matches!(
            "".parse::<Address>(),
            Err(ParseAddressError::Empty)
        ));
        assert!(matches!(
            format!("0x{}", "1".repeat(65)).parse::<Address>(),
            Err(ParseAddressError::TooLong(65))
        ));
        assert!(matches!(
            "0xzz".parse::<Address>(),
            Err(ParseAddressError::Hex(_))
        ));
    }

    #[test]
    fn serde_uses_display_form() {
        let address: Address = serde_json::from_str(r#""0x2""#).unwrap();
        assert_eq!(address, "0x02".parse().unwrap());
        assert_eq!(
            serde_json::to_string(&address).unwrap(),
            r#""0x0000000000000000000000000000000000000000000000000000000000000002""#
        );
    }
}
