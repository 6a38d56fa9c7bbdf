use {
    crate::units::TokenAmount,
    num::BigUint,
    serde::{
        Deserialize,
        Deserializer,
        Serialize,
        Serializer,
        de::{self, Visitor},
    },
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

/// Serialize [`BigUint`] as a decimal string and deserialize it from either a
/// decimal string or a JSON integer. Ledger nodes encode 64 and 128 bit
/// integers as strings, smaller ones as numbers.
pub struct DecimalUint;

impl<'de> DeserializeAs<'de, BigUint> for DecimalUint {
    fn deserialize_as<D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UintVisitor;

        impl Visitor<'_> for UintVisitor {
            type Value = BigUint;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "an unsigned integer encoded as a decimal string or a number"
                )
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.into())
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.parse::<TokenAmount>()
                    .map(BigUint::from)
                    .map_err(|err| E::custom(format!("failed to decode {s:?} as decimal: {err}")))
            }
        }

        deserializer.deserialize_any(UintVisitor)
    }
}

impl SerializeAs<BigUint> for DecimalUint {
    fn serialize_as<S>(source: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(source)
    }
}

impl Serialize for TokenAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        DecimalUint::serialize_as(self.get(), serializer)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        DecimalUint::deserialize_as(deserializer).map(TokenAmount::new)
    }
}
