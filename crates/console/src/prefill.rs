//! Initial form values carried in a URL query, e.g. links shared between
//! operators such as `...?facility=0xfac11&amount=1500000.5&rate=0.8`.

use {
    number::{Decimals, TokenAmount},
    simulator::Address,
};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Prefill {
    pub facility: Option<Address>,
    /// Principal amount as typed, parsed lazily with the token's decimals.
    pub amount: Option<String>,
    pub interest: Option<String>,
    /// Fallback advance rate as a fraction.
    pub rate: Option<f64>,
}

impl Prefill {
    /// Reads the prefill from a query string. A full URL is accepted too, in
    /// which case only its query is considered.
    ///
    /// Unknown keys are ignored and malformed addresses and rates are
    /// dropped. Amounts are kept verbatim.
    pub fn from_query(query: &str) -> Self {
        let query = query.split_once('?').map_or(query, |(_, query)| query);
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        let mut prefill = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "facility" => match value.parse() {
                    Ok(address) => prefill.facility = Some(address),
                    Err(err) => tracing::warn!(?err, %value, "ignoring malformed facility"),
                },
                "amount" => prefill.amount = Some(value.into_owned()),
                "interest" => prefill.interest = Some(value.into_owned()),
                "rate" => match value.parse::<f64>() {
                    Ok(rate) if rate.is_finite() => prefill.rate = Some(rate),
                    _ => tracing::warn!(%value, "ignoring malformed rate"),
                },
                _ => (),
            }
        }
        prefill
    }

    pub fn amount(&self, decimals: Decimals) -> Option<TokenAmount> {
        self.amount
            .as_deref()
            .map(|amount| number::parse_units(amount, decimals))
    }

    pub fn interest(&self, decimals: Decimals) -> Option<TokenAmount> {
        self.interest
            .as_deref()
            .map(|interest| number::parse_units(interest, decimals))
    }
}
