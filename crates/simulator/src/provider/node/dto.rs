//! DTOs of the node's REST API. Full documentation can be found
//! [here](https://fullnode.mainnet.aptoslabs.com/v1/spec).

use {
    crate::{Address, payload::Payload},
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, serde_as},
};

/// Response of `GET /accounts/{address}`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Account {
    #[serde_as(as = "DisplayFromStr")]
    pub sequence_number: u64,
}

/// Body of `POST /transactions/simulate`.
#[serde_as]
#[derive(Debug, Serialize)]
pub struct SimulateRequest {
    pub sender: Address,
    #[serde_as(as = "DisplayFromStr")]
    pub sequence_number: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_gas_amount: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_unit_price: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub expiration_timestamp_secs: u64,
    pub payload: Payload,
    pub signature: Signature,
}

/// The node refuses to simulate correctly signed transactions, so simulations
/// carry the sender's public key next to an all-zero signature.
#[derive(Debug, Serialize)]
pub struct Signature {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub public_key: String,
    pub signature: String,
}

impl Signature {
    pub fn unsigned(public_key: &str) -> Self {
        Self {
            type_: "ed25519_signature",
            public_key: public_key.to_owned(),
            signature: const_hex::encode_prefixed([0u8; 64]),
        }
    }
}

/// Error body returned by the node for non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct Error {
    pub message: String,
    pub error_code: Option<String>,
    pub vm_error_code: Option<u64>,
}
