use {
    crate::{
        Address,
        EntryFunction,
        Simulation,
        util::{self, http::roundtrip},
    },
    chrono::Utc,
    reqwest::Url,
    std::time::Duration,
};

mod dto;

/// A ledger node that dry-runs entry functions.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Node: Send + Sync {
    /// Simulates `call` on top of the current ledger state.
    ///
    /// A transaction that would abort is reported through
    /// [`Simulation::success`], not as an error.
    async fn simulate(&self, call: &EntryFunction) -> Result<Simulation, Error>;
}

/// Bindings to the node's REST API.
pub struct Http {
    client: reqwest::Client,
    config: Config,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The base URL of the node API, including its version prefix, e.g.
    /// `https://fullnode.testnet.aptoslabs.com/v1`.
    pub url: Url,
    /// Ed25519 public key of the sender, hex encoded.
    pub public_key: String,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    /// How far in the future simulated transactions expire.
    pub expiration: Duration,
}

impl Http {
    pub fn new(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.config.url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn sequence_number(&self, account: &Address) -> Result<u64, Error> {
        let account = roundtrip!(
            <dto::Account, dto::Error>;
            self.client.get(self.endpoint(&["accounts", &account.to_string()]))
        )
        .await?;
        Ok(account.sequence_number)
    }

    fn expiration_timestamp(&self) -> u64 {
        u64::try_from(Utc::now().timestamp())
            .unwrap_or_default()
            .saturating_add(self.config.expiration.as_secs())
    }
}

#[async_trait::async_trait]
impl Node for Http {
    async fn simulate(&self, call: &EntryFunction) -> Result<Simulation, Error> {
        let request = dto::SimulateRequest {
            sender: call.sender,
            sequence_number: self.sequence_number(&call.sender).await?,
            max_gas_amount: self.config.max_gas_amount,
            gas_unit_price: self.config.gas_unit_price,
            expiration_timestamp_secs: self.expiration_timestamp(),
            payload: call.to_payload(),
            signature: dto::Signature::unsigned(&self.config.public_key),
        };
        let simulations = roundtrip!(
            <Vec<Simulation>, dto::Error>;
            self.client
                .post(self.endpoint(&["transactions", "simulate"]))
                .json(&request)
        )
        .await?;
        let simulation = simulations
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse)?;
        tracing::debug!(
            function = %call.function_id(),
            success = simulation.success,
            vm_status = %simulation.vm_status,
            gas_used = simulation.gas_used,
            "simulated entry function"
        );
        Ok(simulation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] util::http::Error),
    #[error("node rejected the request: {message}")]
    Api {
        message: String,
        error_code: Option<String>,
        vm_error_code: Option<u64>,
    },
    #[error("node returned no simulated transaction")]
    EmptyResponse,
}

impl From<util::http::RoundtripError<dto::Error>> for Error {
    fn from(err: util::http::RoundtripError<dto::Error>) -> Self {
        match err {
            util::http::RoundtripError::Http(err) => Self::Http(err),
            util::http::RoundtripError::Api(err) => Self::Api {
                message: err.message,
                error_code: err.error_code,
                vm_error_code: err.vm_error_code,
            },
        }
    }
}
