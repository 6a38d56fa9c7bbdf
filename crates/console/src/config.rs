use {
    number::Decimals,
    serde::Deserialize,
    simulator::{Address, provider::node},
    std::{fmt::Debug, path::Path, time::Duration},
    url::Url,
};

/// Console configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Account that publishes the facility modules.
    pub module_address: Option<Address>,

    /// Facility operated on when neither the command line nor the persisted
    /// operator state select one.
    pub facility_address: Option<Address>,

    /// Decimals of the facility's principal token.
    #[serde(default = "default_decimals")]
    pub decimals: Decimals,

    /// Advance rate shown when a simulation does not reveal one, as a
    /// fraction (`0.75` is 75%).
    #[serde(default)]
    pub fallback_advance_rate: f64,

    pub node: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Node {
    /// Base URL of the node REST API including the version prefix.
    pub url: Url,

    /// The operator account simulations are run as.
    pub sender: Address,

    /// Ed25519 public key of `sender`.
    pub public_key: String,

    #[serde(default = "default_max_gas_amount")]
    pub max_gas_amount: u64,

    #[serde(default = "default_gas_unit_price")]
    pub gas_unit_price: u64,

    #[serde(with = "humantime_serde", default = "default_expiration")]
    pub expiration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module_address: None,
            facility_address: None,
            decimals: default_decimals(),
            fallback_advance_rate: 0.,
            node: None,
        }
    }
}

impl From<&Node> for node::Config {
    fn from(value: &Node) -> Self {
        Self {
            url: value.url.clone(),
            public_key: value.public_key.clone(),
            max_gas_amount: value.max_gas_amount,
            gas_unit_price: value.gas_unit_price,
            expiration: value.expiration,
        }
    }
}

fn default_decimals() -> Decimals {
    6
}

fn default_max_gas_amount() -> u64 {
    200_000
}

fn default_gas_unit_price() -> u64 {
    100
}

fn default_expiration() -> Duration {
    Duration::from_secs(600)
}

/// Load the console configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> Config {
    let data = tokio::fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    unwrap_or_log(toml::de::from_str::<Config>(&data), &path)
}

/// Unwraps result or logs a `TOML` parsing error.
fn unwrap_or_log<T, E, P>(result: Result<T, E>, path: &P) -> T
where
    E: Debug,
    P: Debug,
{
    result.unwrap_or_else(|err| {
        if std::env::var("TOML_TRACE_ERROR").is_ok_and(|v| v == "1") {
            panic!("failed to parse TOML config at {path:?}: {err:#?}")
        } else {
            panic!(
                "failed to parse TOML config at: {path:?}. Set TOML_TRACE_ERROR=1 to print \
                 parsing error but this may leak secrets."
            )
        }
    })
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[tokio::test]
    async fn loads_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            module-address = "0xc0ffee"
            facility-address = "0xFAC11"
            decimals = 8
            fallback-advance-rate = 0.75

            [node]
            url = "https://fullnode.testnet.aptoslabs.com/v1"
            sender = "0x5"
            public-key = "0xabcd"
            expiration = "2m"
            "#
        )
        .unwrap();

        let config = load(file.path()).await;
        assert_eq!(config.module_address, Some("0xc0ffee".parse().unwrap()));
        assert_eq!(config.facility_address, Some("0xfac11".parse().unwrap()));
        assert_eq!(config.decimals, 8);
        assert_eq!(config.fallback_advance_rate, 0.75);

        let node = config.node.unwrap();
        assert_eq!(node.sender, "0x5".parse().unwrap());
        assert_eq!(node.max_gas_amount, 200_000);
        assert_eq!(node.gas_unit_price, 100);
        assert_eq!(node.expiration, Duration::from_secs(120));
        assert_eq!(
            node::Config::from(&node).url.as_str(),
            "https://fullnode.testnet.aptoslabs.com/v1"
        );
    }

    #[tokio::test]
    async fn empty_config_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(load(file.path()).await, Config::default());
    }

    #[tokio::test]
    #[should_panic(expected = "failed to parse TOML config")]
    async fn rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "decimal = 6").unwrap();
        load(file.path()).await;
    }
}
