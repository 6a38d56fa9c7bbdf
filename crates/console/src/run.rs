use {
    crate::{
        cli,
        config::{self, Config},
        flows::{self, Amounts, Flow},
        prefill::Prefill,
        state::{self, Store},
        stepper,
    },
    anyhow::{Context, Result},
    clap::Parser,
    number::{Decimals, TokenAmount},
    serde::Deserialize,
    simulator::{Address, Change, Simulation, advance_rate, provider},
    std::path::Path,
};

/// Runs the console and exits the process with a non-zero code on failure.
pub async fn start(args: impl Iterator<Item = String>) {
    if let Err(err) = run(args).await {
        tracing::error!(?err, "command failed");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

pub async fn run(args: impl Iterator<Item = String>) -> Result<()> {
    let args = cli::Args::parse_from(args);
    observe::tracing::initialize(&observe::Config::new(&args.log, args.log_json));
    tracing::debug!("running facility console with {args:#?}");

    let config = match &args.config {
        Some(path) => config::load(path).await,
        None => Config::default(),
    };
    let store = state::JsonFile::new(args.state);

    match args.command {
        cli::Command::Parse { text, decimals } => {
            let amount = number::parse_units(&text, decimals.unwrap_or(config.decimals));
            println!("{amount}");
        }
        cli::Command::Format { amount, decimals } => {
            println!(
                "{}",
                number::format_units(&amount, decimals.unwrap_or(config.decimals))
            );
        }
        cli::Command::AdvanceRate {
            changes,
            facility,
            fallback_rate,
        } => {
            let changes = read_changes(&changes).await?;
            let facility = select_facility(facility, None, &store, &config)?;
            let fallback_rate = fallback_rate.unwrap_or(config.fallback_advance_rate);
            println!(
                "{}",
                advance_rate::effective_advance_rate(&changes, &facility, fallback_rate)
            );
        }
        cli::Command::SelectFacility { address } => {
            let mut state = store.load()?;
            state.selected_facility = Some(address);
            store.save(&state)?;
            println!("selected facility {address}");
        }
        cli::Command::Simulate {
            flow,
            amount,
            interest,
            facility,
            query,
        } => {
            let prefill = query
                .as_deref()
                .map(Prefill::from_query)
                .unwrap_or_default();
            let facility = select_facility(facility, prefill.facility, &store, &config)?;
            let amounts = amounts(flow, amount, interest, &prefill, config.decimals);
            let fallback_rate = prefill.rate.unwrap_or(config.fallback_advance_rate);
            simulate(&config, flow, facility, &amounts, fallback_rate).await?;
        }
    }
    Ok(())
}

async fn simulate(
    config: &Config,
    flow: Flow,
    facility: Address,
    amounts: &Amounts,
    fallback_rate: f64,
) -> Result<()> {
    let node_config = config
        .node
        .as_ref()
        .context("simulating requires a [node] section in the configuration")?;
    let modules = config
        .module_address
        .context("simulating requires module-address in the configuration")?;

    let steps = flows::Facility {
        modules,
        facility,
        sender: node_config.sender,
    }
    .steps(flow, amounts);
    if steps.is_empty() {
        println!("nothing to do: all amounts are zero");
        return Ok(());
    }

    let node = provider::Http::new(node_config.into());
    let simulations = stepper::simulate(&steps, &node).await?;
    for (step, simulation) in steps.iter().zip(&simulations) {
        println!(
            "{}: {} (gas used {})",
            step.label, simulation.vm_status, simulation.gas_used
        );
    }

    let changes = simulations
        .last()
        .map(|simulation| simulation.changes.as_slice())
        .unwrap_or_default();
    for value in advance_rate::attested_values(changes, &facility) {
        println!(
            "attested collateral: {}",
            number::format_units(&TokenAmount::new(value.clone()), config.decimals)
        );
    }
    println!(
        "effective advance rate: {}",
        advance_rate::effective_advance_rate(changes, &facility, fallback_rate)
    );
    Ok(())
}

fn amounts(
    flow: Flow,
    amount: Option<String>,
    interest: Option<String>,
    prefill: &Prefill,
    decimals: Decimals,
) -> Amounts {
    let amounts = Amounts {
        principal: amount
            .map(|amount| number::parse_units(&amount, decimals))
            .or_else(|| prefill.amount(decimals))
            .unwrap_or_default(),
        interest: interest
            .map(|interest| number::parse_units(&interest, decimals))
            .or_else(|| prefill.interest(decimals))
            .unwrap_or_default(),
    };
    if matches!(flow, Flow::CapitalCall | Flow::Recycle) && amounts.principal.is_zero() {
        tracing::warn!(?flow, "simulating with a zero amount");
    }
    amounts
}

/// The facility named on the command line, else in the URL prefill, else the
/// one selected earlier, else the configured one.
fn select_facility(
    flag: Option<Address>,
    prefill: Option<Address>,
    store: &dyn Store,
    config: &Config,
) -> Result<Address> {
    if let Some(facility) = flag.or(prefill) {
        return Ok(facility);
    }
    store
        .load()?
        .selected_facility
        .or(config.facility_address)
        .context("no facility selected: pass --facility or run select-facility")
}

/// Saved simulation output in any of the shapes the node produces.
#[derive(Deserialize)]
#[serde(untagged)]
enum ChangesFile {
    Transactions(Vec<Simulation>),
    Transaction(Box<Simulation>),
    Changes(Vec<Change>),
}

async fn read_changes(path: &Path) -> Result<Vec<Change>> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {path:?}"))?;
    let file = serde_json::from_str::<ChangesFile>(&data)
        .with_context(|| format!("{path:?} holds neither a simulation nor changes"))?;
    Ok(match file {
        ChangesFile::Transactions(transactions) => transactions
            .into_iter()
            .next()
            .map(|simulation| simulation.changes)
            .unwrap_or_default(),
        ChangesFile::Transaction(simulation) => simulation.changes,
        ChangesFile::Changes(changes) => changes,
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::state::{JsonFile, State},
    };

    fn address(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn facility_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFile::new(dir.path().join("state.json"));
        let mut config = Config::default();

        assert!(select_facility(None, None, &store, &config).is_err());

        config.facility_address = Some(address("0x4"));
        assert_eq!(
            select_facility(None, None, &store, &config).unwrap(),
            address("0x4")
        );

        store
            .save(&State {
                selected_facility: Some(address("0x3")),
            })
            .unwrap();
        assert_eq!(
            select_facility(None, None, &store, &config).unwrap(),
            address("0x3")
        );
        assert_eq!(
            select_facility(None, Some(address("0x2")), &store, &config).unwrap(),
            address("0x2")
        );
        assert_eq!(
            select_facility(Some(address("0x1")), Some(address("0x2")), &store, &config)
                .unwrap(),
            address("0x1")
        );
    }

    #[test]
    fn amounts_prefer_flags_over_prefill() {
        let prefill = Prefill::from_query("amount=2&interest=0.5");
        let repay = amounts(Flow::Repay, Some("1.25".to_owned()), None, &prefill, 2);
        assert_eq!(repay.principal, 125u64.into());
        assert_eq!(repay.interest, 50u64.into());

        let capital_call = amounts(Flow::CapitalCall, None, None, &Prefill::default(), 6);
        assert!(capital_call.principal.is_zero());
        assert!(capital_call.interest.is_zero());
    }

    #[tokio::test]
    async fn reads_every_changes_shape() {
        let dir = tempfile::tempdir().unwrap();
        let change = serde_json::json!({
            "type": "write_resource",
            "address": "0xfac",
            "data": { "type": "0x1::facility::BorrowingBase", "data": { "nodes": [] } }
        });
        let shapes = [
            serde_json::json!([{ "success": true, "changes": [change.clone()] }]),
            serde_json::json!({ "success": true, "changes": [change.clone()] }),
            serde_json::json!([change]),
        ];
        for (i, shape) in shapes.into_iter().enumerate() {
            let path = dir.path().join(format!("{i}.json"));
            std::fs::write(&path, shape.to_string()).unwrap();
            let changes = read_changes(&path).await.unwrap();
            assert_eq!(changes.len(), 1, "shape {i}");
            assert!(changes[0].borrowing_base_of(&address("0xfac")).is_some());
        }

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"unexpected": true}"#).unwrap();
        assert!(read_changes(&path).await.is_err());
    }
}
