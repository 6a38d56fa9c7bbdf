//! CLI arguments for the `console` binary.

use {
    crate::flows::Flow,
    clap::{Parser, Subcommand},
    number::{Decimals, TokenAmount},
    simulator::Address,
    std::path::PathBuf,
};

/// Operate a lending facility: convert amounts, dry-run operator flows and
/// inspect their effect on the borrowing base.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// The log filter.
    #[arg(long, env, default_value = "warn,console=info,simulator=info")]
    pub log: String,

    /// Output log events as JSON.
    #[arg(long, env)]
    pub log_json: bool,

    /// Path to the console configuration file. This file should be in TOML
    /// format.
    #[arg(long, env)]
    pub config: Option<PathBuf>,

    /// Path of the JSON file persisting operator state between runs.
    #[arg(long, env, default_value = ".facility-console.json")]
    pub state: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a decimal amount into the token's smallest unit.
    Parse {
        text: String,

        /// Overrides the configured token decimals.
        #[arg(long)]
        decimals: Option<Decimals>,
    },
    /// Render an amount given in the token's smallest unit.
    Format {
        amount: TokenAmount,

        /// Overrides the configured token decimals.
        #[arg(long)]
        decimals: Option<Decimals>,
    },
    /// Derive the effective advance rate from saved simulation output.
    AdvanceRate {
        /// JSON file with a simulate response, a single simulated
        /// transaction or a bare list of changes.
        #[arg(long)]
        changes: PathBuf,

        #[arg(long)]
        facility: Option<Address>,

        /// Advance rate to show when the changes do not reveal one, as a
        /// fraction.
        #[arg(long)]
        fallback_rate: Option<f64>,
    },
    /// Remember the facility operated on by later commands.
    SelectFacility { address: Address },
    /// Dry-run every step of an operator flow against the node.
    Simulate {
        #[arg(value_enum)]
        flow: Flow,

        /// Principal amount in display units, e.g. `1,500.25`.
        #[arg(long)]
        amount: Option<String>,

        /// Interest amount in display units, repayments only.
        #[arg(long)]
        interest: Option<String>,

        #[arg(long)]
        facility: Option<Address>,

        /// URL or query string prefilling facility, amounts and rate.
        #[arg(long)]
        query: Option<String>,
    },
}
