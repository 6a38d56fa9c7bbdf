//! Dry-run simulation of facility entry functions against a ledger node and
//! interpretation of the resulting state changes.

pub mod address;
pub mod advance_rate;
pub mod change;
pub mod payload;
pub mod provider;
mod simulation;
mod util;

pub use {
    address::Address,
    change::Change,
    payload::EntryFunction,
    simulation::Simulation,
};
