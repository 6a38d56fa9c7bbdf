mod cli;
pub mod config;
pub mod flows;
pub mod prefill;
mod run;
pub mod state;
pub mod stepper;
pub mod wallet;

pub use self::run::{run, start};
