//! Logging initialization shared by the console binary and the tests of the
//! other crates.
pub mod config;
pub mod tracing;

pub use config::Config;
