//! Ledger nodes that can dry-run entry functions.

pub mod node;

#[cfg(any(test, feature = "test-util"))]
pub use node::MockNode;
pub use node::{Error, Http, Node};
