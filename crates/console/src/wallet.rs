//! The seam to the operator's wallet. Signing and submission happen in the
//! wallet; the console only hands it entry functions.

use {simulator::EntryFunction, std::fmt};

/// Hash of a submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Wallet: Send + Sync {
    /// Signs and submits `call`, resolving once the node accepted it.
    async fn submit(&self, call: &EntryFunction) -> anyhow::Result<TxHash>;
}
