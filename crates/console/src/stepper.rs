//! Runs the steps of an operator flow one after the other.
//!
//! Steps are strictly sequential: a step only starts once the previous one
//! succeeded and the first failure ends the sequence. Nothing is retried;
//! steps that already went through stay submitted.

use {
    crate::wallet::{TxHash, Wallet},
    simulator::{EntryFunction, Simulation, provider::Node},
};

/// One entry function call of a multi-step flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub label: String,
    pub call: EntryFunction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub label: String,
    pub hash: TxHash,
}

#[derive(Debug, thiserror::Error)]
#[error("step {} of {total} ({label}) failed", .index + 1)]
pub struct StepError {
    /// Zero based index of the failed step. All steps before it completed.
    pub index: usize,
    pub total: usize,
    pub label: String,
    #[source]
    pub failure: Failure,
}

#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error("simulation aborted: {0}")]
    Aborted(String),
    #[error(transparent)]
    Node(#[from] simulator::provider::Error),
    #[error(transparent)]
    Wallet(anyhow::Error),
}

/// Dry-runs every step. A step whose simulation reports failure ends the
/// sequence with [`Failure::Aborted`] carrying the VM status.
pub async fn simulate(steps: &[Step], node: &dyn Node) -> Result<Vec<Simulation>, StepError> {
    let mut simulations = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        tracing::info!(step = %step.label, function = %step.call.function_id(), "simulating");
        let simulation = node
            .simulate(&step.call)
            .await
            .map_err(|err| failed(steps, index, err.into()))?;
        if !simulation.success {
            return Err(failed(
                steps,
                index,
                Failure::Aborted(simulation.vm_status),
            ));
        }
        simulations.push(simulation);
    }
    Ok(simulations)
}

/// Submits every step through the wallet, waiting for each submission before
/// starting the next one.
pub async fn submit(steps: &[Step], wallet: &dyn Wallet) -> Result<Vec<Receipt>, StepError> {
    let mut receipts = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        tracing::info!(step = %step.label, function = %step.call.function_id(), "submitting");
        let hash = wallet
            .submit(&step.call)
            .await
            .map_err(|err| failed(steps, index, Failure::Wallet(err)))?;
        tracing::info!(step = %step.label, %hash, "submitted");
        receipts.push(Receipt {
            label: step.label.clone(),
            hash,
        });
    }
    Ok(receipts)
}

fn failed(steps: &[Step], index: usize, failure: Failure) -> StepError {
    let err = StepError {
        index,
        total: steps.len(),
        label: steps[index].label.clone(),
        failure,
    };
    tracing::warn!(?err, "step failed, stopping");
    err
}
