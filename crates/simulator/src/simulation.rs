use {
    crate::Change,
    serde::Deserialize,
    serde_with::{DisplayFromStr, PickFirst, serde_as},
};

/// Outcome of a dry-run of one transaction.
///
/// A simulation that did not succeed is still a simulation: `success` and
/// `vm_status` describe why the transaction would abort and it is up to the
/// caller to surface that.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct Simulation {
    pub success: bool,
    #[serde(default)]
    pub vm_status: String,
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(default)]
    pub gas_used: u64,
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn decodes_simulated_transaction() {
        let simulation: Simulation = serde_json::from_value(json!({
            "version": "0",
            "hash": "0x1234",
            "success": false,
            "vm_status": "Move abort in 0xfac::capital_call: E_INSUFFICIENT_COMMITMENT(0x10001)",
            "gas_used": "1240",
            "events": [{ "type": "0xfac::capital_call::Requested", "data": {} }],
            "changes": [{ "type": "write_module", "address": "0x1" }],
        }))
        .unwrap();
        assert!(!simulation.success);
        assert_eq!(simulation.gas_used, 1240);
        assert_eq!(simulation.events.len(), 1);
        assert_eq!(simulation.changes, vec![Change::Other]);

        let simulation: Simulation =
            serde_json::from_value(json!({ "success": true, "gas_used": 7 })).unwrap();
        assert_eq!(simulation.gas_used, 7);
        assert!(simulation.changes.is_empty());
    }
}
