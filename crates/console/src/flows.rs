//! The multi-step operator flows of a facility, expressed as the entry
//! function calls they consist of.

use {
    crate::stepper::Step,
    number::TokenAmount,
    serde_json::json,
    simulator::{Address, EntryFunction, payload::ModuleId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Flow {
    /// Draw committed capital from the facility's lenders.
    CapitalCall,
    /// Re-deploy collected principal into new collateral.
    Recycle,
    /// Repay interest and principal of the facility's loan.
    Repay,
    /// Distribute collections through the interest and principal waterfalls.
    Waterfall,
}

/// Amounts entered for a flow. Flows ignore the amounts they do not use.
#[derive(Clone, Debug, Default)]
pub struct Amounts {
    pub principal: TokenAmount,
    pub interest: TokenAmount,
}

/// Builds the steps of the operator flows of one facility.
#[derive(Clone, Debug)]
pub struct Facility {
    /// Account publishing the facility modules.
    pub modules: Address,
    pub facility: Address,
    /// The operator account the steps are sent from.
    pub sender: Address,
}

impl Facility {
    pub fn steps(&self, flow: Flow, amounts: &Amounts) -> Vec<Step> {
        match flow {
            Flow::CapitalCall => self.capital_call(&amounts.principal),
            Flow::Recycle => self.recycle(&amounts.principal),
            Flow::Repay => self.repay(&amounts.principal, &amounts.interest),
            Flow::Waterfall => self.waterfall(),
        }
    }

    pub fn capital_call(&self, amount: &TokenAmount) -> Vec<Step> {
        vec![
            self.step("request capital call", "capital_call", "request", Some(amount)),
            self.step("execute capital call", "capital_call", "execute", None),
        ]
    }

    pub fn recycle(&self, amount: &TokenAmount) -> Vec<Step> {
        vec![
            self.step("request recycle", "recycle", "request", Some(amount)),
            self.step("execute recycle", "recycle", "execute", None),
        ]
    }

    /// Interest is repaid before principal, zero amounts are skipped.
    pub fn repay(&self, principal: &TokenAmount, interest: &TokenAmount) -> Vec<Step> {
        let mut steps = Vec::new();
        if !interest.is_zero() {
            steps.push(self.step("repay interest", "loan", "repay_interest", Some(interest)));
        }
        if !principal.is_zero() {
            steps.push(self.step(
                "repay principal",
                "loan",
                "repay_principal",
                Some(principal),
            ));
        }
        steps
    }

    pub fn waterfall(&self) -> Vec<Step> {
        vec![
            self.step(
                "run interest waterfall",
                "waterfall",
                "run_interest_waterfall",
                None,
            ),
            self.step(
                "run principal waterfall",
                "waterfall",
                "run_principal_waterfall",
                None,
            ),
        ]
    }

    fn step(
        &self,
        label: &str,
        module: &str,
        function: &str,
        amount: Option<&TokenAmount>,
    ) -> Step {
        let mut args = vec![json!(self.facility)];
        args.extend(amount.map(|amount| json!(amount)));
        Step {
            label: label.to_owned(),
            call: EntryFunction {
                sender: self.sender,
                module: ModuleId {
                    address: self.modules,
                    name: module.to_owned(),
                },
                function: function.to_owned(),
                type_args: Vec::new(),
                args,
            },
        }
    }
}
