use {
    crate::Address,
    serde::Serialize,
    std::fmt::{self, Display, Formatter},
};

/// A call of a Move entry function, the unit of work the console simulates
/// and hands to the wallet for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryFunction {
    pub sender: Address,
    pub module: ModuleId,
    pub function: String,
    pub type_args: Vec<String>,
    /// Arguments in the node's JSON encoding: integers wider than 32 bits and
    /// addresses are strings.
    pub args: Vec<serde_json::Value>,
}

impl EntryFunction {
    /// The fully qualified function name, `0x...::module::function`.
    pub fn function_id(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }

    /// The payload as accepted by the node and by wallets.
    pub fn to_payload(&self) -> Payload {
        Payload {
            type_: "entry_function_payload",
            function: self.function_id(),
            type_arguments: self.type_args.clone(),
            arguments: self.args.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleId {
    pub address: Address,
    pub name: String,
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Payload {
    #[serde(rename = "type")]
    pub type_: &'static str,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}
