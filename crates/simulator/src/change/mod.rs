//! State changes reported by a dry-run of a transaction.
//!
//! The node reports changes as loosely shaped JSON. The [`dto`] module
//! mirrors that shape and the conversions below resolve it into the
//! discriminated unions of this module, so that interpreting code only ever
//! matches on variants.

use {
    crate::Address,
    num::{BigUint, Zero},
    serde::Deserialize,
    std::fmt::{self, Display, Formatter},
};

mod dto;

/// Struct names of resources that carry a facility's borrowing base
/// computation.
pub const BORROWING_BASE_RESOURCES: &[&str] =
    &["BorrowingBase", "BorrowingBaseTree", "FacilityBorrowingBase"];

/// One mutated piece of ledger state.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "dto::Change")]
pub enum Change {
    WriteResource {
        address: Address,
        resource: Resource,
    },
    DeleteResource {
        address: Address,
        resource_type: StructTag,
    },
    /// Table items, modules and anything else the console does not inspect.
    Other,
}

impl Change {
    /// The borrowing base nodes written to `address`, if this change is such
    /// a write.
    pub fn borrowing_base_of(&self, address: &Address) -> Option<&[Node]> {
        match self {
            Self::WriteResource {
                address: owner,
                resource:
                    Resource {
                        payload: Payload::BorrowingBase { nodes },
                        ..
                    },
            } if owner == address => Some(nodes),
            _ => None,
        }
    }
}

/// A Move resource value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub type_: StructTag,
    pub payload: Payload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    BorrowingBase { nodes: Vec<Node> },
    /// A resource whose contents the console does not interpret.
    Opaque,
}

/// A fully qualified Move struct name, e.g. `0x1::coin::CoinStore<...>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructTag {
    pub address: Address,
    pub module: String,
    pub name: String,
    /// Type arguments, kept verbatim.
    pub generics: Option<String>,
}

impl StructTag {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (path, generics) = match s.split_once('<') {
            Some((path, rest)) => (path, Some(rest.strip_suffix('>')?.to_owned())),
            None => (s, None),
        };
        let mut parts = path.split("::");
        let address = parts.next()?.parse().ok()?;
        let module = parts.next()?.to_owned();
        let name = parts.next()?.to_owned();
        if parts.next().is_some() || module.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            address,
            module,
            name,
            generics,
        })
    }

    pub fn is_borrowing_base(&self) -> bool {
        BORROWING_BASE_RESOURCES.contains(&self.name.as_str())
    }
}

impl Display for StructTag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some(generics) = &self.generics {
            write!(f, "<{generics}>")?;
        }
        Ok(())
    }
}

/// A node of a borrowing base computation, encoded on chain as a Move enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Ratio(Ratio),
    Attested { value: BigUint },
    /// A variant holding exactly one nested value.
    Wrapped { tag: String, inner: Box<Node> },
    Unrecognized { tag: Option<String> },
}

impl Node {
    /// Resolves the node to a ratio, unwrapping at most `depth` nested
    /// variants.
    pub fn ratio(&self, depth: usize) -> Option<&Ratio> {
        match self {
            Self::Ratio(ratio) => Some(ratio),
            Self::Wrapped { inner, .. } if depth > 0 => inner.ratio(depth - 1),
            _ => None,
        }
    }

    /// Resolves the node to an attested value, unwrapping at most `depth`
    /// nested variants.
    pub fn attested(&self, depth: usize) -> Option<&BigUint> {
        match self {
            Self::Attested { value } => Some(value),
            Self::Wrapped { inner, .. } if depth > 0 => inner.attested(depth - 1),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ratio {
    pub numerator: BigUint,
    pub denominator: BigUint,
}

impl Ratio {
    pub fn is_defined(&self) -> bool {
        !self.denominator.is_zero()
    }
}
