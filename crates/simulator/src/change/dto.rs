//! The JSON shape of state changes as reported by the node's simulate and
//! transaction endpoints.

use {
    super::{Payload, Ratio, Resource, StructTag},
    num::BigUint,
    number::serialization::DecimalUint,
    serde::Deserialize,
    serde_with::serde_as,
};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    WriteResource {
        address: String,
        data: MoveResource,
    },
    DeleteResource {
        address: String,
        resource: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct MoveResource {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Nodes are kept as raw JSON and decoded one by one, so a node of unknown
/// shape does not hide its siblings.
#[derive(Debug, Deserialize)]
struct BorrowingBase {
    nodes: Vec<serde_json::Value>,
}

/// A Move enum value: `{"__variant__": "Tag", ...fields}`. Positional fields
/// are named `_0`, `_1`, ... Which fields are present depends on the variant,
/// so they are all optional here.
#[serde_as]
#[derive(Debug, Deserialize)]
struct Node {
    #[serde(rename = "__variant__")]
    variant: Option<String>,
    #[serde_as(as = "Option<DecimalUint>")]
    numerator: Option<BigUint>,
    #[serde_as(as = "Option<DecimalUint>")]
    denominator: Option<BigUint>,
    #[serde_as(as = "Option<DecimalUint>")]
    value: Option<BigUint>,
    #[serde(rename = "_0")]
    inner: Option<serde_json::Value>,
}

impl From<Change> for super::Change {
    fn from(change: Change) -> Self {
        match change {
            Change::WriteResource { address, data } => {
                let Ok(address) = address.parse() else {
                    tracing::debug!(?address, "ignoring change of unparsable account");
                    return Self::Other;
                };
                let Some(type_) = StructTag::parse(&data.type_) else {
                    tracing::debug!(type_ = ?data.type_, "ignoring resource of unparsable type");
                    return Self::Other;
                };
                let payload = if type_.is_borrowing_base() {
                    borrowing_base(&type_, data.data)
                } else {
                    Payload::Opaque
                };
                Self::WriteResource {
                    address,
                    resource: Resource { type_, payload },
                }
            }
            Change::DeleteResource { address, resource } => {
                match (address.parse(), StructTag::parse(&resource)) {
                    (Ok(address), Some(resource_type)) => Self::DeleteResource {
                        address,
                        resource_type,
                    },
                    _ => Self::Other,
                }
            }
            Change::Other => Self::Other,
        }
    }
}

fn borrowing_base(type_: &StructTag, data: serde_json::Value) -> Payload {
    match serde_json::from_value::<BorrowingBase>(data) {
        Ok(resource) => Payload::BorrowingBase {
            nodes: resource.nodes.into_iter().map(node).collect(),
        },
        Err(err) => {
            tracing::debug!(?err, %type_, "malformed borrowing base resource");
            Payload::Opaque
        }
    }
}

fn node(value: serde_json::Value) -> super::Node {
    let tag = value
        .get("__variant__")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    match serde_json::from_value::<Node>(value) {
        Ok(node) => node.into(),
        Err(err) => {
            tracing::debug!(?err, ?tag, "unrecognized borrowing base node");
            super::Node::Unrecognized { tag }
        }
    }
}

impl From<Node> for super::Node {
    fn from(node: Node) -> Self {
        match node {
            Node {
                numerator: Some(numerator),
                denominator: Some(denominator),
                ..
            } => Self::Ratio(Ratio {
                numerator,
                denominator,
            }),
            Node {
                value: Some(value), ..
            } => Self::Attested { value },
            Node {
                variant: Some(tag),
                inner: Some(inner),
                ..
            } => match serde_json::from_value::<Node>(inner) {
                Ok(inner) => Self::Wrapped {
                    tag,
                    inner: Box::new(inner.into()),
                },
                Err(_) => Self::Unrecognized { tag: Some(tag) },
            },
            Node { variant, .. } => Self::Unrecognized { tag: variant },
        }
    }
}
