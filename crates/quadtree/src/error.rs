//! Quadtree error types.

use thiserror::Error;

use crate::container::ObjectId;
use crate::node::NodeId;

/// Errors reported by the quadtree.
#[derive(Debug, Error)]
pub enum QuadtreeError {
    #[error("Address {requested:#x} does not match node address {found:#x}")]
    AddressMismatch { requested: u64, found: u64 },

    #[error("Invalid quadtree configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),

    #[error("Membership of {object:?} in {node:?} is only recorded on one side")]
    MembershipMismatch { node: NodeId, object: ObjectId },

    #[error("Internal node {node:?} still lists objects")]
    InternalNodeHoldsObjects { node: NodeId },

    #[error("Node {node:?} address is not derived from its parent")]
    AddressInvariant { node: NodeId },
}

/// Result alias for quadtree operations.
pub type Result<T> = std::result::Result<T, QuadtreeError>;
