//! Object containers: a payload, its box, and the leaves indexing it.

use glam::Vec2;

use crate::bounds::Bounds;
use crate::node::NodeId;

/// Handle to an object stored in a [`Quadtree`](crate::Quadtree).
///
/// Handles are never reused, so a handle to a removed object stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

/// An indexed object.
#[derive(Debug, Clone)]
pub struct ObjectContainer<T> {
    pub(crate) bounds: Bounds,
    payload: T,
    /// Leaves currently listing this object. Mirrors [`Node::objects`](crate::Node::objects).
    pub(crate) nodes: Vec<NodeId>,
}

impl<T> ObjectContainer<T> {
    pub(crate) fn new(bounds: Bounds, payload: T) -> Self {
        Self {
            bounds,
            payload,
            nodes: Vec::with_capacity(1),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.bounds.center
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size
    }

    #[inline]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub(crate) fn remove_node(&mut self, node: NodeId) -> bool {
        match self.nodes.iter().position(|&id| id == node) {
            Some(idx) => {
                self.nodes.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn into_payload(self) -> T {
        self.payload
    }
}
