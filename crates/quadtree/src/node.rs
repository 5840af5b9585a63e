//! Tree nodes.

use glam::Vec2;

use crate::bounds::Bounds;
use crate::container::ObjectId;
use crate::quadrant::Quadrant;

/// Stable index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A quadtree node.
///
/// A node is either a leaf holding objects, or internal with all four
/// children present. Nodes are never removed once created.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) bounds: Bounds,
    /// Root is depth 0.
    pub(crate) depth: u32,
    pub(crate) address: u64,
    /// Indexed by [`Quadrant::slot`].
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) objects: Vec<ObjectId>,
}

impl Node {
    pub(crate) fn new(bounds: Bounds, depth: u32, address: u64) -> Self {
        Self {
            bounds,
            depth,
            address,
            children: None,
            objects: Vec::new(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.bounds.size
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn address(&self) -> u64 {
        self.address
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    #[inline]
    pub fn children(&self) -> Option<[NodeId; 4]> {
        self.children
    }

    #[inline]
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children.map(|children| children[quadrant.slot()])
    }

    /// Objects indexed by this node. Always empty for internal nodes.
    #[inline]
    pub fn objects(&self) -> &[ObjectId] {
        &self.objects
    }

    /// Drop `object` from this node's list. Returns false if it was not listed.
    pub(crate) fn remove_object(&mut self, object: ObjectId) -> bool {
        match self.objects.iter().position(|&id| id == object) {
            Some(idx) => {
                self.objects.remove(idx);
                true
            }
            None => false,
        }
    }
}
