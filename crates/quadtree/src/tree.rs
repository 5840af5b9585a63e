//! The quadtree itself.
//!
//! Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
//! Objects live in a map keyed by [`ObjectId`]. Leaf object lists and
//! container node lists are two views of one membership relation and are
//! always updated together.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use tracing::{debug, trace, warn};

use crate::address::{MAX_ADDRESS_DEPTH, address_quadrant, encode_address};
use crate::bounds::Bounds;
use crate::config::QuadtreeConfig;
use crate::container::{ObjectContainer, ObjectId};
use crate::error::{QuadtreeError, Result};
use crate::node::{Node, NodeId};
use crate::quadrant::Quadrant;

const ROOT: NodeId = NodeId(0);

/// Spatial index over square-ish boxes.
///
/// The root is divided on construction, so a new tree starts with four
/// leaves at depth 1. Leaves split once they hold `max_objects` objects and
/// the children's half-extent would still exceed `min_leaf_size`.
pub struct Quadtree<T> {
    nodes: Vec<Node>,
    objects: HashMap<ObjectId, ObjectContainer<T>>,
    next_object_id: u64,
    config: QuadtreeConfig,
    /// Deepest node created so far.
    depth: u32,
}

impl<T> Quadtree<T> {
    /// Create a tree covering `size` centered on `position`, with default config.
    pub fn new(size: Vec2, position: Vec2) -> Self {
        Self::with_config(size, position, QuadtreeConfig::default())
    }

    /// Create a tree with an explicit configuration.
    ///
    /// A `min_leaf_size` too large for the tree is accepted: leaves simply
    /// never split past the initial division.
    pub fn with_config(size: Vec2, position: Vec2, config: QuadtreeConfig) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(64),
            objects: HashMap::with_capacity(64),
            next_object_id: 0,
            config,
            depth: 0,
        };
        tree.nodes.push(Node::new(Bounds::new(position, size), 0, 0));
        tree.divide(ROOT);
        tree
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.nodes[ROOT.0].bounds.size
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.nodes[ROOT.0].bounds.center
    }

    #[inline]
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Deepest level reached by any split so far.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of stored objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, internal ones included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All current leaves, in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| NodeId(idx))
    }

    #[inline]
    pub fn container(&self, id: ObjectId) -> Option<&ObjectContainer<T>> {
        self.objects.get(&id)
    }

    /// Get an object's payload.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&T> {
        self.objects.get(&id).map(ObjectContainer::payload)
    }

    /// Get an object's payload mutably. Its box cannot change this way; use
    /// [`Quadtree::update`] for that.
    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        self.objects.get_mut(&id).map(ObjectContainer::payload_mut)
    }

    /// Iterate over all stored objects, in no particular order.
    pub fn containers(&self) -> impl Iterator<Item = (ObjectId, &ObjectContainer<T>)> + '_ {
        self.objects.iter().map(|(&id, container)| (id, container))
    }

    /// Insert `payload` with a box of `size` centered on `position`.
    ///
    /// The object is indexed by every leaf its box overlaps. An object
    /// entirely outside the tree is stored but indexed nowhere.
    pub fn insert(&mut self, payload: T, position: Vec2, size: Vec2) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;

        let bounds = Bounds::new(position, size);
        self.objects.insert(id, ObjectContainer::new(bounds, payload));
        self.index(id, bounds);
        trace!(?id, ?position, ?size, "inserted object");
        id
    }

    /// Remove an object by handle, returning its payload.
    ///
    /// Removing an already-removed handle is a no-op returning `None`.
    pub fn remove(&mut self, id: ObjectId) -> Option<T> {
        let container = self.objects.remove(&id)?;
        for &node in container.nodes() {
            self.nodes[node.0].remove_object(id);
        }
        trace!(?id, leaves = container.nodes().len(), "removed object");
        Some(container.into_payload())
    }

    /// Move and/or resize an object, keeping its handle.
    ///
    /// Returns false if `id` is not stored in this tree.
    pub fn update(&mut self, id: ObjectId, position: Vec2, size: Vec2) -> bool {
        let Some(container) = self.objects.get_mut(&id) else {
            return false;
        };
        let bounds = Bounds::new(position, size);
        container.bounds = bounds;
        let old_nodes = std::mem::take(&mut container.nodes);
        for node in old_nodes {
            self.nodes[node.0].remove_object(id);
        }
        self.index(id, bounds);
        true
    }

    /// The leaf reached by descending toward `position`, ignoring sizes.
    pub fn node_at(&self, position: Vec2) -> NodeId {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current.0];
            match node.children {
                Some(children) => current = children[Quadrant::of(node.bounds.center, position).slot()],
                None => return current,
            }
        }
    }

    /// Payloads of every object in the leaf at `position`.
    ///
    /// This is a candidate set: objects are not checked against the point.
    pub fn objects_at(&self, position: Vec2) -> Vec<&T> {
        self.payloads(&self.nodes[self.node_at(position).0])
    }

    /// Every leaf whose box overlaps the query box.
    pub fn nodes_in_area(&self, position: Vec2, size: Vec2) -> Vec<NodeId> {
        let bounds = Bounds::new(position, size);
        let mut leaves = Vec::new();
        let mut queue = VecDeque::from([self.anchor(&bounds)]);
        while let Some(current) = queue.pop_front() {
            if self.nodes[current.0].is_leaf() {
                leaves.push(current);
            } else {
                self.route(current, &bounds, &mut queue);
            }
        }
        leaves
    }

    /// Payloads of every object in the leaves overlapping the query box.
    ///
    /// An object indexed by several matching leaves is returned once per leaf.
    pub fn objects_in_area(&self, position: Vec2, size: Vec2) -> Vec<&T> {
        self.nodes_in_area(position, size)
            .into_iter()
            .flat_map(|leaf| self.payloads(&self.nodes[leaf.0]))
            .collect()
    }

    /// Look up a node by address.
    ///
    /// Descends by the address's quadrant digits until a leaf is reached and
    /// fails if that leaf's address differs. Because SE encodes as `00`, an
    /// address whose leaf has since split resolves to its SE-most
    /// descendant rather than failing.
    pub fn node_for_address(&self, address: u64) -> Result<NodeId> {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current.0];
            match node.children {
                Some(children) => current = children[address_quadrant(address, node.depth).slot()],
                None if node.address == address => return Ok(current),
                None => {
                    return Err(QuadtreeError::AddressMismatch {
                        requested: address,
                        found: node.address,
                    });
                }
            }
        }
    }

    /// Check the structural invariants: symmetric membership, empty
    /// internal nodes, and child addresses derived from their parents.
    pub fn validate(&self) -> Result<()> {
        for (idx, node) in self.nodes.iter().enumerate() {
            let id = NodeId(idx);
            if let Some(children) = node.children {
                if !node.objects.is_empty() {
                    return Err(QuadtreeError::InternalNodeHoldsObjects { node: id });
                }
                for quadrant in Quadrant::ALL {
                    let child_id = children[quadrant.slot()];
                    let child = self
                        .nodes
                        .get(child_id.0)
                        .ok_or(QuadtreeError::UnknownNode(child_id))?;
                    let expected = encode_address(node.address, quadrant, node.depth + 1);
                    if child.depth != node.depth + 1 || child.address != expected {
                        return Err(QuadtreeError::AddressInvariant { node: child_id });
                    }
                }
            }
            for &object in &node.objects {
                let container = self
                    .objects
                    .get(&object)
                    .ok_or(QuadtreeError::UnknownObject(object))?;
                let listed = container.nodes.iter().filter(|&&n| n == id).count();
                if listed != 1 {
                    return Err(QuadtreeError::MembershipMismatch { node: id, object });
                }
            }
        }
        for (&object, container) in &self.objects {
            for &node_id in &container.nodes {
                let node = self
                    .nodes
                    .get(node_id.0)
                    .ok_or(QuadtreeError::UnknownNode(node_id))?;
                let listed = node.objects.iter().filter(|&&o| o == object).count();
                if listed != 1 {
                    return Err(QuadtreeError::MembershipMismatch { node: node_id, object });
                }
            }
        }
        Ok(())
    }

    fn payloads(&self, node: &Node) -> Vec<&T> {
        node.objects
            .iter()
            .filter_map(|id| self.objects.get(id).map(ObjectContainer::payload))
            .collect()
    }

    /// Index an already stored object into every leaf its box reaches,
    /// splitting full leaves on the way.
    fn index(&mut self, id: ObjectId, bounds: Bounds) {
        let mut queue = VecDeque::from([self.anchor(&bounds)]);
        while let Some(&current) = queue.front() {
            if self.nodes[current.0].is_leaf() {
                if self.can_split(current) {
                    self.split(current);
                    // Now internal; look at it again.
                    continue;
                }
                self.link(current, id);
            } else {
                self.route(current, &bounds, &mut queue);
            }
            queue.pop_front();
        }

        if self.objects.get(&id).is_some_and(|c| c.nodes.is_empty()) {
            warn!(?id, center = ?bounds.center, size = ?bounds.size, "object lies outside the tree");
        }
    }

    /// Deepest node on the path toward `bounds.center` that either is a leaf
    /// or has no child fully containing `bounds`.
    fn anchor(&self, bounds: &Bounds) -> NodeId {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current.0];
            let Some(children) = node.children else {
                return current;
            };
            let child = children[Quadrant::of(node.bounds.center, bounds.center).slot()];
            let child_bounds = &self.nodes[child.0].bounds;
            if bounds.size.x > child_bounds.size.x
                || bounds.size.y > child_bounds.size.y
                || !child_bounds.contains(bounds)
            {
                return current;
            }
            current = child;
        }
    }

    /// Push the children of internal node `id` that `bounds` overlaps.
    ///
    /// A degenerate box that overlaps no child but reaches the node goes to
    /// the child picked by the point rule, applied to its center clamped
    /// into the node.
    fn route(&self, id: NodeId, bounds: &Bounds, out: &mut impl Extend<NodeId>) {
        let node = &self.nodes[id.0];
        let Some(children) = node.children else {
            return;
        };
        let mut routed = false;
        for child in children {
            if self.nodes[child.0].bounds.overlaps(bounds) {
                out.extend([child]);
                routed = true;
            }
        }
        if !routed && (node.bounds.overlaps(bounds) || node.bounds.contains_point(bounds.center)) {
            let point = bounds.center.clamp(node.bounds.min(), node.bounds.max());
            out.extend([children[Quadrant::of(node.bounds.center, point).slot()]]);
        }
    }

    fn can_split(&self, id: NodeId) -> bool {
        let node = &self.nodes[id.0];
        let child_half = node.bounds.size / 4.0;
        node.depth < MAX_ADDRESS_DEPTH
            && child_half.x > self.config.min_leaf_size
            && child_half.y > self.config.min_leaf_size
            && node.objects.len() >= self.config.max_objects
    }

    /// Create the four children of leaf `id`.
    fn divide(&mut self, id: NodeId) -> [NodeId; 4] {
        let node = &self.nodes[id.0];
        debug_assert!(node.is_leaf());
        let bounds = node.bounds;
        let address = node.address;
        let depth = node.depth + 1;

        let first = self.nodes.len();
        for quadrant in Quadrant::ALL {
            self.nodes.push(Node::new(
                bounds.quadrant(quadrant),
                depth,
                encode_address(address, quadrant, depth),
            ));
        }
        let children = [NodeId(first), NodeId(first + 1), NodeId(first + 2), NodeId(first + 3)];
        self.nodes[id.0].children = Some(children);

        if depth > self.depth {
            self.depth = depth;
            if depth > self.config.max_depth {
                warn!(depth, max_depth = self.config.max_depth, "quadtree grew past configured max depth");
            }
        }
        children
    }

    /// Divide leaf `id` and hand its objects down to the overlapping children.
    fn split(&mut self, id: NodeId) {
        self.divide(id);
        let objects = std::mem::take(&mut self.nodes[id.0].objects);
        let mut targets = Vec::with_capacity(4);
        for &object in &objects {
            let Some(container) = self.objects.get_mut(&object) else {
                continue;
            };
            container.remove_node(id);
            let bounds = container.bounds;

            targets.clear();
            self.route(id, &bounds, &mut targets);
            if targets.is_empty() {
                warn!(?object, node = id.0, "object dropped by split");
            }
            for &child in &targets {
                self.link(child, object);
            }
        }
        let node = &self.nodes[id.0];
        debug!(
            node = id.0,
            depth = node.depth,
            address = node.address,
            moved = objects.len(),
            "split leaf"
        );
    }

    fn link(&mut self, node: NodeId, object: ObjectId) {
        if let Some(container) = self.objects.get_mut(&object) {
            container.nodes.push(node);
            self.nodes[node.0].objects.push(object);
        }
    }
}

impl<T: PartialEq> Quadtree<T> {
    /// Remove the first object equal to `payload` from the leaf at `position`.
    ///
    /// Only the leaf [`Quadtree::node_at`] picks is searched, so an object
    /// whose box does not reach that leaf is not found.
    pub fn remove_at(&mut self, payload: &T, position: Vec2) -> Option<T> {
        let leaf = self.node_at(position);
        let id = self.nodes[leaf.0]
            .objects
            .iter()
            .copied()
            .find(|id| self.objects.get(id).is_some_and(|c| c.payload() == payload))?;
        self.remove(id)
    }
}

impl<T> std::fmt::Debug for Quadtree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quadtree")
            .field("position", &self.position())
            .field("size", &self.size())
            .field("nodes", &self.nodes.len())
            .field("objects", &self.objects.len())
            .field("depth", &self.depth)
            .finish()
    }
}
