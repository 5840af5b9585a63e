//! Quadrant-subdivision spatial index.
//!
//! A [`Quadtree`] stores payloads keyed by an axis-aligned box (center and
//! size) and answers point and area queries with candidate sets. Leaves split
//! into four children once they fill up; objects whose box straddles a split
//! line are indexed by every leaf they overlap.
//!
//! ```
//! use glam::Vec2;
//! use quadtree::Quadtree;
//!
//! let mut tree = Quadtree::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
//! let id = tree.insert("tower", Vec2::new(10.0, 20.0), Vec2::new(4.0, 4.0));
//! assert!(tree.objects_at(Vec2::new(10.0, 20.0)).contains(&&"tower"));
//!
//! tree.remove(id);
//! assert!(tree.objects_at(Vec2::new(10.0, 20.0)).is_empty());
//! ```
//!
//! Single-threaded by design: callers that share a tree must serialize access.

mod address;
mod bounds;
mod config;
mod container;
mod error;
mod node;
mod quadrant;
mod tree;

pub use address::{MAX_ADDRESS_DEPTH, address_quadrant, encode_address};
pub use bounds::Bounds;
pub use config::QuadtreeConfig;
pub use container::{ObjectContainer, ObjectId};
pub use error::{QuadtreeError, Result};
pub use node::{Node, NodeId};
pub use quadrant::Quadrant;
pub use tree::Quadtree;
