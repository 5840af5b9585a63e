//! Geohash-style node addresses.
//!
//! Each level of the tree contributes one 2-bit quadrant code. The code of a
//! node at depth `d` sits at bit `2 * (d - 1)`, so the root's children own the
//! lowest two bits and deeper nodes extend toward the high end. The root has
//! address 0 and is never addressed directly.

use crate::quadrant::Quadrant;

/// Deepest level a 64-bit address can describe.
pub const MAX_ADDRESS_DEPTH: u32 = u64::BITS / 2;

/// Address of the `quadrant` child at `depth`, extending `parent_address`.
#[inline]
pub fn encode_address(parent_address: u64, quadrant: Quadrant, depth: u32) -> u64 {
    debug_assert!(depth >= 1 && depth <= MAX_ADDRESS_DEPTH);
    parent_address | (quadrant.code() << (depth.saturating_sub(1) << 1))
}

/// Quadrant to take when descending from a node at `depth` toward `address`.
#[inline]
pub fn address_quadrant(address: u64, depth: u32) -> Quadrant {
    Quadrant::from_code(address.checked_shr(depth << 1).unwrap_or(0))
}
