//! Quadrant classification.

use glam::Vec2;

/// One of the four children of a divided node.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// x+, y+ (code `10`)
    NE = 0b10,
    /// x-, y+ (code `11`)
    NW = 0b11,
    /// x+, y- (code `00`)
    SE = 0b00,
    /// x-, y- (code `01`)
    SW = 0b01,
}

impl Quadrant {
    /// All quadrants in child-slot order.
    pub const ALL: [Quadrant; 4] = [Quadrant::NE, Quadrant::NW, Quadrant::SE, Quadrant::SW];

    /// Pick the quadrant of `point` relative to `center`.
    ///
    /// Points on a dividing axis resolve toward the positive side.
    #[inline]
    pub fn of(center: Vec2, point: Vec2) -> Self {
        let dir = point - center;
        match (dir.x >= 0.0, dir.y >= 0.0) {
            (true, true) => Quadrant::NE,
            (false, true) => Quadrant::NW,
            (true, false) => Quadrant::SE,
            (false, false) => Quadrant::SW,
        }
    }

    /// Fixed 2-bit address code.
    #[inline]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Inverse of [`Quadrant::code`]. Only the low two bits are read.
    #[inline]
    pub const fn from_code(code: u64) -> Self {
        match code & 0b11 {
            0b10 => Quadrant::NE,
            0b11 => Quadrant::NW,
            0b00 => Quadrant::SE,
            _ => Quadrant::SW,
        }
    }

    /// Index of this quadrant's slot in a node's child array.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            Quadrant::NE => 0,
            Quadrant::NW => 1,
            Quadrant::SE => 2,
            Quadrant::SW => 3,
        }
    }

    /// Unit direction from a parent's center toward this quadrant.
    #[inline]
    pub fn direction(self) -> Vec2 {
        match self {
            Quadrant::NE => Vec2::new(1.0, 1.0),
            Quadrant::NW => Vec2::new(-1.0, 1.0),
            Quadrant::SE => Vec2::new(1.0, -1.0),
            Quadrant::SW => Vec2::new(-1.0, -1.0),
        }
    }
}
