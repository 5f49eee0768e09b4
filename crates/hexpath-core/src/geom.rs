//! Geometry primitives: [`CubeCoord`], odd-q offset conversion, and
//! rendering layout.
//!
//! Search code only ever sees cube coordinates. Offset `(row, col)`
//! addressing exists to walk the rectangular generation area, and
//! [`layout_position`] exists for whoever draws the tiles.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// CubeCoord
// ---------------------------------------------------------------------------

/// A hex cube coordinate. Always satisfies `x + y + z == 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// The six cube offsets of adjacent hexes, in neighbor enumeration order.
pub const HEX_DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord::new(1, -1, 0),
    CubeCoord::new(1, 0, -1),
    CubeCoord::new(0, 1, -1),
    CubeCoord::new(-1, 1, 0),
    CubeCoord::new(-1, 0, 1),
    CubeCoord::new(0, -1, 1),
];

impl CubeCoord {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new coordinate. The caller must keep `x + y + z == 0`.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Build a coordinate from `x` and `z`, deriving `y`.
    #[inline]
    pub const fn from_xz(x: i32, z: i32) -> Self {
        Self { x, y: -x - z, z }
    }

    /// Whether the cube invariant `x + y + z == 0` holds.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.x + self.y + self.z == 0
    }

    /// The six adjacent coordinates, in [`HEX_DIRECTIONS`] order.
    #[inline]
    pub fn neighbors(self) -> [CubeCoord; 6] {
        HEX_DIRECTIONS.map(|d| self + d)
    }

    /// Hex distance: number of steps between two coordinates on an
    /// unobstructed grid.
    #[inline]
    pub fn distance(self, other: CubeCoord) -> i32 {
        let d = self - other;
        d.x.abs().max(d.y.abs()).max(d.z.abs())
    }

    /// Whether `other` is one of the six adjacent coordinates.
    #[inline]
    pub fn is_adjacent(self, other: CubeCoord) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for CubeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for CubeCoord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for CubeCoord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for CubeCoord {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for CubeCoord {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ---------------------------------------------------------------------------
// Offset conversion
// ---------------------------------------------------------------------------

/// Convert odd-q offset addressing (odd columns shifted down) to cube
/// coordinates.
#[inline]
pub const fn offset_to_cube(row: i32, col: i32) -> CubeCoord {
    let x = col;
    let z = row - (col - (col & 1)) / 2;
    CubeCoord::from_xz(x, z)
}

/// Inverse of [`offset_to_cube`]: returns `(row, col)`.
#[inline]
pub const fn cube_to_offset(cube: CubeCoord) -> (i32, i32) {
    let col = cube.x;
    let row = cube.z + (cube.x - (cube.x & 1)) / 2;
    (row, col)
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Flat-topped hex layout values for a single `(col, row)` cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexLayout {
    /// Horizontal position of the column.
    pub x: f32,
    /// Vertical position of the row, unshifted.
    pub y: f32,
    /// Vertical position shifted down by half a hex height.
    pub y_shifted: f32,
    /// Whether this column is one of the shifted (odd) columns.
    pub shifted: bool,
}

impl HexLayout {
    /// The rendered centre of the hex.
    pub fn center(&self) -> (f32, f32) {
        if self.shifted {
            (self.x, self.y_shifted)
        } else {
            (self.x, self.y)
        }
    }
}

/// Compute layout positions for the hex at `(col, row)` with the given
/// outer radius.
pub fn layout_position(col: i32, row: i32, hex_radius: f32) -> HexLayout {
    let sqrt3 = 3f32.sqrt();
    let x = hex_radius * 1.5 * col as f32;
    let y = hex_radius * sqrt3 * row as f32;
    HexLayout {
        x,
        y,
        y_shifted: y + hex_radius * sqrt3 * 0.5,
        shifted: col & 1 == 1,
    }
}
