//! Tile model: kind, presentation state, and the per-cell record.

use std::fmt;

/// Whether a tile can be walked through.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Walkable,
    Blockable,
}

impl TileKind {
    /// Whether tiles of this kind are excluded from search expansion.
    #[inline]
    pub const fn is_obstacle(self) -> bool {
        match self {
            Self::Walkable => false,
            Self::Blockable => true,
        }
    }
}

/// Presentation state of a tile, forwarded to a
/// [`PresentationSink`](crate::PresentationSink).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    Normal,
    Hovered,
    Selected,
    /// Start and goal markers.
    Special,
}

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Normal => "normal",
            Self::Hovered => "hovered",
            Self::Selected => "selected",
            Self::Special => "special",
        };
        f.write_str(s)
    }
}

/// What a tile factory produces for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSpec {
    /// Cost of traversing the tile. Must be > 0.
    pub travel_cost: u32,
    pub kind: TileKind,
}

impl TileSpec {
    pub const fn walkable(travel_cost: u32) -> Self {
        Self {
            travel_cost,
            kind: TileKind::Walkable,
        }
    }

    pub const fn blocked() -> Self {
        Self {
            travel_cost: 1,
            kind: TileKind::Blockable,
        }
    }
}

/// A tile as stored in the [`HexGrid`](crate::HexGrid).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRecord {
    pub travel_cost: u32,
    pub kind: TileKind,
    pub state: TileState,
}

impl TileRecord {
    #[inline]
    pub const fn is_obstacle(&self) -> bool {
        self.kind.is_obstacle()
    }
}

impl From<TileSpec> for TileRecord {
    fn from(spec: TileSpec) -> Self {
        Self {
            travel_cost: spec.travel_cost,
            kind: spec.kind,
            state: TileState::Normal,
        }
    }
}
