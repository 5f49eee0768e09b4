//! **hexpath-core**: core types for pathfinding on hexagonal grids.
//!
//! This crate provides cube-coordinate geometry with odd-q offset
//! conversion, the tile model, and [`HexGrid`], the coordinate → tile map
//! with its single goal. The seams to the outside world are traits:
//! [`TileFactory`] supplies tile data, [`RandomSource`] shuffles goal
//! candidates, and [`PresentationSink`] receives tile state changes.

pub mod error;
pub mod geom;
pub mod grid;
pub mod sink;
pub mod tile;

pub use error::GridError;
pub use geom::{CubeCoord, HEX_DIRECTIONS, HexLayout, cube_to_offset, layout_position, offset_to_cube};
pub use grid::{GenerationReport, GridConfig, HexGrid, TileFactory};
pub use sink::{PresentationSink, RandomSource, StateLog};
pub use tile::{TileKind, TileRecord, TileSpec, TileState};
