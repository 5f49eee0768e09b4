//! A playable hex board: map generation from random tile pools, goal
//! selection, and routing on tile activation.
//!
//! [`Board`] ties a [`HexGrid`](hexpath_core::HexGrid) and a
//! [`PathFinder`](hexpath_paths::PathFinder) to a
//! [`PresentationSink`](hexpath_core::PresentationSink). Each generation
//! clears the map, asks a tile factory for every cell, and picks a new goal.
//! Activating a tile then routes from it to the goal and publishes tile
//! states through the sink.
//!
//! ```
//! use hexpath_board::{Activation, Board, RngSource, TilePool};
//! use hexpath_core::{GridConfig, StateLog, offset_to_cube};
//! use hexpath_paths::SearchConfig;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut board = Board::new(GridConfig::default(), SearchConfig::default(), StateLog::new());
//! let pool = TilePool::standard();
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = board.generate_map(pool.factory(&mut rng), &mut RngSource(StdRng::seed_from_u64(8)));
//! assert!(outcome.report.is_complete());
//!
//! match board.on_tile_activated(offset_to_cube(0, 0)) {
//!     Activation::Routed(trace) => assert!(!trace.is_empty()),
//!     Activation::Unreachable | Activation::NoGoal => {}
//! }
//! ```

mod board;
mod pool;

pub use board::{Activation, Board, MapOutcome};
pub use pool::{PoolError, RngSource, TilePool};
