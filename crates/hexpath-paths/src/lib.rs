//! Pathfinding on hexagonal grids.
//!
//! This crate provides the search half of *hexpath*:
//!
//! - **Priority queue** with update-in-place pushes ([`PriorityQueue`])
//! - **Dijkstra** single-goal search ([`PathFinder::find_path`])
//! - **Path reconstruction** from the predecessor map, and publication of
//!   the resulting tile states ([`reconstruct_path`], [`apply_path_states`])
//!
//! [`PathFinder`] owns and reuses its frontier queue, so repeated searches
//! against the same grid do not reallocate after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor expansion |
//! | [`WeightedPather`] : [`Pather`] | [`PathFinder::find_path_to`], [`PathTrace::total_cost`] |
//! | [`GoalPather`] : [`WeightedPather`] | [`PathFinder::find_path`] |
//!
//! [`HexGrid`](hexpath_core::HexGrid) implements all three.

mod dijkstra;
mod queue;
mod reconstruct;
mod traits;

pub use dijkstra::{CostConvention, PathFinder, PredecessorMap, Search, SearchConfig};
pub use queue::{Order, PeekPosition, Priority, PriorityQueue};
pub use reconstruct::{PathTrace, apply_path_states, reconstruct_path};
pub use traits::{GoalPather, Pather, WeightedPather};
