use hexpath_core::{CubeCoord, HexGrid, PresentationSink, TileState};

use crate::dijkstra::{CostConvention, PredecessorMap};
use crate::traits::WeightedPather;

/// An ordered start → goal path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathTrace {
    /// Tiles from the first reached tile to the goal, both included.
    pub steps: Vec<CubeCoord>,
    /// Set when the predecessor chain broke before reaching the start;
    /// `steps` then begins at the last tile that could be traced.
    pub truncated: bool,
}

impl PathTrace {
    /// Number of moves along the path.
    #[inline]
    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of step costs along the path, or `None` if a charged tile is
    /// missing from `pather`.
    pub fn total_cost<P: WeightedPather + ?Sized>(
        &self,
        pather: &P,
        convention: CostConvention,
    ) -> Option<u64> {
        self.steps
            .windows(2)
            .map(|w| convention.step_cost(pather, w[0], w[1]).map(u64::from))
            .sum()
    }
}

/// Follow `came_from` back from `goal` to `start` and return the path in
/// forward order.
///
/// A missing link stops the walk with a warning and yields a truncated
/// path. Cyclic maps are cut off once more links were followed than the map
/// holds.
pub fn reconstruct_path(came_from: &PredecessorMap, start: CubeCoord, goal: CubeCoord) -> PathTrace {
    let mut steps = vec![goal];
    let mut current = goal;
    let mut truncated = false;

    while current != start {
        if steps.len() > came_from.len() {
            log::warn!("predecessor chain from {goal} loops before reaching {start}");
            truncated = true;
            break;
        }
        match came_from.get(current) {
            Some(prev) => {
                steps.push(prev);
                current = prev;
            }
            None => {
                log::warn!("broken predecessor chain at {current} while tracing {start} -> {goal}");
                truncated = true;
                break;
            }
        }
    }

    steps.reverse();
    PathTrace { steps, truncated }
}

/// Publish a path on the grid: every tile back to
/// [`Normal`](TileState::Normal), path tiles
/// [`Selected`](TileState::Selected), then start and goal
/// [`Special`](TileState::Special).
pub fn apply_path_states<S>(grid: &mut HexGrid, sink: &mut S, start: CubeCoord, trace: &PathTrace)
where
    S: PresentationSink + ?Sized,
{
    grid.reset_states(sink);
    for &c in &trace.steps {
        grid.set_state(c, TileState::Selected, sink);
    }
    grid.set_state(start, TileState::Special, sink);
    if let Some(goal) = grid.goal() {
        grid.set_state(goal, TileState::Special, sink);
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn trace_round_trip() {
        let trace = PathTrace {
            steps: vec![CubeCoord::ZERO, CubeCoord::new(1, -1, 0), CubeCoord::new(2, -1, -1)],
            truncated: true,
        };
        let json = serde_json::to_string(&trace).unwrap();
        let back: PathTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, back);
    }
}
