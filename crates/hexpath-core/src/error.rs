use std::fmt;

use crate::geom::CubeCoord;

/// Errors reported by [`HexGrid`](crate::HexGrid) generation and goal
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The tile factory failed for one cell. The cell was skipped.
    TileFactory { coord: CubeCoord, reason: String },
    /// The tile factory returned a zero travel cost. The cell was skipped.
    InvalidTravelCost { coord: CubeCoord },
    /// No non-obstacle tile exists to serve as goal.
    NoValidGoal,
    /// A goal was already chosen during this generation cycle.
    GoalAlreadySet { goal: CubeCoord },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileFactory { coord, reason } => {
                write!(f, "tile factory failed at {coord}: {reason}")
            }
            Self::InvalidTravelCost { coord } => {
                write!(f, "tile at {coord} has a zero travel cost")
            }
            Self::NoValidGoal => write!(f, "no walkable tile available for the goal"),
            Self::GoalAlreadySet { goal } => {
                write!(f, "goal already set at {goal} for this generation")
            }
        }
    }
}

impl std::error::Error for GridError {}
