use hexpath_core::{CubeCoord, HexGrid};

/// Minimal pathfinding interface: topology and obstacles.
pub trait Pather {
    /// Append neighbors of `c` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, c: CubeCoord, buf: &mut Vec<CubeCoord>);

    /// Whether `c` must not be expanded into.
    fn is_obstacle(&self, c: CubeCoord) -> bool;
}

/// Pather with per-tile travel costs.
pub trait WeightedPather: Pather {
    /// Travel cost of the tile at `c`, `None` if there is no tile. Must be > 0.
    fn travel_cost(&self, c: CubeCoord) -> Option<u32>;
}

/// Weighted pather that knows its own destination.
pub trait GoalPather: WeightedPather {
    fn goal(&self) -> Option<CubeCoord>;
}

impl Pather for HexGrid {
    fn neighbors(&self, c: CubeCoord, buf: &mut Vec<CubeCoord>) {
        HexGrid::neighbors(self, c, buf);
    }

    fn is_obstacle(&self, c: CubeCoord) -> bool {
        HexGrid::is_obstacle(self, c)
    }
}

impl WeightedPather for HexGrid {
    fn travel_cost(&self, c: CubeCoord) -> Option<u32> {
        HexGrid::travel_cost(self, c)
    }
}

impl GoalPather for HexGrid {
    fn goal(&self) -> Option<CubeCoord> {
        HexGrid::goal(self)
    }
}
