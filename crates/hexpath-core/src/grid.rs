//! The hex tile map.
//!
//! A [`HexGrid`] is filled from a rectangular odd-q area by a
//! [`TileFactory`], then gets a single goal picked by [`HexGrid::set_goal`].
//! It is always regenerated as a whole: both generation entry points build
//! the new tile map on the side and swap it in only once every cell has been
//! produced.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use crate::error::GridError;
use crate::geom::{CubeCoord, HexLayout, cube_to_offset, layout_position, offset_to_cube};
use crate::sink::{PresentationSink, RandomSource};
use crate::tile::{TileRecord, TileSpec, TileState};

/// Dimensions and spacing of the generated area.
///
/// Dimensions are signed to match offset addressing. A negative width or
/// height is treated as zero: the area is empty and generation inserts
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Number of columns. Negative counts as zero.
    pub width: i32,
    /// Number of rows. Negative counts as zero.
    pub height: i32,
    /// Gap between two neighboring hexes, on top of their own size.
    pub spacing: f32,
    /// Outer radius of a single hex before spacing.
    pub base_radius: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            spacing: 2.0,
            base_radius: 100.0,
        }
    }
}

impl GridConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Radius used for layout, spacing included.
    #[inline]
    pub fn hex_radius(&self) -> f32 {
        self.base_radius + self.spacing
    }

    /// Number of cells in the generation area.
    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Every cube coordinate of the area, column by column.
    pub fn cells(&self) -> impl Iterator<Item = CubeCoord> + use<> {
        let height = self.height.max(0);
        (0..self.width.max(0))
            .flat_map(move |col| (0..height).map(move |row| offset_to_cube(row, col)))
    }

    /// Layout of the hex at `coord` for renderers.
    pub fn layout(&self, coord: CubeCoord) -> HexLayout {
        let (row, col) = cube_to_offset(coord);
        layout_position(col, row, self.hex_radius())
    }
}

/// Produces tile data for a cell during generation.
///
/// Implemented for every `FnMut(CubeCoord) -> Result<TileSpec, E>`.
pub trait TileFactory {
    type Error: fmt::Display;

    fn create(&mut self, coord: CubeCoord) -> Result<TileSpec, Self::Error>;
}

impl<F, E> TileFactory for F
where
    F: FnMut(CubeCoord) -> Result<TileSpec, E>,
    E: fmt::Display,
{
    type Error = E;

    fn create(&mut self, coord: CubeCoord) -> Result<TileSpec, E> {
        self(coord)
    }
}

/// Outcome of a generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Number of tiles inserted.
    pub inserted: usize,
    /// Cells that were skipped, in generation order.
    pub failures: Vec<GridError>,
}

impl GenerationReport {
    /// Whether every cell of the area produced a tile.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Staging area for one generation pass.
struct Staging {
    tiles: HashMap<CubeCoord, TileRecord>,
    report: GenerationReport,
}

impl Staging {
    fn new(capacity: usize) -> Self {
        Self {
            tiles: HashMap::with_capacity(capacity),
            report: GenerationReport::default(),
        }
    }

    fn admit<E: fmt::Display>(&mut self, coord: CubeCoord, result: Result<TileSpec, E>) {
        let failure = match result {
            Ok(spec) if spec.travel_cost > 0 => {
                self.tiles.insert(coord, TileRecord::from(spec));
                self.report.inserted += 1;
                return;
            }
            Ok(_) => GridError::InvalidTravelCost { coord },
            Err(e) => GridError::TileFactory {
                coord,
                reason: e.to_string(),
            },
        };
        log::warn!("skipping cell: {failure}");
        self.report.failures.push(failure);
    }
}

/// A map of cube coordinates to tiles, with one designated goal.
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    config: GridConfig,
    tiles: HashMap<CubeCoord, TileRecord>,
    goal: Option<CubeCoord>,
}

impl HexGrid {
    /// Create an empty grid. Call [`generate`](Self::generate) to fill it.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            tiles: HashMap::new(),
            goal: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration used by the next generation.
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
    }

    /// Remove every tile and the goal. Configuration is kept.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.goal = None;
    }

    /// Regenerate the whole map, asking `factory` for every cell.
    ///
    /// Failed cells are skipped and reported; generation always runs over
    /// the full area. The previous tiles and goal are discarded.
    pub fn generate<F: TileFactory>(&mut self, mut factory: F) -> GenerationReport {
        let mut staging = Staging::new(self.config.cell_count());
        for coord in self.config.cells() {
            staging.admit(coord, factory.create(coord));
        }
        self.install(staging)
    }

    /// Like [`generate`](Self::generate), for factories that load tile data
    /// asynchronously. Each cell is awaited in turn and the map is only
    /// replaced once all of them resolved.
    pub async fn generate_async<F, Fut, E>(&mut self, mut factory: F) -> GenerationReport
    where
        F: FnMut(CubeCoord) -> Fut,
        Fut: Future<Output = Result<TileSpec, E>>,
        E: fmt::Display,
    {
        let mut staging = Staging::new(self.config.cell_count());
        for coord in self.config.cells() {
            let result = factory(coord).await;
            staging.admit(coord, result);
        }
        self.install(staging)
    }

    fn install(&mut self, staging: Staging) -> GenerationReport {
        self.tiles = staging.tiles;
        self.goal = None;
        log::debug!(
            "generated {}x{} grid: {} tiles, {} skipped",
            self.config.width,
            self.config.height,
            staging.report.inserted,
            staging.report.failures.len()
        );
        staging.report
    }

    /// Pick the goal: shuffle all coordinates with `random`, then take the
    /// first walkable one and mark it [`TileState::Special`].
    ///
    /// Fails with [`GridError::NoValidGoal`] when every tile is an obstacle
    /// (or the grid is empty), and with [`GridError::GoalAlreadySet`] when a
    /// goal was already chosen since the last generation.
    pub fn set_goal<R, S>(&mut self, random: &mut R, sink: &mut S) -> Result<CubeCoord, GridError>
    where
        R: RandomSource + ?Sized,
        S: PresentationSink + ?Sized,
    {
        if let Some(goal) = self.goal {
            return Err(GridError::GoalAlreadySet { goal });
        }
        let mut coords = self.coords();
        random.shuffle(&mut coords);
        let Some(goal) = coords.into_iter().find(|&c| !self.is_obstacle(c)) else {
            log::warn!("no walkable tile among {} for the goal", self.tiles.len());
            return Err(GridError::NoValidGoal);
        };
        self.goal = Some(goal);
        self.set_state(goal, TileState::Special, sink);
        log::debug!("goal set at {goal}");
        Ok(goal)
    }

    /// The goal of the current generation, if one was chosen.
    #[inline]
    pub fn goal(&self) -> Option<CubeCoord> {
        self.goal
    }

    /// Whether `coord` holds an obstacle. Absent tiles are not obstacles.
    #[inline]
    pub fn is_obstacle(&self, coord: CubeCoord) -> bool {
        self.tiles.get(&coord).is_some_and(TileRecord::is_obstacle)
    }

    /// Append the neighbors of `coord` that exist in the map to `buf`.
    /// The caller clears `buf` before calling.
    pub fn neighbors(&self, coord: CubeCoord, buf: &mut Vec<CubeCoord>) {
        buf.extend(self.neighbor_iter(coord));
    }

    /// Iterator over the neighbors of `coord` that exist in the map.
    pub fn neighbor_iter(&self, coord: CubeCoord) -> impl Iterator<Item = CubeCoord> + '_ {
        coord
            .neighbors()
            .into_iter()
            .filter(|n| self.tiles.contains_key(n))
    }

    #[inline]
    pub fn tile(&self, coord: CubeCoord) -> Option<&TileRecord> {
        self.tiles.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: CubeCoord) -> bool {
        self.tiles.contains_key(&coord)
    }

    /// Travel cost of the tile at `coord`.
    #[inline]
    pub fn travel_cost(&self, coord: CubeCoord) -> Option<u32> {
        self.tiles.get(&coord).map(|t| t.travel_cost)
    }

    #[inline]
    pub fn tile_state(&self, coord: CubeCoord) -> Option<TileState> {
        self.tiles.get(&coord).map(|t| t.state)
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All coordinates, sorted.
    pub fn coords(&self) -> Vec<CubeCoord> {
        let mut coords: Vec<CubeCoord> = self.tiles.keys().copied().collect();
        coords.sort_unstable();
        coords
    }

    /// Iterate over all tiles in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (CubeCoord, &TileRecord)> + '_ {
        self.tiles.iter().map(|(&c, t)| (c, t))
    }

    /// Set the presentation state of one tile and forward it to `sink`.
    /// Returns `false` if the tile does not exist.
    pub fn set_state<S>(&mut self, coord: CubeCoord, state: TileState, sink: &mut S) -> bool
    where
        S: PresentationSink + ?Sized,
    {
        let Some(tile) = self.tiles.get_mut(&coord) else {
            return false;
        };
        tile.state = state;
        sink.apply_tile_state(coord, state);
        true
    }

    /// Set every tile back to [`TileState::Normal`].
    pub fn reset_states<S: PresentationSink + ?Sized>(&mut self, sink: &mut S) {
        for coord in self.coords() {
            self.set_state(coord, TileState::Normal, sink);
        }
    }

    /// Overwrite a single tile outside of generation. Used to build
    /// hand-made maps.
    pub fn insert(&mut self, coord: CubeCoord, spec: TileSpec) -> Result<(), GridError> {
        if spec.travel_cost == 0 {
            return Err(GridError::InvalidTravelCost { coord });
        }
        self.tiles.insert(coord, TileRecord::from(spec));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::HEX_DIRECTIONS;
    use crate::sink::StateLog;
    use crate::tile::TileKind;

    /// Leaves the order untouched.
    struct NoShuffle;

    impl RandomSource for NoShuffle {
        fn shuffle(&mut self, _coords: &mut [CubeCoord]) {}
    }

    /// Reverses the order.
    struct Reverse;

    impl RandomSource for Reverse {
        fn shuffle(&mut self, coords: &mut [CubeCoord]) {
            coords.reverse();
        }
    }

    fn walkable(_: CubeCoord) -> Result<TileSpec, String> {
        Ok(TileSpec::walkable(1))
    }

    #[test]
    fn generate_fills_area() {
        let mut grid = HexGrid::new(GridConfig::new(4, 3));
        let report = grid.generate(walkable);
        assert!(report.is_complete());
        assert_eq!(report.inserted, 12);
        assert_eq!(grid.len(), 12);
        for row in 0..3 {
            for col in 0..4 {
                assert!(grid.contains(offset_to_cube(row, col)));
            }
        }
        assert!(grid.goal().is_none());
    }

    #[test]
    fn generate_skips_failed_cells() {
        let bad = offset_to_cube(1, 1);
        let zero = offset_to_cube(2, 2);
        let mut grid = HexGrid::new(GridConfig::new(3, 3));
        let report = grid.generate(|c: CubeCoord| {
            if c == bad {
                Err("asset missing")
            } else if c == zero {
                Ok(TileSpec::walkable(0))
            } else {
                Ok(TileSpec::walkable(2))
            }
        });
        assert_eq!(report.inserted, 7);
        assert_eq!(report.failures.len(), 2);
        assert!(matches!(
            &report.failures[0],
            GridError::TileFactory { coord, .. } if *coord == bad
        ));
        assert_eq!(
            report.failures[1],
            GridError::InvalidTravelCost { coord: zero }
        );
        assert!(!grid.contains(bad));
        assert!(!grid.contains(zero));
        assert!(!grid.is_obstacle(bad));
    }

    #[test]
    fn generate_async_awaits_every_cell() {
        let mut grid = HexGrid::new(GridConfig::new(3, 2));
        let report = tokio_test::block_on(grid.generate_async(|c: CubeCoord| async move {
            if c == CubeCoord::ZERO {
                Err("load failed")
            } else {
                Ok(TileSpec::walkable(3))
            }
        }));
        assert_eq!(report.inserted, 5);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(grid.len(), 5);
        assert_eq!(grid.travel_cost(offset_to_cube(1, 2)), Some(3));
    }

    #[test]
    fn regenerate_replaces_everything() {
        let mut grid = HexGrid::new(GridConfig::new(3, 3));
        grid.generate(walkable);
        grid.set_goal(&mut NoShuffle, &mut ()).unwrap();
        grid.set_config(GridConfig::new(2, 2));
        grid.generate(walkable);
        assert_eq!(grid.len(), 4);
        assert!(grid.goal().is_none());
    }

    #[test]
    fn clear_keeps_config() {
        let config = GridConfig::new(5, 6);
        let mut grid = HexGrid::new(config);
        grid.generate(walkable);
        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.goal().is_none());
        assert_eq!(*grid.config(), config);
    }

    #[test]
    fn neighbors_are_symmetric() {
        let mut grid = HexGrid::new(GridConfig::new(6, 5));
        grid.generate(walkable);
        let mut buf = Vec::new();
        for a in grid.coords() {
            for d in HEX_DIRECTIONS {
                let b = a + d;
                if grid.contains(b) {
                    buf.clear();
                    grid.neighbors(b, &mut buf);
                    assert!(buf.contains(&a), "{a} missing from neighbors of {b}");
                }
            }
        }
    }

    #[test]
    fn corner_has_fewer_neighbors() {
        let mut grid = HexGrid::new(GridConfig::new(3, 3));
        grid.generate(walkable);
        let mut buf = Vec::new();
        grid.neighbors(offset_to_cube(0, 0), &mut buf);
        assert_eq!(buf.len(), 2);
        buf.clear();
        grid.neighbors(offset_to_cube(1, 1), &mut buf);
        assert_eq!(buf.len(), 6);
    }

    #[test]
    fn is_obstacle_checks_kind() {
        let wall = offset_to_cube(0, 1);
        let mut grid = HexGrid::new(GridConfig::new(2, 2));
        grid.generate(|c: CubeCoord| -> Result<TileSpec, String> {
            Ok(if c == wall {
                TileSpec::blocked()
            } else {
                TileSpec::walkable(1)
            })
        });
        assert!(grid.is_obstacle(wall));
        assert!(!grid.is_obstacle(CubeCoord::ZERO));
        assert!(!grid.is_obstacle(CubeCoord::new(40, -20, -20)));
    }

    #[test]
    fn set_goal_picks_only_walkable_tile() {
        let only = offset_to_cube(2, 1);
        for shuffle in [&mut NoShuffle as &mut dyn RandomSource, &mut Reverse] {
            let mut grid = HexGrid::new(GridConfig::new(3, 3));
            grid.generate(|c: CubeCoord| -> Result<TileSpec, String> {
                Ok(if c == only {
                    TileSpec::walkable(1)
                } else {
                    TileSpec::blocked()
                })
            });
            let mut log = StateLog::new();
            assert_eq!(grid.set_goal(shuffle, &mut log), Ok(only));
            assert_eq!(grid.goal(), Some(only));
            assert_eq!(grid.tile_state(only), Some(TileState::Special));
            assert_eq!(log.entries(), &[(only, TileState::Special)]);
        }
    }

    #[test]
    fn set_goal_follows_shuffle_order() {
        let mut grid = HexGrid::new(GridConfig::new(3, 3));
        grid.generate(walkable);
        let coords = grid.coords();
        assert_eq!(grid.set_goal(&mut NoShuffle, &mut ()), Ok(coords[0]));

        grid.generate(walkable);
        assert_eq!(grid.set_goal(&mut Reverse, &mut ()), Ok(coords[coords.len() - 1]));
    }

    #[test]
    fn set_goal_fails_without_walkable_tiles() {
        let mut grid = HexGrid::new(GridConfig::new(2, 2));
        grid.generate(|_: CubeCoord| -> Result<TileSpec, String> { Ok(TileSpec::blocked()) });
        assert_eq!(grid.set_goal(&mut NoShuffle, &mut ()), Err(GridError::NoValidGoal));
        assert!(grid.goal().is_none());

        let mut empty = HexGrid::new(GridConfig::new(0, 0));
        empty.generate(walkable);
        assert_eq!(empty.set_goal(&mut NoShuffle, &mut ()), Err(GridError::NoValidGoal));
    }

    #[test]
    fn set_goal_once_per_generation() {
        let mut grid = HexGrid::new(GridConfig::new(2, 2));
        grid.generate(walkable);
        let goal = grid.set_goal(&mut NoShuffle, &mut ()).unwrap();
        assert_eq!(
            grid.set_goal(&mut Reverse, &mut ()),
            Err(GridError::GoalAlreadySet { goal })
        );
        assert_eq!(grid.goal(), Some(goal));
    }

    #[test]
    fn reset_states_touches_every_tile() {
        let mut grid = HexGrid::new(GridConfig::new(2, 3));
        grid.generate(walkable);
        let c = offset_to_cube(1, 1);
        assert!(grid.set_state(c, TileState::Selected, &mut ()));
        assert!(!grid.set_state(CubeCoord::new(9, -9, 0), TileState::Selected, &mut ()));

        let mut log = StateLog::new();
        grid.reset_states(&mut log);
        assert_eq!(log.len(), 6);
        assert!(log.entries().iter().all(|&(_, s)| s == TileState::Normal));
        assert_eq!(grid.tile_state(c), Some(TileState::Normal));
    }

    #[test]
    fn insert_rejects_zero_cost() {
        let mut grid = HexGrid::new(GridConfig::default());
        let c = CubeCoord::ZERO;
        assert_eq!(
            grid.insert(c, TileSpec::walkable(0)),
            Err(GridError::InvalidTravelCost { coord: c })
        );
        assert!(grid.insert(c, TileSpec::walkable(5)).is_ok());
        assert_eq!(grid.tile(c).map(|t| t.kind), Some(TileKind::Walkable));
    }

    #[test]
    fn negative_dimensions_mean_empty_area() {
        for (w, h) in [(-3, 4), (4, -3), (-1, -1), (0, 5)] {
            let config = GridConfig::new(w, h);
            assert_eq!(config.cell_count(), 0);
            assert_eq!(config.cells().count(), 0);
            let mut grid = HexGrid::new(config);
            let report = grid.generate(walkable);
            assert_eq!(report, GenerationReport::default());
            assert!(grid.is_empty());
        }
    }

    #[test]
    fn config_layout() {
        let config = GridConfig::default();
        assert_eq!(config.hex_radius(), 102.0);
        assert_eq!(config.cell_count(), 64);
        assert_eq!(config.cells().count(), 64);
        let l = config.layout(offset_to_cube(0, 1));
        assert!(l.shifted);
        assert_eq!(l.x, 102.0 * 1.5);
    }
}
