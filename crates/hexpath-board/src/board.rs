//! The generation cycle and the tile activation entry point.

use std::fmt;
use std::future::Future;

use hexpath_core::{
    CubeCoord, GenerationReport, GridConfig, GridError, HexGrid, PresentationSink, RandomSource,
    TileFactory, TileSpec, TileState,
};
use hexpath_paths::{PathFinder, PathTrace, SearchConfig, apply_path_states, reconstruct_path};

/// Result of [`Board::generate_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOutcome {
    pub report: GenerationReport,
    /// The chosen goal, or why none could be chosen.
    pub goal: Result<CubeCoord, GridError>,
}

/// What happened when a tile was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A path to the goal was found and published.
    Routed(PathTrace),
    /// The goal cannot be reached from the activated tile.
    Unreachable,
    /// The current map has no goal.
    NoGoal,
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Routed(trace) => write!(f, "routed in {} hops", trace.hops()),
            Self::Unreachable => write!(f, "goal unreachable"),
            Self::NoGoal => write!(f, "no goal"),
        }
    }
}

/// A hex grid with its search state and presentation sink.
///
/// Owns one [`PathFinder`], so activations on a board run one at a time.
#[derive(Debug)]
pub struct Board<S> {
    grid: HexGrid,
    finder: PathFinder,
    sink: S,
}

impl<S: PresentationSink> Board<S> {
    pub fn new(config: GridConfig, search: SearchConfig, sink: S) -> Self {
        Self {
            grid: HexGrid::new(config),
            finder: PathFinder::new(search),
            sink,
        }
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn search_config(&self) -> &SearchConfig {
        self.finder.config()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Clear the map, regenerate it from `factory`, and pick a goal.
    pub fn generate_map<F, R>(&mut self, factory: F, random: &mut R) -> MapOutcome
    where
        F: TileFactory,
        R: RandomSource + ?Sized,
    {
        self.grid.clear();
        let report = self.grid.generate(factory);
        self.finish_generation(report, random)
    }

    /// [`generate_map`](Self::generate_map) for asynchronous tile factories.
    /// The goal is only picked once every cell has resolved.
    pub async fn generate_map_async<F, Fut, E, R>(&mut self, factory: F, random: &mut R) -> MapOutcome
    where
        F: FnMut(CubeCoord) -> Fut,
        Fut: Future<Output = Result<TileSpec, E>>,
        E: fmt::Display,
        R: RandomSource + ?Sized,
    {
        self.grid.clear();
        let report = self.grid.generate_async(factory).await;
        self.finish_generation(report, random)
    }

    fn finish_generation<R>(&mut self, report: GenerationReport, random: &mut R) -> MapOutcome
    where
        R: RandomSource + ?Sized,
    {
        let goal = self.grid.set_goal(random, &mut self.sink);
        if let Err(e) = &goal {
            log::warn!("map generated without a goal: {e}");
        }
        MapOutcome { report, goal }
    }

    /// Route from `coord` to the goal and publish the result.
    ///
    /// On success the path is traced and tile states are applied; otherwise
    /// every tile goes back to [`TileState::Normal`].
    pub fn on_tile_activated(&mut self, coord: CubeCoord) -> Activation {
        let Some(goal) = self.grid.goal() else {
            self.grid.reset_states(&mut self.sink);
            return Activation::NoGoal;
        };

        let search = self.finder.find_path(&self.grid, coord);
        if !search.found {
            log::debug!("no route from {coord} to {goal}");
            self.grid.reset_states(&mut self.sink);
            return Activation::Unreachable;
        }

        let trace = reconstruct_path(&search.came_from, coord, goal);
        apply_path_states(&mut self.grid, &mut self.sink, coord, &trace);
        Activation::Routed(trace)
    }

    /// Highlight a tile under the cursor. Only `Normal` tiles change.
    pub fn on_tile_hovered(&mut self, coord: CubeCoord) -> bool {
        if self.grid.tile_state(coord) != Some(TileState::Normal) {
            return false;
        }
        self.grid.set_state(coord, TileState::Hovered, &mut self.sink)
    }

    /// Undo [`on_tile_hovered`](Self::on_tile_hovered).
    pub fn on_tile_unhovered(&mut self, coord: CubeCoord) -> bool {
        if self.grid.tile_state(coord) != Some(TileState::Hovered) {
            return false;
        }
        self.grid.set_state(coord, TileState::Normal, &mut self.sink)
    }
}
