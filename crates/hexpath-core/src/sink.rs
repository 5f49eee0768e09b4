//! Seams to external collaborators: tile presentation and randomness.

use crate::geom::CubeCoord;
use crate::tile::TileState;

/// Receives tile state changes. Fire-and-forget.
pub trait PresentationSink {
    fn apply_tile_state(&mut self, coord: CubeCoord, state: TileState);
}

/// Discards every update.
impl PresentationSink for () {
    fn apply_tile_state(&mut self, _coord: CubeCoord, _state: TileState) {}
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn apply_tile_state(&mut self, coord: CubeCoord, state: TileState) {
        (**self).apply_tile_state(coord, state);
    }
}

/// A sink that records every update in order.
#[derive(Debug, Clone, Default)]
pub struct StateLog {
    entries: Vec<(CubeCoord, TileState)>,
}

impl StateLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All updates received so far, oldest first.
    pub fn entries(&self) -> &[(CubeCoord, TileState)] {
        &self.entries
    }

    /// The most recent state applied to `coord`, if any.
    pub fn last_state(&self, coord: CubeCoord) -> Option<TileState> {
        self.entries
            .iter()
            .rev()
            .find(|(c, _)| *c == coord)
            .map(|&(_, s)| s)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PresentationSink for StateLog {
    fn apply_tile_state(&mut self, coord: CubeCoord, state: TileState) {
        self.entries.push((coord, state));
    }
}

/// Source of uniform permutations used to pick the goal.
pub trait RandomSource {
    /// Permute `coords` in place.
    fn shuffle(&mut self, coords: &mut [CubeCoord]);
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn shuffle(&mut self, coords: &mut [CubeCoord]) {
        (**self).shuffle(coords);
    }
}
