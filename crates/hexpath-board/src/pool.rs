//! Random tile sources backed by `rand`.

use std::fmt;

use hexpath_core::{CubeCoord, RandomSource, TileSpec};
use rand::seq::SliceRandom;
use rand::{Rng, RngExt};

/// A set of tile templates; generation draws one uniformly per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePool {
    templates: Vec<TileSpec>,
}

impl TilePool {
    pub fn new(templates: Vec<TileSpec>) -> Self {
        Self { templates }
    }

    /// Plain ground, rough ground, and walls.
    pub fn standard() -> Self {
        Self::new(vec![
            TileSpec::walkable(1),
            TileSpec::walkable(1),
            TileSpec::walkable(3),
            TileSpec::blocked(),
        ])
    }

    pub fn push(&mut self, spec: TileSpec) {
        self.templates.push(spec);
    }

    pub fn templates(&self) -> &[TileSpec] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Draw one template.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<TileSpec, PoolError> {
        if self.templates.is_empty() {
            return Err(PoolError::Empty);
        }
        let i = rng.random_range(0..self.templates.len());
        Ok(self.templates[i])
    }

    /// A tile factory drawing from this pool with `rng`.
    pub fn factory<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
    ) -> impl FnMut(CubeCoord) -> Result<TileSpec, PoolError> + 'a {
        move |_| self.pick(&mut *rng)
    }
}

/// Errors from drawing a [`TilePool`] template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The pool holds no templates.
    Empty,
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tile pool is empty"),
        }
    }
}

impl std::error::Error for PoolError {}

/// [`RandomSource`] over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn shuffle(&mut self, coords: &mut [CubeCoord]) {
        coords.shuffle(&mut self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpath_core::TileKind;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pick_draws_from_templates() {
        let pool = TilePool::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let mut kinds = Vec::new();
        for _ in 0..200 {
            let spec = pool.pick(&mut rng).unwrap();
            assert!(pool.templates().contains(&spec));
            kinds.push(spec.kind);
        }
        assert!(kinds.contains(&TileKind::Walkable));
        assert!(kinds.contains(&TileKind::Blockable));
    }

    #[test]
    fn empty_pool_fails() {
        let pool = TilePool::default();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pool.pick(&mut rng), Err(PoolError::Empty));
        let mut factory = pool.factory(&mut rng);
        assert_eq!(factory(CubeCoord::ZERO), Err(PoolError::Empty));
    }

    #[test]
    fn rng_source_permutes() {
        let original: Vec<CubeCoord> = (0..20).map(|x| CubeCoord::from_xz(x, 0)).collect();
        let mut coords = original.clone();
        RngSource(StdRng::seed_from_u64(5)).shuffle(&mut coords);
        let mut sorted = coords.clone();
        sorted.sort();
        assert_eq!(sorted, original);

        let mut again = original.clone();
        RngSource(StdRng::seed_from_u64(5)).shuffle(&mut again);
        assert_eq!(coords, again);
    }
}
