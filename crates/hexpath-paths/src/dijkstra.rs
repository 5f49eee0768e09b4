use std::collections::{HashMap, HashSet};

use hexpath_core::CubeCoord;

use crate::queue::{Order, PriorityQueue};
use crate::traits::{GoalPather, WeightedPather};

/// Which tile's travel cost is charged for a single step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostConvention {
    /// Charge the cost of the tile being left.
    #[default]
    LeavingTile,
    /// Charge the cost of the tile being entered.
    EnteringTile,
}

impl CostConvention {
    /// Cost of stepping from `from` to the adjacent `to`, or `None` if the
    /// charged tile does not exist.
    #[inline]
    pub fn step_cost<P: WeightedPather + ?Sized>(
        self,
        pather: &P,
        from: CubeCoord,
        to: CubeCoord,
    ) -> Option<u32> {
        match self {
            Self::LeavingTile => pather.travel_cost(from),
            Self::EnteringTile => pather.travel_cost(to),
        }
    }
}

/// Search settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub convention: CostConvention,
}

/// "Came-from" pointers along the cheapest routes found by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredecessorMap {
    links: HashMap<CubeCoord, CubeCoord>,
}

impl PredecessorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the best known route to `to` arrives from `from`.
    pub fn insert(&mut self, to: CubeCoord, from: CubeCoord) {
        self.links.insert(to, from);
    }

    #[inline]
    pub fn get(&self, to: CubeCoord) -> Option<CubeCoord> {
        self.links.get(&to).copied()
    }

    #[inline]
    pub fn contains(&self, to: CubeCoord) -> bool {
        self.links.contains_key(&to)
    }

    /// Drop the link into `to`, returning it.
    pub fn remove(&mut self, to: CubeCoord) -> Option<CubeCoord> {
        self.links.remove(&to)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CubeCoord, CubeCoord)> + '_ {
        self.links.iter().map(|(&to, &from)| (to, from))
    }
}

/// Result of [`PathFinder::find_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub came_from: PredecessorMap,
    /// Whether the goal is reachable from the start.
    pub found: bool,
    /// Exact cost of the cheapest route to the goal, when found.
    pub cost: Option<u64>,
    /// Number of tiles settled by the search.
    pub expanded: usize,
}

impl Search {
    fn unreachable() -> Self {
        Self {
            came_from: PredecessorMap::new(),
            found: false,
            cost: None,
            expanded: 0,
        }
    }
}

/// Single-goal Dijkstra search over a hex pather.
///
/// The frontier queue and scratch buffers are kept between searches, so a
/// `PathFinder` is meant to be reused. Searches that must run side by side
/// need one `PathFinder` each; the grid itself is only read.
#[derive(Debug, Clone, Default)]
pub struct PathFinder {
    config: SearchConfig,
    queue: PriorityQueue<CubeCoord, u64>,
    visited: HashSet<CubeCoord>,
    nbuf: Vec<CubeCoord>,
}

impl PathFinder {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            queue: PriorityQueue::new(Order::Ascending),
            visited: HashSet::new(),
            nbuf: Vec::with_capacity(6),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Search from `start` to the pather's goal.
    ///
    /// Returns a search that is not `found` when no goal is set.
    pub fn find_path<P: GoalPather + ?Sized>(&mut self, pather: &P, start: CubeCoord) -> Search {
        let Some(goal) = pather.goal() else {
            log::debug!("search from {start} skipped: no goal set");
            return Search::unreachable();
        };
        self.find_path_to(pather, start, goal)
    }

    /// Search from `start` to an explicit `goal`.
    ///
    /// A start that is missing from the grid never reaches anything. An
    /// obstacle start is still left: only tiles being entered are filtered.
    /// The search stops as soon as the goal is popped from the frontier.
    pub fn find_path_to<P: WeightedPather + ?Sized>(
        &mut self,
        pather: &P,
        start: CubeCoord,
        goal: CubeCoord,
    ) -> Search {
        self.queue.clear();
        self.visited.clear();

        if pather.travel_cost(start).is_none() {
            log::debug!("search from {start} skipped: no tile there");
            return Search::unreachable();
        }

        let convention = self.config.convention;
        let mut came_from = PredecessorMap::new();
        let mut goal_cost = None;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.queue.push(start, 0);

        while let Some((current, priority)) = self.queue.pop_with_priority() {
            if current == goal {
                goal_cost = Some(priority);
                break;
            }

            nbuf.clear();
            pather.neighbors(current, &mut nbuf);

            for &next in nbuf.iter() {
                if self.visited.contains(&next) || pather.is_obstacle(next) {
                    continue;
                }
                let Some(step) = convention.step_cost(pather, current, next) else {
                    continue;
                };
                let new_cost = priority.saturating_add(u64::from(step));
                let improves = match self.queue.find(&next) {
                    Some(queued) => new_cost < queued,
                    None => true,
                };
                if improves {
                    log::trace!("relax {current} -> {next} at {new_cost}");
                    self.queue.push(next, new_cost);
                    came_from.insert(next, current);
                }
            }

            self.visited.insert(current);
        }

        self.nbuf = nbuf;

        let found = start == goal || came_from.contains(goal);
        let expanded = self.visited.len();
        log::debug!(
            "search {start} -> {goal}: found={found}, expanded {expanded} tiles, {} still queued",
            self.queue.len()
        );
        if !self.queue.is_empty() {
            log::trace!("{}", self.queue);
        }
        Search {
            came_from,
            found,
            cost: if found { goal_cost } else { None },
            expanded,
        }
    }
}
