//! Expedition map - the static location graph
//!
//! Built once from configuration, validated, then read-only for the whole
//! run.

use ahash::AHashMap;
use std::collections::{BTreeSet, BinaryHeap, HashMap, VecDeque};

use super::location::{Edge, Location};
use crate::core::error::ConfigError;
use crate::core::types::{Hours, LocationId};

#[derive(Debug, Clone)]
pub struct LocationGraph {
    /// Locations in configuration order
    locations: Vec<Location>,
    index: AHashMap<LocationId, usize>,
}

impl LocationGraph {
    /// Build a graph, rejecting duplicate ids, dangling edges and
    /// out-of-range risk weights
    pub fn new(locations: Vec<Location>) -> Result<Self, ConfigError> {
        let mut index = AHashMap::with_capacity(locations.len());
        for (i, loc) in locations.iter().enumerate() {
            if index.insert(loc.id.clone(), i).is_some() {
                return Err(ConfigError::DuplicateLocation(loc.id.clone()));
            }
        }

        for loc in &locations {
            for edge in &loc.edges {
                if !index.contains_key(&edge.to) {
                    return Err(ConfigError::UnknownEdgeTarget {
                        from: loc.id.clone(),
                        to: edge.to.clone(),
                    });
                }
                if !(0.0..=1.0).contains(&edge.risk) {
                    return Err(ConfigError::InvalidTunable(format!(
                        "risk on edge {} -> {} must lie in [0, 1]",
                        loc.id, edge.to
                    )));
                }
            }
        }

        Ok(Self { locations, index })
    }

    pub fn get(&self, id: &LocationId) -> Option<&Location> {
        self.index.get(id).map(|&i| &self.locations[i])
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    /// Direct edge from `from` to `to`
    pub fn edge(&self, from: &LocationId, to: &LocationId) -> Option<&Edge> {
        self.get(from)?.edge_to(to)
    }

    /// Every location reachable from `start`, including `start`
    pub fn reachable_from(&self, start: &LocationId) -> BTreeSet<LocationId> {
        let mut seen = BTreeSet::new();
        if !self.contains(start) {
            return seen;
        }

        let mut queue = VecDeque::from([start.clone()]);
        seen.insert(start.clone());
        while let Some(current) = queue.pop_front() {
            let Some(loc) = self.get(&current) else {
                continue;
            };
            for edge in &loc.edges {
                if seen.insert(edge.to.clone()) {
                    queue.push_back(edge.to.clone());
                }
            }
        }
        seen
    }

    /// Check that start and destination exist and that the destination can
    /// be reached
    pub fn validate_route(
        &self,
        start: &LocationId,
        destination: &LocationId,
    ) -> Result<(), ConfigError> {
        if !self.contains(start) {
            return Err(ConfigError::UnknownLocation(start.clone()));
        }
        if !self.contains(destination) {
            return Err(ConfigError::UnknownLocation(destination.clone()));
        }
        if !self.reachable_from(start).contains(destination) {
            return Err(ConfigError::DisconnectedGraph {
                start: start.clone(),
                destination: destination.clone(),
            });
        }
        Ok(())
    }

    /// Dijkstra over base travel hours. Returns the full path including both
    /// endpoints, or None if `to` is unreachable.
    pub fn fastest_route(&self, from: &LocationId, to: &LocationId) -> Option<Vec<LocationId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }

        if from == to {
            return Some(vec![from.clone()]);
        }

        #[derive(PartialEq, Eq)]
        struct Node {
            cost: u64,
            idx: usize,
        }

        impl Ord for Node {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                // Min-heap on cost; index breaks ties deterministically
                other
                    .cost
                    .cmp(&self.cost)
                    .then_with(|| other.idx.cmp(&self.idx))
            }
        }
        impl PartialOrd for Node {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        let start = self.index[from];
        let goal = self.index[to];

        let mut dist: HashMap<usize, u64> = HashMap::new();
        let mut came_from: HashMap<usize, usize> = HashMap::new();
        let mut open_set = BinaryHeap::new();

        dist.insert(start, 0);
        open_set.push(Node { cost: 0, idx: start });

        while let Some(Node { cost, idx }) = open_set.pop() {
            if idx == goal {
                let mut path = vec![self.locations[goal].id.clone()];
                let mut current = goal;
                while let Some(&prev) = came_from.get(&current) {
                    path.push(self.locations[prev].id.clone());
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }

            if cost > *dist.get(&idx).unwrap_or(&u64::MAX) {
                continue;
            }

            for edge in &self.locations[idx].edges {
                let next = self.index[&edge.to];
                let tentative = cost + edge.base_hours as u64;
                if tentative < *dist.get(&next).unwrap_or(&u64::MAX) {
                    dist.insert(next, tentative);
                    came_from.insert(next, idx);
                    open_set.push(Node { cost: tentative, idx: next });
                }
            }
        }

        None
    }

    /// Sum of base hours along a path; None if some hop has no edge
    pub fn route_hours(&self, path: &[LocationId]) -> Option<Hours> {
        path.windows(2)
            .map(|pair| self.edge(&pair[0], &pair[1]).map(|e| e.base_hours))
            .sum()
    }
}
