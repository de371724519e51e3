use priority_queue::PriorityQueue;
use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};

use crate::models::{Kilometers, NodeId};
use crate::utils::location_graph::LocationGraph;

// Total order over tentative distances so they can be used as queue priorities
#[derive(PartialEq, Copy, Clone, Debug)]
struct Tentative(Kilometers);

impl Eq for Tentative {}

impl PartialOrd for Tentative {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tentative {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Result of a single-pair shortest path query
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Length of the path, `f64::INFINITY` when `end` is unreachable
    pub distance: Kilometers,

    /// Node ids from start to end, empty when `end` is unreachable
    pub path: Vec<NodeId>,
}

impl ShortestPath {
    fn unreachable() -> Self {
        Self {
            distance: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Shortest path between two nodes using Dijkstra's algorithm.
///
/// Works on any graph with non-negative weights. On the complete graphs built
/// for routing it always ends up taking the direct edge, but it does not rely
/// on that.
pub fn shortest_path(graph: &LocationGraph, start: &str, end: &str) -> ShortestPath {
    if !graph.contains(start) || !graph.contains(end) {
        return ShortestPath::unreachable();
    }

    let mut distances: HashMap<&str, Kilometers> = HashMap::with_capacity(graph.node_count());
    let mut previous: HashMap<&str, &str> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::with_capacity(graph.node_count());
    // Reverse turns the max-queue into a min-queue
    let mut queue: PriorityQueue<&str, Reverse<Tentative>> = PriorityQueue::new();

    for id in graph.node_ids() {
        let initial = if id == start { 0.0 } else { f64::INFINITY };
        distances.insert(id.as_str(), initial);
        queue.push(id.as_str(), Reverse(Tentative(initial)));
    }

    while let Some((current, Reverse(Tentative(current_distance)))) = queue.pop() {
        // Everything left is unreachable
        if !current_distance.is_finite() {
            break;
        }

        visited.insert(current);

        if current == end {
            break;
        }

        for (neighbor, weight) in graph.neighbors(current) {
            let neighbor = neighbor.as_str();
            if visited.contains(neighbor) {
                continue;
            }

            let candidate = current_distance + weight;
            let known = distances.get(neighbor).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                distances.insert(neighbor, candidate);
                previous.insert(neighbor, current);
                queue.change_priority(neighbor, Reverse(Tentative(candidate)));
            }
        }
    }

    if !visited.contains(end) {
        return ShortestPath::unreachable();
    }

    // Walk predecessors back from the end
    let mut path = vec![end.to_string()];
    let mut cursor = end;
    while let Some(&prev) = previous.get(cursor) {
        path.push(prev.to_string());
        cursor = prev;
    }
    path.reverse();

    ShortestPath {
        distance: distances.get(end).copied().unwrap_or(f64::INFINITY),
        path,
    }
}
