use tracing::debug;

use crate::algorithms::dijkstra::shortest_path;
use crate::algorithms::RouteComposer;
use crate::error::EngineResult;
use crate::models::{Kilometers, Node, NodeId, Route};
use crate::utils::location_graph::LocationGraph;

/// Greedy nearest-neighbour sequencer.
///
/// Starting at the vendor, the route is repeatedly extended to the closest
/// unvisited consumer. This is an O(n²) approximation of the travelling
/// salesperson tour, not an exact solver. Exact ties go to the consumer that
/// comes first in the input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl NearestNeighbor {
    pub fn new() -> Self {
        Self
    }
}

impl RouteComposer for NearestNeighbor {
    fn compose_route(&self, vendor: &Node, consumers: &[Node]) -> EngineResult<Route> {
        let graph = LocationGraph::build(vendor, consumers)?;

        let mut current: NodeId = vendor.id.clone();
        let mut unvisited: Vec<&str> = consumers.iter().map(|c| c.id.as_str()).collect();
        let mut path = vec![vendor.id.clone()];
        let mut total: Kilometers = 0.0;

        while !unvisited.is_empty() {
            let mut nearest: Option<(usize, Kilometers)> = None;

            for (index, id) in unvisited.iter().enumerate() {
                let distance = shortest_path(&graph, &current, id).distance;
                // Strict comparison keeps the earliest consumer on exact ties
                let closer = match nearest {
                    Some((_, best)) => distance < best,
                    None => distance.is_finite(),
                };
                if closer {
                    nearest = Some((index, distance));
                }
            }

            // Only reachable on sparse graphs; stop instead of looping forever
            let Some((index, distance)) = nearest else {
                debug!(remaining = unvisited.len(), "no reachable consumer left");
                break;
            };

            let next = unvisited.remove(index);
            total += distance;
            path.push(next.to_string());
            current = next.to_string();
        }

        debug!(stops = path.len() - 1, total_distance = total, "composed route");
        Ok(Route::new(path, total))
    }
}
