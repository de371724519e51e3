pub mod dijkstra;
pub mod nearest_neighbor;

// Common algorithm traits
use crate::error::EngineResult;
use crate::models::{Node, Route};

/// Trait for delivery route sequencers
pub trait RouteComposer {
    /// Order the consumers into a route that starts at the vendor
    fn compose_route(&self, vendor: &Node, consumers: &[Node]) -> EngineResult<Route>;
}
