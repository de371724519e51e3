// Route model for representing an ordered delivery route

use crate::models::{Coordinate, Kilometers, Node, NodeId, VENDOR_ID};
use geo::LineString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a complete delivery route starting at the vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Sequence of node ids to visit, always starting with the vendor
    pub path: Vec<NodeId>,

    /// Sum of the hop distances along `path`
    pub total_distance: Kilometers,
}

impl Route {
    /// Creates a new route
    pub fn new(path: Vec<NodeId>, total_distance: Kilometers) -> Self {
        Self {
            path,
            total_distance,
        }
    }

    /// Route that stays at the vendor
    pub fn vendor_only() -> Self {
        Self::new(vec![VENDOR_ID.to_string()], 0.0)
    }

    /// Consumer ids in visiting order
    pub fn consumer_ids(&self) -> &[NodeId] {
        self.path.get(1..).unwrap_or_default()
    }

    /// Number of consumer stops on the route
    pub fn stop_count(&self) -> usize {
        self.consumer_ids().len()
    }

    /// Checks if the route visits the given node
    pub fn contains(&self, id: &str) -> bool {
        self.path.iter().any(|node_id| node_id == id)
    }

    /// Resolves the path into coordinates, skipping ids that are not known
    pub fn coordinates(&self, vendor: &Node, consumers: &[Node]) -> Vec<Coordinate> {
        let mut lookup: HashMap<&str, Coordinate> = consumers
            .iter()
            .map(|node| (node.id.as_str(), node.coordinate))
            .collect();
        lookup.insert(VENDOR_ID, vendor.coordinate);

        self.path
            .iter()
            .filter_map(|id| lookup.get(id.as_str()).copied())
            .collect()
    }

    /// Polyline of the route for map renderers, in (longitude, latitude) order
    pub fn line_string(&self, vendor: &Node, consumers: &[Node]) -> LineString<f64> {
        self.coordinates(vendor, consumers)
            .into_iter()
            .map(|c| (c.longitude, c.latitude))
            .collect::<Vec<_>>()
            .into()
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::vendor_only()
    }
}
