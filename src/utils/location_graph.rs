use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Kilometers, Node, NodeId};
use crate::utils::geo_math;

/// Weighted undirected graph keyed by node id.
///
/// `build` produces a complete graph over the vendor and the consumers. The
/// adjacency representation also holds sparse graphs, which is what the
/// shortest path solver is written against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationGraph {
    // Node ID -> {neighbor ID -> distance}
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, Kilometers>>,
}

impl LocationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the complete graph over `{vendor} ∪ consumers`.
    ///
    /// Every unordered pair is measured once and stored in both directions.
    /// Consumers are validated first: ids must be unique and must not collide
    /// with the vendor, and coordinates must be valid. The vendor must carry
    /// the reserved vendor id.
    pub fn build(vendor: &Node, consumers: &[Node]) -> EngineResult<Self> {
        if !vendor.is_vendor() {
            return Err(EngineError::ReservedId(vendor.id.clone()));
        }
        vendor.coordinate.validate()?;
        let mut seen = HashSet::with_capacity(consumers.len() + 1);
        seen.insert(vendor.id.as_str());
        for consumer in consumers {
            consumer.validate_consumer()?;
            if !seen.insert(consumer.id.as_str()) {
                return Err(EngineError::DuplicateNode(consumer.id.clone()));
            }
        }

        let nodes: Vec<&Node> = std::iter::once(vendor).chain(consumers.iter()).collect();

        // Generate all unordered pairs
        let pairs: Vec<(usize, usize)> = (0..nodes.len())
            .flat_map(|i| ((i + 1)..nodes.len()).map(move |j| (i, j)))
            .collect();

        let distances: Vec<(usize, usize, Kilometers)> = pairs
            .par_iter()
            .map(|&(i, j)| {
                (
                    i,
                    j,
                    geo_math::distance(&nodes[i].coordinate, &nodes[j].coordinate),
                )
            })
            .collect();

        let mut graph = LocationGraph::new();
        for node in &nodes {
            graph.insert_node(node.id.clone());
        }
        for (i, j, distance) in distances {
            graph.insert_edge(&nodes[i].id, &nodes[j].id, distance);
        }

        debug!(
            nodes = graph.node_count(),
            edges = pairs.len(),
            "built location graph"
        );
        Ok(graph)
    }

    /// Add a node without edges
    pub fn insert_node<S: Into<NodeId>>(&mut self, id: S) {
        self.adjacency.entry(id.into()).or_default();
    }

    /// Add an undirected edge. Self edges are ignored.
    pub fn insert_edge(&mut self, a: &str, b: &str, distance: Kilometers) {
        if a == b {
            return;
        }
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), distance);
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), distance);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Node ids in sorted order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbours of a node with edge weights; empty for unknown nodes
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a NodeId, Kilometers)> {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(neighbor, weight)| (neighbor, *weight)))
    }

    /// Weight of the direct edge between two nodes, if any
    pub fn edge(&self, a: &str, b: &str) -> Option<Kilometers> {
        self.adjacency.get(a)?.get(b).copied()
    }

    /// Every pair of distinct nodes is connected in both directions with equal weight
    pub fn is_complete_and_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(a, edges)| {
            edges.len() + 1 == self.adjacency.len()
                && !edges.contains_key(a)
                && edges
                    .iter()
                    .all(|(b, weight)| self.edge(b, a) == Some(*weight))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, VENDOR_ID};

    fn vendor() -> Node {
        Node::vendor(Coordinate::new(28.6139, 77.2090))
    }

    fn consumers() -> Vec<Node> {
        vec![
            Node::new("c1", Coordinate::new(28.6189, 77.2120)),
            Node::new("c2", Coordinate::new(28.6100, 77.2140)),
            Node::new("c3", Coordinate::new(28.6200, 77.2000)),
        ]
    }

    #[test]
    fn test_build_complete_symmetric() {
        let graph = LocationGraph::build(&vendor(), &consumers()).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert!(graph.is_complete_and_symmetric());
        assert_eq!(graph.edge(VENDOR_ID, VENDOR_ID), None);
        assert_eq!(graph.edge("c1", "c2"), graph.edge("c2", "c1"));
    }

    #[test]
    fn test_edge_weights_are_haversine() {
        let consumers = consumers();
        let graph = LocationGraph::build(&vendor(), &consumers).unwrap();
        let expected = geo_math::distance(&vendor().coordinate, &consumers[0].coordinate);
        assert_eq!(graph.edge(VENDOR_ID, "c1"), Some(expected));
    }

    #[test]
    fn test_vendor_only_graph() {
        let graph = LocationGraph::build(&vendor(), &[]).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.contains(VENDOR_ID));
        assert_eq!(graph.neighbors(VENDOR_ID).count(), 0);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut consumers = consumers();
        consumers.push(Node::new("c1", Coordinate::new(28.0, 77.0)));
        assert!(matches!(
            LocationGraph::build(&vendor(), &consumers),
            Err(EngineError::DuplicateNode(id)) if id == "c1"
        ));
    }

    #[test]
    fn test_vendor_must_carry_reserved_id() {
        let depot = Node::new("depot", Coordinate::new(28.6139, 77.2090));
        let consumers = vec![
            Node::new("depot", Coordinate::new(28.6189, 77.2120)),
            Node::new("c2", Coordinate::new(28.6100, 77.2140)),
        ];
        assert!(matches!(
            LocationGraph::build(&depot, &consumers),
            Err(EngineError::ReservedId(id)) if id == "depot"
        ));
        assert!(matches!(
            LocationGraph::build(&depot, &[]),
            Err(EngineError::ReservedId(_))
        ));
    }

    #[test]
    fn test_rejects_consumer_reusing_vendor_id() {
        let consumers = vec![Node::new(VENDOR_ID, Coordinate::new(28.6189, 77.2120))];
        assert!(matches!(
            LocationGraph::build(&vendor(), &consumers),
            Err(EngineError::ReservedId(id)) if id == VENDOR_ID
        ));
    }

    #[test]
    fn test_rejects_invalid_coordinates_before_building() {
        let consumers = vec![Node::new("bad", Coordinate::new(f64::NAN, 77.0))];
        assert!(matches!(
            LocationGraph::build(&vendor(), &consumers),
            Err(EngineError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_sparse_graph_is_not_complete() {
        let mut graph = LocationGraph::new();
        graph.insert_edge("a", "b", 1.0);
        graph.insert_node("c");
        graph.insert_edge("a", "a", 5.0);
        assert!(!graph.is_complete_and_symmetric());
        assert_eq!(graph.edge("a", "a"), None);
        assert_eq!(graph.neighbors("missing").count(), 0);
    }
}
