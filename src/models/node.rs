// Node model representing the vendor or a consumer on the delivery map

use crate::error::{EngineError, EngineResult};
use crate::models::{Coordinate, NodeId};
use serde::{Deserialize, Serialize};

/// Identifier reserved for the vendor node
pub const VENDOR_ID: &str = "vendor";

/// Display data carried by a node. The engine never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeMetadata {
    /// Display name of the consumer
    pub name: String,

    /// Human readable address, if one is known
    pub address: Option<String>,

    /// Number of active orders
    pub order_count: u32,

    /// Total value of the active orders
    pub order_value: f64,

    /// Whether the consumer is currently moving
    pub is_moving: bool,
}

/// A point on the delivery map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier of the node
    pub id: NodeId,

    /// Current position of the node
    pub coordinate: Coordinate,

    /// Opaque display data
    #[serde(default)]
    pub metadata: NodeMetadata,
}

impl Node {
    /// Creates a new node with empty metadata
    pub fn new<S: Into<NodeId>>(id: S, coordinate: Coordinate) -> Self {
        Self {
            id: id.into(),
            coordinate,
            metadata: NodeMetadata::default(),
        }
    }

    /// Creates a consumer node with the given metadata
    pub fn with_metadata<S: Into<NodeId>>(
        id: S,
        coordinate: Coordinate,
        metadata: NodeMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            coordinate,
            metadata,
        }
    }

    /// Creates the vendor node at the given position
    pub fn vendor(coordinate: Coordinate) -> Self {
        Self::new(VENDOR_ID, coordinate)
    }

    /// Checks whether this node is the vendor
    pub fn is_vendor(&self) -> bool {
        self.id == VENDOR_ID
    }

    /// Validates a node that is about to be used as a consumer
    pub fn validate_consumer(&self) -> EngineResult<()> {
        if self.is_vendor() {
            return Err(EngineError::ReservedId(self.id.clone()));
        }
        self.coordinate.validate()
    }
}
