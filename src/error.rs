use crate::models::NodeId;
use std::fmt;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Why the device could not provide the vendor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationUnavailable {
    PermissionDenied,
    Timeout,
    ServicesDisabled,
    Unavailable,
}

impl fmt::Display for LocationUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            LocationUnavailable::PermissionDenied => "permission denied",
            LocationUnavailable::Timeout => "location request timed out",
            LocationUnavailable::ServicesDisabled => "location services disabled",
            LocationUnavailable::Unavailable => "position could not be determined",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Vendor location unavailable: {0}")]
    LocationUnavailable(LocationUnavailable),

    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("Node id {0} is reserved for the vendor")]
    ReservedId(NodeId),

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("No connection request is pending")]
    NoPendingRequest,

    #[error("Request for {actual} is not the pending request ({expected})")]
    NotPendingRequest { expected: NodeId, actual: NodeId },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
