// Models module - exports all model types

mod connection_request;
mod coordinate;
mod node;
mod route;

// Re-export model types
pub use self::connection_request::{ConnectionRequest, RequestStatus};
pub use self::coordinate::Coordinate;
pub use self::node::{Node, NodeMetadata, VENDOR_ID};
pub use self::route::Route;

// Common type aliases for improved code readability
pub type NodeId = String;
pub type Kilometers = f64;
pub type Degrees = f64;
pub type Minutes = u32;
