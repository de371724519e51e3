// Public modules
pub mod admission;
pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-exports for convenience
pub use admission::{ConnectionRequestController, DeliveryEngine, Event, RouteSnapshot};
pub use algorithms::nearest_neighbor::NearestNeighbor;
pub use algorithms::RouteComposer;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult, LocationUnavailable};
pub use models::{ConnectionRequest, Coordinate, Node, RequestStatus, Route, VENDOR_ID};
