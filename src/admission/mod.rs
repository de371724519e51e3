pub mod controller;
pub mod engine;
pub mod events;
pub mod simulation;

pub use controller::ConnectionRequestController;
pub use engine::{DeliveryEngine, LocationState};
pub use events::{Event, RouteSnapshot};
