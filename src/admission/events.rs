use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::LocationUnavailable;
use crate::models::{Coordinate, Node, NodeId, Route};

/// Everything that can change the engine's state
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The device reported the vendor's position
    VendorLocated(Coordinate),
    /// The device could not report a position
    VendorLocationFailed(LocationUnavailable),
    /// A batch of nearby consumers from a remote query
    CandidatesLoaded(Vec<Node>),
    /// The scheduler released one more candidate
    NextCandidateReady(Node),
    /// A consumer moved
    PositionUpdate { id: NodeId, coordinate: Coordinate },
    /// The user accepted the pending request
    Accept(NodeId),
    /// The user declined the pending request
    Decline(NodeId),
}

/// Create the queue that feeds the sequential processor
pub fn event_queue() -> (Sender<Event>, Receiver<Event>) {
    mpsc::channel()
}

/// Read side of the current route.
///
/// The route behind the handle is only ever swapped for a complete new one, so
/// readers see either the previous or the next route, never a partial one.
#[derive(Debug, Clone)]
pub struct RouteSnapshot {
    inner: Arc<RwLock<Arc<Route>>>,
}

impl RouteSnapshot {
    pub fn new(route: Arc<Route>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(route)),
        }
    }

    /// The latest published route
    pub fn current(&self) -> Arc<Route> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub(crate) fn publish(&self, route: Arc<Route>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = route;
    }
}

impl Default for RouteSnapshot {
    fn default() -> Self {
        Self::new(Arc::new(Route::vendor_only()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VENDOR_ID;

    #[test]
    fn test_snapshot_replaces_whole_route() {
        let snapshot = RouteSnapshot::default();
        let reader = snapshot.clone();
        let old = reader.current();

        let route = Arc::new(Route::new(
            vec![VENDOR_ID.to_string(), "c1".to_string()],
            0.6,
        ));
        snapshot.publish(Arc::clone(&route));

        // Earlier readers keep their consistent copy
        assert_eq!(old.path, vec![VENDOR_ID]);
        assert!(Arc::ptr_eq(&reader.current(), &route));
    }

    #[test]
    fn test_queue_preserves_order() {
        let (sender, receiver) = event_queue();
        sender.send(Event::Accept("a".to_string())).unwrap();
        sender.send(Event::Decline("b".to_string())).unwrap();
        let received: Vec<Event> = receiver.try_iter().collect();
        assert_eq!(
            received,
            vec![
                Event::Accept("a".to_string()),
                Event::Decline("b".to_string())
            ]
        );
    }
}
