use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::algorithms::nearest_neighbor::NearestNeighbor;
use crate::algorithms::RouteComposer;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{ConnectionRequest, Coordinate, Kilometers, Node, RequestStatus, Route};
use crate::utils::geo_math::TravelMode;
use crate::utils::radius_filter::{filter_by_radius, Candidate, Proximity};

/// Admits consumer connection requests into the vendor's route one at a time.
///
/// Candidates wait in a FIFO queue. At most one request is pending; the next
/// candidate is only presented after the pending one has been accepted or
/// declined. Every acceptance recomposes the route from scratch.
pub struct ConnectionRequestController<C: RouteComposer = NearestNeighbor> {
    vendor: Node,
    composer: C,
    radius_km: Kilometers,
    travel_mode: TravelMode,
    candidates: VecDeque<Node>,
    pending: Option<ConnectionRequest>,
    accepted: Vec<Node>,
    route: Arc<Route>,
}

impl ConnectionRequestController<NearestNeighbor> {
    /// Creates a controller using the nearest-neighbour composer
    pub fn new(vendor: Coordinate, config: &EngineConfig) -> EngineResult<Self> {
        Self::with_composer(vendor, config, NearestNeighbor::new())
    }
}

impl<C: RouteComposer> ConnectionRequestController<C> {
    pub fn with_composer(
        vendor: Coordinate,
        config: &EngineConfig,
        composer: C,
    ) -> EngineResult<Self> {
        vendor.validate()?;
        config.validate()?;
        Ok(Self {
            vendor: Node::vendor(vendor),
            composer,
            radius_km: config.radius_km,
            travel_mode: config.travel_mode,
            candidates: VecDeque::new(),
            pending: None,
            accepted: Vec::new(),
            route: Arc::new(Route::vendor_only()),
        })
    }

    pub fn vendor(&self) -> &Node {
        &self.vendor
    }

    /// The request awaiting a decision, if any
    pub fn pending(&self) -> Option<&ConnectionRequest> {
        self.pending.as_ref()
    }

    pub fn accepted(&self) -> &[Node] {
        &self.accepted
    }

    pub fn queued(&self) -> usize {
        self.candidates.len()
    }

    /// Current route; replaced wholesale on every change
    pub fn route(&self) -> Arc<Route> {
        Arc::clone(&self.route)
    }

    /// Queue the consumers that fall within the radius, in input order.
    ///
    /// Consumers already known to the controller are skipped. Returns the
    /// number of new candidates.
    pub fn admit(&mut self, consumers: &[Node]) -> EngineResult<usize> {
        for consumer in consumers {
            consumer.validate_consumer()?;
        }

        let in_range = filter_by_radius(
            &self.vendor.coordinate,
            consumers,
            self.radius_km,
            self.travel_mode,
        );
        let mut admitted = 0;
        for Candidate { node, proximity } in in_range {
            if self.is_known(&node.id) {
                warn!(consumer = %node.id, "consumer already known, skipping");
                continue;
            }
            debug!(consumer = %node.id, proximity = %proximity.summary(), "candidate queued");
            self.candidates.push_back(node);
            admitted += 1;
        }

        if admitted < consumers.len() {
            debug!(
                skipped = consumers.len() - admitted,
                radius_km = self.radius_km,
                "candidates not admitted"
            );
        }
        self.advance();
        Ok(admitted)
    }

    /// Accept the pending request for `consumer_id` and recompose the route
    pub fn accept(&mut self, consumer_id: &str) -> EngineResult<ConnectionRequest> {
        self.check_pending(consumer_id)?;

        let mut accepted = self.accepted.clone();
        if let Some(request) = &self.pending {
            accepted.push(request.consumer.clone());
        }
        // Compose before committing so a failure leaves the state untouched
        let route = self.composer.compose_route(&self.vendor, &accepted)?;

        let mut request = self.pending.take().ok_or(EngineError::NoPendingRequest)?;
        request.resolve(RequestStatus::Accepted);
        self.accepted = accepted;
        self.route = Arc::new(route);

        info!(
            consumer = %request.consumer.id,
            stops = self.route.stop_count(),
            total_distance = self.route.total_distance,
            "request accepted, route recomputed"
        );
        self.advance();
        Ok(request)
    }

    /// Decline the pending request; the route and accepted set stay unchanged
    pub fn decline(&mut self, consumer_id: &str) -> EngineResult<ConnectionRequest> {
        self.check_pending(consumer_id)?;

        let mut request = self.pending.take().ok_or(EngineError::NoPendingRequest)?;
        request.resolve(RequestStatus::Declined);
        info!(consumer = %request.consumer.id, "request declined");
        self.advance();
        Ok(request)
    }

    /// Move a consumer. Returns true when the route had to be recomposed.
    pub fn update_position(
        &mut self,
        consumer_id: &str,
        coordinate: Coordinate,
    ) -> EngineResult<bool> {
        coordinate.validate()?;

        if let Some(index) = self.accepted.iter().position(|n| n.id == consumer_id) {
            let mut accepted = self.accepted.clone();
            accepted[index].coordinate = coordinate;
            let route = self.composer.compose_route(&self.vendor, &accepted)?;
            self.accepted = accepted;
            self.replace_route(route);
            return Ok(true);
        }

        if let Some(request) = self.pending.as_mut().filter(|r| r.consumer.id == consumer_id) {
            request.consumer.coordinate = coordinate;
            return Ok(false);
        }

        match self.candidates.iter_mut().find(|n| n.id == consumer_id) {
            Some(node) => {
                node.coordinate = coordinate;
                Ok(false)
            }
            None => Err(EngineError::UnknownNode(consumer_id.to_string())),
        }
    }

    /// Move the vendor and recompose the route over the accepted consumers.
    ///
    /// Queued candidates are filtered against the radius around the new
    /// position; the pending request and accepted consumers are kept.
    pub fn relocate_vendor(&mut self, coordinate: Coordinate) -> EngineResult<()> {
        coordinate.validate()?;
        let vendor = Node::vendor(coordinate);
        let route = self.composer.compose_route(&vendor, &self.accepted)?;
        self.vendor = vendor;
        self.replace_route(route);

        let queued = self.candidates.len();
        let in_range = filter_by_radius(
            &self.vendor.coordinate,
            self.candidates.make_contiguous(),
            self.radius_km,
            self.travel_mode,
        );
        self.candidates = in_range.into_iter().map(|c| c.node).collect();
        if self.candidates.len() < queued {
            debug!(
                dropped = queued - self.candidates.len(),
                radius_km = self.radius_km,
                "queued candidates out of range after vendor moved"
            );
        }
        Ok(())
    }

    /// Distance, bearing and ETA of every visible consumer: accepted ones in
    /// route order, then the pending one
    pub fn consumer_list(&self) -> Vec<Candidate> {
        let accepted = self
            .route
            .consumer_ids()
            .iter()
            .filter_map(|id| self.accepted.iter().find(|n| &n.id == id));
        accepted
            .chain(self.pending.iter().map(|r| &r.consumer))
            .map(|node| Candidate {
                node: node.clone(),
                proximity: Proximity::measure(
                    &self.vendor.coordinate,
                    &node.coordinate,
                    self.travel_mode,
                ),
            })
            .collect()
    }

    /// Coordinates of the current route in visiting order
    pub fn route_coordinates(&self) -> Vec<Coordinate> {
        self.route.coordinates(&self.vendor, &self.accepted)
    }

    fn replace_route(&mut self, route: Route) {
        debug!(
            stops = route.stop_count(),
            total_distance = route.total_distance,
            "route replaced"
        );
        self.route = Arc::new(route);
    }

    fn check_pending(&self, consumer_id: &str) -> EngineResult<()> {
        match &self.pending {
            None => Err(EngineError::NoPendingRequest),
            Some(request) if request.consumer.id != consumer_id => {
                Err(EngineError::NotPendingRequest {
                    expected: request.consumer.id.clone(),
                    actual: consumer_id.to_string(),
                })
            }
            Some(_) => Ok(()),
        }
    }

    fn is_known(&self, id: &str) -> bool {
        self.accepted.iter().any(|n| n.id == id)
            || self.candidates.iter().any(|n| n.id == id)
            || self.pending.as_ref().is_some_and(|r| r.consumer.id == id)
    }

    // Present the next candidate if nothing is pending
    fn advance(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if let Some(consumer) = self.candidates.pop_front() {
            info!(
                consumer = %consumer.id,
                queued = self.candidates.len(),
                "presenting connection request"
            );
            self.pending = Some(ConnectionRequest::new(consumer));
        }
    }
}
