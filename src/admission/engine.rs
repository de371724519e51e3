use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, info, warn};

use crate::admission::controller::ConnectionRequestController;
use crate::admission::events::{event_queue, Event, RouteSnapshot};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult, LocationUnavailable};
use crate::models::{ConnectionRequest, Coordinate};

/// Whether a vendor position is currently usable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationState {
    /// Nothing has been reported yet
    Unknown,
    Available(Coordinate),
    Unavailable(LocationUnavailable),
}

/// Sequential processor for all engine events.
///
/// Events are taken from one queue and each is handled to completion before
/// the next, so position updates can never interleave with a route
/// computation. The engine is the only writer of the accepted set and the
/// route; readers use the [`RouteSnapshot`] handle.
pub struct DeliveryEngine {
    config: EngineConfig,
    location: LocationState,
    controller: Option<ConnectionRequestController>,
    snapshot: RouteSnapshot,
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl DeliveryEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let (sender, receiver) = event_queue();
        Ok(Self {
            config,
            location: LocationState::Unknown,
            controller: None,
            snapshot: RouteSnapshot::default(),
            sender,
            receiver,
        })
    }

    /// Handle for collaborators that produce events
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    /// Handle for collaborators that display the route
    pub fn snapshot(&self) -> RouteSnapshot {
        self.snapshot.clone()
    }

    pub fn location(&self) -> LocationState {
        self.location
    }

    pub fn controller(&self) -> Option<&ConnectionRequestController> {
        self.controller.as_ref()
    }

    /// The request the user should be prompted with
    pub fn pending_request(&self) -> Option<&ConnectionRequest> {
        self.controller.as_ref()?.pending()
    }

    /// Handle every queued event in arrival order.
    ///
    /// A failing event is logged and reported but does not stop the events
    /// behind it.
    pub fn process_queued(&mut self) -> Vec<EngineError> {
        let mut errors = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            if let Err(e) = self.handle(event) {
                warn!(error = %e, "event rejected");
                errors.push(e);
            }
        }
        errors
    }

    /// Handle a single event to completion
    pub fn handle(&mut self, event: Event) -> EngineResult<()> {
        debug!(?event, "handling event");
        match event {
            Event::VendorLocated(coordinate) => self.vendor_located(coordinate),
            Event::VendorLocationFailed(reason) => {
                warn!(%reason, "vendor location unavailable");
                self.location = LocationState::Unavailable(reason);
                Ok(())
            }
            Event::CandidatesLoaded(consumers) => {
                let admitted = self.ready_controller()?.admit(&consumers)?;
                info!(admitted, offered = consumers.len(), "candidates loaded");
                Ok(())
            }
            Event::NextCandidateReady(consumer) => {
                self.ready_controller()?.admit(std::slice::from_ref(&consumer))?;
                Ok(())
            }
            Event::PositionUpdate { id, coordinate } => {
                if self.ready_controller()?.update_position(&id, coordinate)? {
                    self.publish();
                }
                Ok(())
            }
            Event::Accept(id) => {
                self.ready_controller()?.accept(&id)?;
                self.publish();
                Ok(())
            }
            Event::Decline(id) => {
                self.ready_controller()?.decline(&id)?;
                Ok(())
            }
        }
    }

    fn vendor_located(&mut self, coordinate: Coordinate) -> EngineResult<()> {
        coordinate.validate()?;
        match self.controller.as_mut() {
            Some(controller) => controller.relocate_vendor(coordinate)?,
            None => {
                self.controller = Some(ConnectionRequestController::new(coordinate, &self.config)?);
            }
        }
        self.location = LocationState::Available(coordinate);
        self.publish();
        Ok(())
    }

    // No computation happens without a usable vendor position
    fn ready_controller(&mut self) -> EngineResult<&mut ConnectionRequestController> {
        let reason = match self.location {
            LocationState::Available(_) => None,
            LocationState::Unavailable(reason) => Some(reason),
            LocationState::Unknown => Some(LocationUnavailable::Unavailable),
        };
        match (reason, self.controller.as_mut()) {
            (None, Some(controller)) => Ok(controller),
            (Some(reason), _) => Err(EngineError::LocationUnavailable(reason)),
            (None, None) => Err(EngineError::LocationUnavailable(LocationUnavailable::Unavailable)),
        }
    }

    fn publish(&self) {
        if let Some(controller) = &self.controller {
            self.snapshot.publish(controller.route());
        }
    }
}
