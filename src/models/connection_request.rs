// Connection request model for the consumer admission workflow

use crate::models::Node;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    /// Accepted and Declined are final
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

/// A consumer asking to be added to the vendor's delivery route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// The consumer that raised the request
    pub consumer: Node,

    status: RequestStatus,
}

impl ConnectionRequest {
    /// Creates a pending request for the given consumer
    pub fn new(consumer: Node) -> Self {
        Self {
            consumer,
            status: RequestStatus::Pending,
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Moves the request into a terminal state.
    /// Returns false and leaves the status untouched if it was already terminal.
    pub(crate) fn resolve(&mut self, outcome: RequestStatus) -> bool {
        if self.status.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.status = outcome;
        true
    }
}
