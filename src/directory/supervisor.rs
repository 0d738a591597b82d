//! Owns in-flight directory lookups.
//!
//! Every request gets a fresh cancellation token and a ticket. A newer
//! request of the same kind cancels the older one, so a superseded task never
//! publishes its result. Outcomes come back over an unbounded channel that the
//! UI loop drains.

use super::traits::DirectoryLookup;
use crate::error::LookupError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Countries,
    Universities,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Countries,
    Universities { country: String },
}

impl LookupRequest {
    pub fn kind(&self) -> LookupKind {
        match self {
            Self::Countries => LookupKind::Countries,
            Self::Universities { .. } => LookupKind::Universities,
        }
    }
}

/// Identifies one issued request; generations only grow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    pub kind: LookupKind,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub ticket: LookupTicket,
    pub result: Result<Vec<String>, LookupError>,
}

struct InFlight {
    ticket: LookupTicket,
    cancel: CancellationToken,
}

pub struct LookupSupervisor {
    directory: Arc<dyn DirectoryLookup>,
    timeout: Duration,
    generation: u64,
    in_flight: HashMap<LookupKind, InFlight>,
    event_tx: UnboundedSender<LookupOutcome>,
    event_rx: Option<UnboundedReceiver<LookupOutcome>>,
}

impl LookupSupervisor {
    pub fn new(directory: Arc<dyn DirectoryLookup>, timeout: Duration) -> Self {
        let (event_tx, event_rx) = unbounded_channel();
        Self {
            directory,
            timeout,
            generation: 0,
            in_flight: HashMap::new(),
            event_tx,
            event_rx: Some(event_rx),
        }
    }

    /// Take the outcome receiver. Only the first call gets it.
    pub fn take_event_receiver(&mut self) -> Option<UnboundedReceiver<LookupOutcome>> {
        self.event_rx.take()
    }

    /// Spawn a lookup, cancelling any outstanding one of the same kind
    pub fn request(&mut self, request: LookupRequest) -> LookupTicket {
        self.generation += 1;
        let ticket = LookupTicket {
            kind: request.kind(),
            generation: self.generation,
        };

        if let Some(previous) = self.in_flight.remove(&ticket.kind) {
            debug!("Superseding lookup {:?}", previous.ticket);
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let cancel_child = cancel.clone();
        let directory = Arc::clone(&self.directory);
        let event_tx = self.event_tx.clone();
        let limit = self.timeout;

        info!("Starting lookup {:?} ({:?})", request, ticket);
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel_child.cancelled() => {
                    debug!("Lookup {:?} cancelled", ticket);
                }
                result = run_lookup(directory.as_ref(), &request, limit) => {
                    if cancel_child.is_cancelled() {
                        return;
                    }
                    if let Err(e) = &result {
                        warn!("Lookup {:?} failed: {}", ticket, e);
                    }
                    let _ = event_tx.send(LookupOutcome { ticket, result });
                }
            }
        });

        self.in_flight.insert(ticket.kind, InFlight { ticket, cancel });
        ticket
    }

    /// Whether `ticket` is the latest request of its kind
    pub fn is_current(&self, ticket: LookupTicket) -> bool {
        self.in_flight
            .get(&ticket.kind)
            .is_some_and(|f| f.ticket == ticket)
    }

    pub fn cancel_all(&mut self) {
        for (_, flight) in self.in_flight.drain() {
            flight.cancel.cancel();
        }
    }
}

impl Drop for LookupSupervisor {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

async fn run_lookup(
    directory: &dyn DirectoryLookup,
    request: &LookupRequest,
    limit: Duration,
) -> Result<Vec<String>, LookupError> {
    let query = async {
        match request {
            LookupRequest::Countries => directory.list_countries().await,
            LookupRequest::Universities { country } => directory.list_universities(country).await,
        }
    };
    let names = tokio::time::timeout(limit, query)
        .await
        .map_err(|_| LookupError::Timeout)??;
    if names.is_empty() {
        return Err(LookupError::Empty);
    }
    Ok(names)
}
