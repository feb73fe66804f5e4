use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one advice request against the calculation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Drops advice responses that arrive after the user recalculated.
///
/// Every recalculation or new request moves the generation forward; only the response holding
/// the latest ticket is accepted.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    generation: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for the current calculation.
    pub fn issue(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Mark every outstanding ticket stale, e.g. after a recalculation.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn accept(&self, ticket: Ticket, response: String) -> Option<String> {
        if self.is_current(ticket) {
            Some(response)
        } else {
            log::debug!("discarding stale advice response for ticket {}", ticket.0);
            None
        }
    }
}
