use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollerKind {
    Authorization,
    Payment,
}

/// Identifies one run of a poller. Replies carrying a ticket from an
/// earlier run, or from a stopped poller, are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PollTicket {
    pub kind: PollerKind,
    pub generation: u64,
}

/// Logical state of one reconciliation loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poller {
    kind: PollerKind,
    generation: u64,
    active: bool,
}

impl Poller {
    pub fn new(kind: PollerKind) -> Self {
        Self {
            kind,
            generation: 0,
            active: false,
        }
    }

    pub fn kind(&self) -> PollerKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stops any current run and begins a new one.
    pub fn start(&mut self) -> PollTicket {
        self.generation += 1;
        self.active = true;
        PollTicket {
            kind: self.kind,
            generation: self.generation,
        }
    }

    /// Returns whether a run was actually stopped.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    pub fn accepts(&self, ticket: PollTicket) -> bool {
        self.active && ticket.kind == self.kind && ticket.generation == self.generation
    }
}

/// Owns the concrete timer behind a poller. Dropping the handle cancels it,
/// so starting always releases the previous one first.
#[derive(Debug)]
pub struct PollerSlot<H> {
    handle: Option<H>,
}

impl<H> Default for PollerSlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> PollerSlot<H> {
    pub fn start(&mut self, handle: H) {
        drop(self.handle.take());
        self.handle = Some(handle);
    }

    pub fn stop(&mut self) {
        drop(self.handle.take());
    }
}
