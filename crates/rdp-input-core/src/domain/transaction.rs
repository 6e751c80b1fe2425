//! Ordered batches of device events.
//!
//! Several device events produced by one browser event (or one shortcut such
//! as Ctrl+Alt+Del) must reach the server together and in order.  The session
//! engine treats an [`InputTransaction`] as a unit: it is either applied as a
//! whole or rejected as a whole, so callers never observe partial application.

use serde::Serialize;

use super::device_event::DeviceEvent;

/// An ordered, single-use batch of [`DeviceEvent`]s.
///
/// Insertion order is dispatch order.  A transaction is built fresh for each
/// batch, handed to the session by value, and dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InputTransaction {
    events: Vec<DeviceEvent>,
}

impl InputTransaction {
    /// Creates an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event; it will be applied after every event already added.
    pub fn add_event(&mut self, event: DeviceEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Borrows the events in dispatch order.
    pub fn events(&self) -> &[DeviceEvent] {
        &self.events
    }

    /// Consumes the transaction, yielding its events in dispatch order.
    pub fn into_events(self) -> Vec<DeviceEvent> {
        self.events
    }
}

impl FromIterator<DeviceEvent> for InputTransaction {
    fn from_iter<I: IntoIterator<Item = DeviceEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for InputTransaction {
    type Item = DeviceEvent;
    type IntoIter = std::vec::IntoIter<DeviceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
