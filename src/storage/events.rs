use std::sync::mpsc::{self, Receiver, Sender};

use crate::domain::{FuelEntryId, VehicleId};

/// Change notification emitted after every successful store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    VehicleAdded(VehicleId),
    VehicleUpdated(VehicleId),
    VehicleRemoved(VehicleId),
    FuelEntryAdded(FuelEntryId),
    FuelEntryUpdated(FuelEntryId),
    FuelEntryRemoved(FuelEntryId),
}

/// Fan-out list of event receivers. Receivers that were dropped are
/// pruned on the next notification.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<StoreEvent>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub(crate) fn notify(&mut self, event: StoreEvent) {
        self.senders.retain(|tx| tx.send(event).is_ok());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_notify_reaches_every_subscriber() {
        let mut subscribers = Subscribers::default();
        let first = subscribers.subscribe();
        let second = subscribers.subscribe();
        let id = Uuid::new_v4();

        subscribers.notify(StoreEvent::VehicleAdded(id));

        assert_eq!(first.try_recv(), Ok(StoreEvent::VehicleAdded(id)));
        assert_eq!(second.try_recv(), Ok(StoreEvent::VehicleAdded(id)));
    }

    #[test]
    fn test_dropped_receivers_are_pruned() {
        let mut subscribers = Subscribers::default();
        let kept = subscribers.subscribe();
        drop(subscribers.subscribe());

        subscribers.notify(StoreEvent::FuelEntryRemoved(Uuid::new_v4()));

        assert_eq!(subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
